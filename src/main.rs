use clap::{CommandFactory, Parser};
use svcgraph::cli::{Cli, Command};
use svcgraph::{cmd_analyze, cmd_graph, cmd_init};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Some(Command::Analyze(args)) => cmd_analyze(args),
        Some(Command::Graph(args)) => cmd_graph(args),
        Some(Command::Init(args)) => cmd_init(args),
        None => {
            let _ = Cli::command().print_help();
            println!();
            0
        }
    };

    std::process::exit(exit_code);
}

/// Diagnostics go to stderr so report output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "svcgraph=debug" } else { "svcgraph=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
