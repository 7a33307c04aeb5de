use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "svcgraph")]
#[command(about = "Analyze service dependency graphs: orphans, hotspots, cycles and complexity")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze a JSON service list and print a report
    Analyze(AnalyzeArgs),

    /// Serve or export the dependency graph visualization
    Graph(GraphArgs),

    /// Generate a starter .svcgraph.toml configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// JSON file with the service list
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Request advisory insights from the configured model endpoint
    #[arg(long)]
    pub insights: bool,

    /// Seconds to wait for insights before giving up
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Maximum number of cycles to report
    #[arg(long)]
    pub max_cycles: Option<usize>,

    /// Exit with code 2 if any cycle is found
    #[arg(long)]
    pub fail_on_cycles: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// JSON file with the service list
    pub file: PathBuf,

    /// Start HTTP server for interactive visualization
    #[arg(long)]
    pub serve: bool,

    /// Port for HTTP server
    #[arg(long, default_value = "3000")]
    pub port: u16,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Export the graph instead of serving (.svg, .json or .dot)
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Layout circle radius
    #[arg(long)]
    pub radius: Option<f64>,

    /// Fetch insights in the background while serving
    #[arg(long)]
    pub insights: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Directory where to create .svcgraph.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_flags() {
        let cli = Cli::parse_from([
            "svcgraph",
            "analyze",
            "services.json",
            "--format",
            "json",
            "--max-cycles",
            "10",
            "--fail-on-cycles",
        ]);

        match cli.command {
            Some(Command::Analyze(args)) => {
                assert_eq!(args.file, PathBuf::from("services.json"));
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.max_cycles, Some(10));
                assert!(args.fail_on_cycles);
                assert!(!args.insights);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["svcgraph", "--verbose"]);
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn test_graph_export() {
        let cli = Cli::parse_from(["svcgraph", "graph", "s.json", "--export", "out.svg"]);
        match cli.command {
            Some(Command::Graph(args)) => {
                assert_eq!(args.export, Some(PathBuf::from("out.svg")));
                assert!(!args.serve);
                assert_eq!(args.port, 3000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
