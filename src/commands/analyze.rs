use crate::api::{AnalysisReport, analyze_services, fetch_insights_for};
use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::config::Config;
use crate::fs::{FileSystem, default_fs};
use crate::model::{Insights, load_services};
use crate::output::{JsonOutput, MarkdownOutput, OutputFormatter};
use crate::style;
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{CommandContext, insights_provider, runtime};

/// Exit code when `--fail-on-cycles` is set and a cycle was found.
pub const EXIT_CYCLES: i32 = 2;

pub fn cmd_analyze(args: AnalyzeArgs) -> i32 {
    let mut ctx = match CommandContext::new(Path::new(".")) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    if let Some(max_cycles) = args.max_cycles {
        ctx.config.thresholds.max_cycles = max_cycles;
    }
    if let Some(timeout) = args.timeout {
        ctx.config.insights.timeout_secs = timeout;
    }

    run_analysis_with_fs(&args, &ctx.config, default_fs())
}

fn run_analysis_with_fs(args: &AnalyzeArgs, config: &Config, fs: &dyn FileSystem) -> i32 {
    let services = match load_services(&args.file, fs) {
        Ok(services) => services,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };
    debug!(services = services.len(), file = %args.file.display(), "loaded service list");

    let report = analyze_services(&services, config);
    let mut record = report.record();

    if args.insights {
        if let Some(insights) = request_insights(&report, config) {
            record.merge_insights(insights);
        }
    }

    let mut buffer = Vec::new();
    let format_result = match args.format {
        OutputFormat::Markdown => {
            let title = args
                .file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "services".to_string());
            MarkdownOutput::new(title).format(&record, &mut buffer)
        }
        OutputFormat::Json => JsonOutput::new().format(&record, &mut buffer),
    };

    if let Err(e) = format_result {
        style::error(&format!("Failed to format output: {}", e));
        return 1;
    }

    let output_str = String::from_utf8_lossy(&buffer);

    // Render markdown nicely to terminal, or write plain text to file/pipe
    let write_result = match &args.output {
        Some(path) => fs.write(path, &output_str),
        None if args.format == OutputFormat::Markdown => {
            style::render_markdown(&output_str, &mut io::stdout())
        }
        None => {
            print!("{}", output_str);
            Ok(())
        }
    };

    if let Err(e) = write_result {
        style::error(&format!("Failed to write output: {}", e));
        return 1;
    }

    if let Some(path) = &args.output {
        style::success(&format!("Report written to {}", style::path(path)));
    }

    if args.fail_on_cycles && record.analysis.has_cycles() {
        EXIT_CYCLES
    } else {
        0
    }
}

/// Blocking insights call for the one-shot report. Ctrl+C cancels the
/// request; any failure leaves the report without insights.
fn request_insights(report: &AnalysisReport, config: &Config) -> Option<Insights> {
    let provider = insights_provider(&config.insights)?;
    let rt = runtime().ok()?;
    let timeout = Duration::from_secs(config.insights.timeout_secs);
    let cancel = CancellationToken::new();

    style::status("Requesting insights...");
    let outcome = rt.block_on(async {
        let watcher = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                watcher.cancel();
            }
        });
        fetch_insights_for(report, &provider, timeout, &cancel).await
    });

    match outcome {
        Ok(insights) => Some(insights),
        Err(e) => {
            style::warning(&format!("{}. Report generated without insights.", e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;
    use crate::model::AnalysisRecord;
    use std::path::PathBuf;

    const CYCLIC: &str = r#"[
        {"id": "A", "dependsOn": ["B"]},
        {"id": "B", "dependsOn": ["C"]},
        {"id": "C", "dependsOn": ["A"]},
        {"id": "D"}
    ]"#;

    fn args(format: OutputFormat, fail_on_cycles: bool) -> AnalyzeArgs {
        AnalyzeArgs {
            file: PathBuf::from("/in/services.json"),
            format,
            output: Some(PathBuf::from("/out/report")),
            insights: false,
            timeout: None,
            max_cycles: None,
            fail_on_cycles,
        }
    }

    #[test]
    fn test_json_report_written() {
        let fs = MockFs::with_files([(Path::new("/in/services.json"), CYCLIC)]);

        let code = run_analysis_with_fs(
            &args(OutputFormat::Json, false),
            &Config::default(),
            &fs,
        );

        assert_eq!(code, 0);
        let written = fs.read_to_string(Path::new("/out/report")).unwrap();
        let record: AnalysisRecord = serde_json::from_str(&written).unwrap();
        assert_eq!(record.analysis.metrics.complexity_score, 18);
        assert_eq!(record.analysis.orphaned_nodes, vec!["D"]);
        assert!(record.insights.is_none());
    }

    #[test]
    fn test_fail_on_cycles_exit_code() {
        let fs = MockFs::with_files([(Path::new("/in/services.json"), CYCLIC)]);

        let code = run_analysis_with_fs(
            &args(OutputFormat::Markdown, true),
            &Config::default(),
            &fs,
        );

        assert_eq!(code, EXIT_CYCLES);
        let written = fs.read_to_string(Path::new("/out/report")).unwrap();
        assert!(written.contains("# Service Dependency Analysis: services"));
        assert!(written.contains("A → B → C → A"));
    }

    #[test]
    fn test_acyclic_passes_fail_on_cycles() {
        let fs = MockFs::with_files([(
            Path::new("/in/services.json"),
            r#"[{"id": "api", "dependsOn": ["db"]}, {"id": "db"}]"#,
        )]);

        let code = run_analysis_with_fs(
            &args(OutputFormat::Markdown, true),
            &Config::default(),
            &fs,
        );

        assert_eq!(code, 0);
    }

    #[test]
    fn test_missing_or_invalid_input() {
        let fs = MockFs::with_files([(Path::new("/in/broken.json"), "{not json")]);

        let mut missing = args(OutputFormat::Json, false);
        missing.file = PathBuf::from("/in/absent.json");
        assert_eq!(run_analysis_with_fs(&missing, &Config::default(), &fs), 1);

        let mut broken = args(OutputFormat::Json, false);
        broken.file = PathBuf::from("/in/broken.json");
        assert_eq!(run_analysis_with_fs(&broken, &Config::default(), &fs), 1);
        assert!(!fs.exists(Path::new("/out/report")));
    }
}
