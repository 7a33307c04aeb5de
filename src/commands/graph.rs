use crate::api::{AnalysisReport, analyze_services};
use crate::cli::GraphArgs;
use crate::fs::{FileSystem, default_fs};
use crate::graph::{GraphData, InsightsJob, render_svg, to_dot};
use crate::model::load_services;
use crate::style;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::{CommandContext, insights_provider, runtime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Svg,
    Json,
    Dot,
}

impl ExportFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(Self::Svg),
            "json" => Some(Self::Json),
            "dot" | "gv" => Some(Self::Dot),
            _ => None,
        }
    }
}

pub fn cmd_graph(args: GraphArgs) -> i32 {
    let mut ctx = match CommandContext::new(Path::new(".")) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    if let Some(radius) = args.radius {
        ctx.config.layout.radius = radius;
    }

    let services = match load_services(&args.file, default_fs()) {
        Ok(services) => services,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };
    let report = analyze_services(&services, &ctx.config);

    if args.serve {
        let insights = if args.insights {
            insights_provider(&ctx.config.insights).map(|provider| InsightsJob {
                provider: Arc::new(provider),
                timeout: Duration::from_secs(ctx.config.insights.timeout_secs),
            })
        } else {
            None
        };

        let rt = match runtime() {
            Ok(rt) => rt,
            Err(code) => return code,
        };
        if let Err(e) = rt.block_on(crate::graph::serve(report, args.port, args.open, insights)) {
            style::error(&format!("Server failed: {}", e));
            return 1;
        }
        0
    } else if let Some(export_path) = &args.export {
        export_with_fs(&report, export_path, default_fs())
    } else {
        style::error("Use --serve to start the visualization server, or --export to save the graph");
        1
    }
}

fn export_with_fs(report: &AnalysisReport, path: &Path, fs: &dyn FileSystem) -> i32 {
    let content = match ExportFormat::from_path(path) {
        Some(ExportFormat::Svg) => render_svg(&GraphData::from_report(report)),
        Some(ExportFormat::Dot) => to_dot(&report.snapshot),
        Some(ExportFormat::Json) => {
            match serde_json::to_string_pretty(&GraphData::from_report(report)) {
                Ok(json) => json,
                Err(e) => {
                    style::error(&format!("Failed to serialize graph: {}", e));
                    return 1;
                }
            }
        }
        None => {
            style::error(&format!(
                "Unsupported export format for {}",
                style::path(path)
            ));
            style::hint("use a .svg, .json or .dot file name");
            return 1;
        }
    };

    if let Err(e) = fs.write(path, &content) {
        style::error(&format!("Failed to write export file: {}", e));
        return 1;
    }
    style::success(&format!("Graph exported to: {}", style::path(path)));
    0
}
