pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod graph;
pub mod insights;
pub mod model;
pub mod output;
pub mod style;

pub use api::{AnalysisReport, SvcgraphError, analyze_file, analyze_services, fetch_insights_for};
pub use cli::Cli;
pub use commands::{cmd_analyze, cmd_graph, cmd_init};
pub use config::Config;
pub use insights::{InsightsProvider, OpenAiInsightsProvider};
pub use model::{
    AnalysisRecord, AnalysisResult, GraphSnapshot, Hotspot, Insights, Metrics, RiskLevel, Service,
    parse_services,
};
