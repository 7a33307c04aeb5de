//! Library API for svcgraph.
//!
//! Analysis and insights are separate calls. `analyze_services` is pure and
//! synchronous; `fetch_insights_for` is async, bounded by a timeout and
//! cancellable, and its output is merged into an [`AnalysisRecord`] by the
//! caller.
//!
//! # Example
//!
//! ```
//! use svcgraph::{Config, Service, analyze_services};
//!
//! let services = vec![
//!     Service::new("orders").depends_on(["payments"]),
//!     Service::new("payments").depends_on(["orders"]),
//!     Service::new("reporting"),
//! ];
//! let report = analyze_services(&services, &Config::default());
//!
//! assert_eq!(report.result.cycles.len(), 1);
//! assert_eq!(report.result.orphaned_nodes, vec!["reporting"]);
//! ```

use crate::analysis::{self, GraphMetrics};
use crate::config::{Config, ConfigError, LayoutConfig};
use crate::fs::default_fs;
use crate::graph::Layout;
use crate::insights::{self, InsightsError, InsightsProvider, InsightsRequest};
use crate::model::{
    AnalysisRecord, AnalysisResult, GraphSnapshot, IngestError, Insights, Service, load_services,
};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum SvcgraphError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid service list: {0}")]
    Ingest(#[from] IngestError),

    #[error("Insights error: {0}")]
    Insights(#[from] InsightsError),
}

/// Everything one analysis run produces, allocated fresh per call.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub services: Vec<Service>,
    pub snapshot: GraphSnapshot,
    pub metrics: GraphMetrics,
    pub result: AnalysisResult,
    pub layout: Layout,
    pub layout_config: LayoutConfig,
}

impl AnalysisReport {
    /// Persistable record without insights.
    pub fn record(&self) -> AnalysisRecord {
        AnalysisRecord::new(self.snapshot.clone(), self.result.clone())
    }

    pub fn insights_request(&self) -> InsightsRequest {
        InsightsRequest::from_analysis(&self.result, &self.services)
    }
}

pub fn analyze_services(services: &[Service], config: &Config) -> AnalysisReport {
    let snapshot = analysis::build_snapshot(services);
    let (metrics, result) = analysis::analyze_snapshot(&snapshot, &config.thresholds);
    let layout = Layout::circular(&snapshot, &config.layout);

    AnalysisReport {
        services: services.to_vec(),
        snapshot,
        metrics,
        result,
        layout,
        layout_config: config.layout.clone(),
    }
}

/// Load a JSON service list and analyze it.
pub fn analyze_file(path: &Path, config: &Config) -> Result<AnalysisReport, SvcgraphError> {
    let services = load_services(path, default_fs())?;
    Ok(analyze_services(&services, config))
}

pub async fn fetch_insights_for(
    report: &AnalysisReport,
    provider: &dyn InsightsProvider,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<Insights, SvcgraphError> {
    let request = report.insights_request();
    Ok(insights::fetch_insights(provider, &request, timeout, cancel).await?)
}
