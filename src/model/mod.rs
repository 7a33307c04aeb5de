mod analysis;
mod graph;
mod insights;
mod service;

pub use analysis::{AnalysisResult, Hotspot, Metrics, RiskLevel};
pub use graph::{Edge, GraphSnapshot, Node, NodeId};
pub use insights::{Insights, Recommendation};
pub use service::{DEFAULT_CATEGORY, IngestError, Service, load_services, parse_services};

use serde::{Deserialize, Serialize};

/// The record handed to report/persistence collaborators.
///
/// `insights` stays `None` until an advisory response is merged in; the
/// deterministic fields are never touched by a merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub graph: GraphSnapshot,
    pub analysis: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub insights: Option<Insights>,
}

impl AnalysisRecord {
    pub fn new(graph: GraphSnapshot, analysis: AnalysisResult) -> Self {
        Self {
            graph,
            analysis,
            insights: None,
        }
    }

    pub fn merge_insights(&mut self, insights: Insights) {
        self.insights = Some(insights);
    }
}
