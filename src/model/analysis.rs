use super::graph::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub max_degree: usize,
    pub avg_degree: f64,
    pub complexity_score: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub node_id: NodeId,
    pub degree: usize,
    pub risk_level: RiskLevel,
}

/// Diagnostics for one graph snapshot. A zero-service input yields `Default`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub metrics: Metrics,
    pub orphaned_nodes: Vec<NodeId>,
    pub hotspots: Vec<Hotspot>,
    pub cycles: Vec<Vec<NodeId>>,
}

impl AnalysisResult {
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn hotspot_risk(&self, id: &str) -> Option<RiskLevel> {
        self.hotspots
            .iter()
            .find(|h| h.node_id == id)
            .map(|h| h.risk_level)
    }

    pub fn is_orphan(&self, id: &str) -> bool {
        self.orphaned_nodes.iter().any(|n| n == id)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}
