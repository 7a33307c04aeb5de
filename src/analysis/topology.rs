use crate::analysis::GraphMetrics;
use crate::config::Thresholds;
use crate::model::{GraphSnapshot, Hotspot, NodeId, RiskLevel};
use std::collections::HashSet;

/// Nodes that appear on neither end of any edge, in input order.
pub fn detect_orphans(snapshot: &GraphSnapshot) -> Vec<NodeId> {
    let connected: HashSet<&str> = snapshot
        .edges()
        .iter()
        .flat_map(|e| [e.from.as_str(), e.to.as_str()])
        .collect();

    snapshot
        .nodes()
        .iter()
        .filter(|n| !connected.contains(n.id.as_str()))
        .map(|n| n.id.clone())
        .collect()
}

pub fn detect_hotspots(metrics: &GraphMetrics, thresholds: &Thresholds) -> Vec<Hotspot> {
    let medium_limit = thresholds.hotspot_medium_factor * metrics.avg_degree;
    let high_limit = thresholds.hotspot_high_factor * metrics.avg_degree;

    metrics
        .degrees
        .iter()
        .filter_map(|node| {
            let degree = node.degree();
            if degree as f64 <= medium_limit {
                return None;
            }

            let risk_level = if degree as f64 > high_limit {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            };

            Some(Hotspot {
                node_id: node.id.clone(),
                degree,
                risk_level,
            })
        })
        .collect()
}
