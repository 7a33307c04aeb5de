use crate::api::AnalysisReport;
use crate::model::RiskLevel;
use serde::Serialize;
use std::collections::HashSet;

/// Positioned graph in the shape the browser view and SVG export consume.
#[derive(Debug, Clone, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub metadata: GraphMetadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub category: String,
    pub x: f64,
    pub y: f64,
    pub fan_in: usize,
    pub fan_out: usize,
    pub degree: usize,
    pub risk: Option<RiskLevel>,
    pub orphan: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub is_cycle: bool,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetadata {
    pub total_services: usize,
    pub total_dependencies: usize,
    pub dangling_dependencies: usize,
    pub hotspot_count: usize,
    pub cycle_count: usize,
    pub complexity_score: u64,
    pub width: f64,
    pub height: f64,
}

impl GraphData {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let result = &report.result;

        let nodes: Vec<GraphNode> = report
            .snapshot
            .nodes()
            .iter()
            .zip(&report.layout.positions)
            .zip(&report.metrics.degrees)
            .map(|((node, position), degree)| GraphNode {
                id: node.id.clone(),
                name: node.name.clone(),
                category: node.category.clone(),
                x: position.x,
                y: position.y,
                fan_in: degree.in_degree,
                fan_out: degree.out_degree,
                degree: degree.degree(),
                risk: result.hotspot_risk(&node.id),
                orphan: result.is_orphan(&node.id),
            })
            .collect();

        // Consecutive pairs of every reported cycle
        let cycle_edges: HashSet<(&str, &str)> = result
            .cycles
            .iter()
            .flat_map(|cycle| {
                cycle
                    .windows(2)
                    .map(|pair| (pair[0].as_str(), pair[1].as_str()))
            })
            .collect();

        let links: Vec<GraphLink> = report
            .layout
            .segments
            .iter()
            .map(|s| GraphLink {
                source: s.from.clone(),
                target: s.to.clone(),
                is_cycle: cycle_edges.contains(&(s.from.as_str(), s.to.as_str())),
                x1: s.x1,
                y1: s.y1,
                x2: s.x2,
                y2: s.y2,
            })
            .collect();

        let metadata = GraphMetadata {
            total_services: result.metrics.total_nodes,
            total_dependencies: result.metrics.total_edges,
            dangling_dependencies: report.snapshot.dangling_edges().len(),
            hotspot_count: result.hotspots.len(),
            cycle_count: result.cycles.len(),
            complexity_score: result.metrics.complexity_score,
            width: report.layout_config.width,
            height: report.layout_config.height,
        };

        GraphData {
            nodes,
            links,
            metadata,
        }
    }
}
