use crate::config::LayoutConfig;
use crate::model::{GraphSnapshot, NodeId};
use serde::Serialize;
use std::f64::consts::TAU;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePosition {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

/// Straight segment between two placed nodes, pointing at the dependency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSegment {
    pub from: NodeId,
    pub to: NodeId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Circle placement of every node, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub positions: Vec<NodePosition>,
    pub segments: Vec<EdgeSegment>,
}

impl Layout {
    /// Node `i` of `n` sits at angle `i / n * 2π` around the configured center.
    pub fn circular(snapshot: &GraphSnapshot, config: &LayoutConfig) -> Self {
        let n = snapshot.nodes().len();

        let positions: Vec<NodePosition> = snapshot
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let theta = (i as f64 / n as f64) * TAU;
                NodePosition {
                    id: node.id.clone(),
                    x: config.center_x + config.radius * theta.cos(),
                    y: config.center_y + config.radius * theta.sin(),
                }
            })
            .collect();

        // Dangling edges have no second endpoint to draw to.
        let segments = snapshot
            .edges()
            .iter()
            .filter_map(|edge| {
                let from = find(&positions, &edge.from)?;
                let to = find(&positions, &edge.to)?;
                Some(EdgeSegment {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    x1: from.x,
                    y1: from.y,
                    x2: to.x,
                    y2: to.y,
                })
            })
            .collect();

        Self {
            positions,
            segments,
        }
    }

    pub fn position(&self, id: &str) -> Option<&NodePosition> {
        find(&self.positions, id)
    }
}

fn find<'a>(positions: &'a [NodePosition], id: &str) -> Option<&'a NodePosition> {
    positions.iter().find(|p| p.id == id)
}
