//! Degree metrics: in-degree plus out-degree per node, and the aggregate
//! statistics every other stage is measured against.

use crate::model::{GraphSnapshot, Metrics, NodeId};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeDegree {
    pub id: NodeId,
    pub in_degree: usize,
    pub out_degree: usize,
}

impl NodeDegree {
    pub fn degree(&self) -> usize {
        self.in_degree + self.out_degree
    }
}

/// Degree figures for a snapshot, in node input order.
#[derive(Debug, Clone, Default)]
pub struct GraphMetrics {
    pub degrees: Vec<NodeDegree>,
    pub total_nodes: usize,
    pub total_edges: usize,
    pub max_degree: usize,
    pub avg_degree: f64,
}

impl GraphMetrics {
    pub fn compute(snapshot: &GraphSnapshot) -> Self {
        let mut fan_in: HashMap<&str, usize> = HashMap::new();
        let mut fan_out: HashMap<&str, usize> = HashMap::new();

        for edge in snapshot.edges() {
            *fan_out.entry(edge.from.as_str()).or_insert(0) += 1;
            *fan_in.entry(edge.to.as_str()).or_insert(0) += 1;
        }

        let degrees: Vec<NodeDegree> = snapshot
            .nodes()
            .iter()
            .map(|n| NodeDegree {
                id: n.id.clone(),
                in_degree: fan_in.get(n.id.as_str()).copied().unwrap_or(0),
                out_degree: fan_out.get(n.id.as_str()).copied().unwrap_or(0),
            })
            .collect();

        let total_nodes = degrees.len();
        let max_degree = degrees.iter().map(NodeDegree::degree).max().unwrap_or(0);
        let degree_sum: usize = degrees.iter().map(NodeDegree::degree).sum();
        let avg_degree = if total_nodes == 0 {
            0.0
        } else {
            degree_sum as f64 / total_nodes as f64
        };

        Self {
            degrees,
            total_nodes,
            total_edges: snapshot.edges().len(),
            max_degree,
            avg_degree,
        }
    }

    pub fn degree_of(&self, id: &str) -> Option<usize> {
        self.degrees
            .iter()
            .find(|d| d.id == id)
            .map(NodeDegree::degree)
    }

    /// Aggregate metrics with the given complexity score folded in.
    pub fn summary(&self, complexity_score: u64) -> Metrics {
        Metrics {
            total_nodes: self.total_nodes,
            total_edges: self.total_edges,
            max_degree: self.max_degree,
            avg_degree: self.avg_degree,
            complexity_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build_snapshot;
    use crate::model::Service;

    #[test]
    fn test_empty_graph_has_zero_metrics() {
        let metrics = GraphMetrics::compute(&build_snapshot(&[]));

        assert_eq!(metrics.total_nodes, 0);
        assert_eq!(metrics.total_edges, 0);
        assert_eq!(metrics.max_degree, 0);
        assert_eq!(metrics.avg_degree, 0.0);
        assert!(!metrics.avg_degree.is_nan());
    }

    #[test]
    fn test_degree_counts_both_ends() {
        let services = vec![
            Service::new("a").depends_on(["b"]),
            Service::new("b").depends_on(["c"]),
            Service::new("c").depends_on(["a"]),
            Service::new("d"),
        ];
        let metrics = GraphMetrics::compute(&build_snapshot(&services));

        assert_eq!(metrics.degree_of("a"), Some(2));
        assert_eq!(metrics.degree_of("b"), Some(2));
        assert_eq!(metrics.degree_of("c"), Some(2));
        assert_eq!(metrics.degree_of("d"), Some(0));
        assert_eq!(metrics.max_degree, 2);
        assert!((metrics.avg_degree - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dangling_edge_counts_for_source_only() {
        let services = vec![Service::new("a").depends_on(["missing"]), Service::new("b")];
        let metrics = GraphMetrics::compute(&build_snapshot(&services));

        assert_eq!(metrics.total_edges, 1);
        assert_eq!(metrics.degree_of("a"), Some(1));
        assert_eq!(metrics.degree_of("missing"), None);
        assert!((metrics.avg_degree - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parallel_edges_each_count() {
        let services = vec![Service::new("a").depends_on(["b", "b"]), Service::new("b")];
        let metrics = GraphMetrics::compute(&build_snapshot(&services));

        assert_eq!(metrics.degree_of("a"), Some(2));
        assert_eq!(metrics.degree_of("b"), Some(2));
    }
}
