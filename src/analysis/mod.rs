mod circular;
mod complexity;
mod graph;
mod metrics;
mod topology;

pub use circular::detect_cycles;
pub use complexity::complexity_score;
pub use graph::{Adjacency, build_snapshot};
pub use metrics::{GraphMetrics, NodeDegree};
pub use topology::{detect_hotspots, detect_orphans};

use crate::config::Thresholds;
use crate::model::{AnalysisResult, GraphSnapshot, Service};
use tracing::{debug, warn};

/// Run every diagnostic over a snapshot.
///
/// Pure and synchronous: the same snapshot and thresholds always produce the
/// same result. The per-node degrees are returned alongside for renderers.
pub fn analyze_snapshot(
    snapshot: &GraphSnapshot,
    thresholds: &Thresholds,
) -> (GraphMetrics, AnalysisResult) {
    let metrics = GraphMetrics::compute(snapshot);
    debug!(
        nodes = metrics.total_nodes,
        edges = metrics.total_edges,
        max_degree = metrics.max_degree,
        avg_degree = metrics.avg_degree,
        "computed degree metrics"
    );

    let dangling = snapshot.dangling_edges();
    if !dangling.is_empty() {
        warn!(
            count = dangling.len(),
            "dependencies reference services that are not declared"
        );
    }

    let orphaned_nodes = detect_orphans(snapshot);
    let hotspots = detect_hotspots(&metrics, thresholds);
    let cycles = detect_cycles(snapshot, thresholds.max_cycles);
    debug!(
        orphans = orphaned_nodes.len(),
        hotspots = hotspots.len(),
        cycles = cycles.len(),
        "topology analysis complete"
    );

    let score = complexity_score(
        metrics.total_nodes,
        metrics.total_edges,
        hotspots.len(),
        cycles.len(),
    );

    let result = AnalysisResult {
        metrics: metrics.summary(score),
        orphaned_nodes,
        hotspots,
        cycles,
    };

    (metrics, result)
}

pub fn analyze(services: &[Service], thresholds: &Thresholds) -> AnalysisResult {
    let snapshot = build_snapshot(services);
    analyze_snapshot(&snapshot, thresholds).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metrics;

    fn worked_example() -> Vec<Service> {
        vec![
            Service::new("A").depends_on(["B"]),
            Service::new("B").depends_on(["C"]),
            Service::new("C").depends_on(["A"]),
            Service::new("D"),
        ]
    }

    #[test]
    fn test_worked_example() {
        let result = analyze(&worked_example(), &Thresholds::default());

        assert_eq!(result.metrics.total_nodes, 4);
        assert_eq!(result.metrics.total_edges, 3);
        assert_eq!(result.metrics.max_degree, 2);
        assert!((result.metrics.avg_degree - 1.5).abs() < f64::EPSILON);
        assert_eq!(result.metrics.complexity_score, 18);
        assert!(result.hotspots.is_empty());
        assert_eq!(result.cycles, vec![vec!["A", "B", "C", "A"]]);
        assert_eq!(result.orphaned_nodes, vec!["D"]);
    }

    #[test]
    fn test_zero_services() {
        let result = analyze(&[], &Thresholds::default());

        assert_eq!(result.metrics, Metrics::default());
        assert!(result.orphaned_nodes.is_empty());
        assert!(result.hotspots.is_empty());
        assert!(result.cycles.is_empty());
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let services = worked_example();
        let first = serde_json::to_string(&analyze(&services, &Thresholds::default())).unwrap();
        let second = serde_json::to_string(&analyze(&services, &Thresholds::default())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_serializes_with_camel_case_keys() {
        let result = analyze(&worked_example(), &Thresholds::default());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["metrics"]["totalNodes"], 4);
        assert_eq!(json["metrics"]["avgDegree"], 1.5);
        assert_eq!(json["metrics"]["complexityScore"], 18);
        assert_eq!(json["orphanedNodes"][0], "D");
        assert!(json["hotspots"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_hotspot_serialization() {
        let mut services = vec![Service::new("hub").depends_on(["a", "b", "c"])];
        services.extend(["a", "b", "c", "x", "y", "z", "w", "v"].map(Service::new));
        let result = analyze(&services, &Thresholds::default());
        let json = serde_json::to_value(&result.hotspots).unwrap();

        assert_eq!(json[0]["nodeId"], "hub");
        assert_eq!(json[0]["degree"], 3);
        assert_eq!(json[0]["riskLevel"], "high");
    }
}
