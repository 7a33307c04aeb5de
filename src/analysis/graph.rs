use crate::model::{Edge, GraphSnapshot, Node, Service};
use std::collections::HashMap;

/// Build a fresh snapshot from an ordered service list.
///
/// One node per service and one edge per `depends_on` entry, emitted even
/// when the dependency id matches no service.
pub fn build_snapshot(services: &[Service]) -> GraphSnapshot {
    let nodes = services
        .iter()
        .map(|s| Node {
            id: s.id.clone(),
            name: s.name.clone(),
            category: s.category.clone(),
        })
        .collect();

    let edges = services
        .iter()
        .flat_map(|s| {
            s.depends_on.iter().map(|dep| Edge {
                from: s.id.clone(),
                to: dep.clone(),
            })
        })
        .collect();

    GraphSnapshot::new(nodes, edges)
}

/// Outgoing adjacency over a snapshot, keeping edge order and duplicates.
pub struct Adjacency<'a> {
    outgoing: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Adjacency<'a> {
    pub fn new(snapshot: &'a GraphSnapshot) -> Self {
        let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
        for edge in snapshot.edges() {
            outgoing
                .entry(edge.from.as_str())
                .or_default()
                .push(edge.to.as_str());
        }
        Self { outgoing }
    }

    pub fn targets(&self, id: &str) -> &[&'a str] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_node_per_service_one_edge_per_dependency() {
        let services = vec![
            Service::new("a").depends_on(["b", "c"]),
            Service::new("b").depends_on(["c"]),
            Service::new("c"),
        ];
        let snapshot = build_snapshot(&services);

        assert_eq!(snapshot.nodes().len(), 3);
        assert_eq!(snapshot.edges().len(), 3);
        assert_eq!(
            snapshot.edges()[0],
            Edge {
                from: "a".into(),
                to: "b".into()
            }
        );
    }

    #[test]
    fn test_dangling_and_duplicate_edges_are_kept() {
        let services = vec![Service::new("a").depends_on(["ghost", "b", "b"]), Service::new("b")];
        let snapshot = build_snapshot(&services);

        assert_eq!(snapshot.nodes().len(), 2);
        assert_eq!(snapshot.edges().len(), 3);
        assert!(!snapshot.nodes().iter().any(|n| n.id == "ghost"));

        let dangling = snapshot.dangling_edges();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].to, "ghost");
    }

    #[test]
    fn test_adjacency_preserves_edge_order() {
        let services = vec![Service::new("a").depends_on(["c", "b", "c"])];
        let snapshot = build_snapshot(&services);
        let adjacency = Adjacency::new(&snapshot);

        assert_eq!(adjacency.targets("a"), &["c", "b", "c"]);
        assert!(adjacency.targets("b").is_empty());
    }
}
