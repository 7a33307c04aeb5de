//! Bounded directed-cycle search.
//!
//! A depth-first traversal from every unvisited node, in input order. When an
//! outgoing edge reaches a node that is still on the current path, the path
//! suffix starting at that node (closed by repeating it) is recorded. The search
//! stops once `max_cycles` cycles are recorded, so which cycles are reported
//! depends on node and edge order. Cycles reachable from several roots are not
//! deduplicated and need not be minimal.

use super::graph::Adjacency;
use crate::model::{GraphSnapshot, NodeId};
use std::collections::HashSet;

/// Traversal state owned by one `detect_cycles` call.
struct Visitor<'a> {
    adjacency: Adjacency<'a>,
    visited: HashSet<&'a str>,
    on_stack: HashSet<&'a str>,
    path: Vec<&'a str>,
    cycles: Vec<Vec<NodeId>>,
    max_cycles: usize,
}

impl<'a> Visitor<'a> {
    fn new(snapshot: &'a GraphSnapshot, max_cycles: usize) -> Self {
        Self {
            adjacency: Adjacency::new(snapshot),
            visited: HashSet::new(),
            on_stack: HashSet::new(),
            path: Vec::new(),
            cycles: Vec::new(),
            max_cycles,
        }
    }

    fn is_full(&self) -> bool {
        self.cycles.len() >= self.max_cycles
    }

    fn visit(&mut self, id: &'a str) {
        self.visited.insert(id);
        self.on_stack.insert(id);
        self.path.push(id);

        // Copy the slice ref out so `self` can be borrowed mutably below.
        let targets: Vec<&'a str> = self.adjacency.targets(id).to_vec();
        for target in targets {
            if self.is_full() {
                break;
            }
            if !self.visited.contains(target) {
                self.visit(target);
            } else if self.on_stack.contains(target) {
                self.record_cycle(target);
            }
        }

        // Only leave the stack once every outgoing edge has been explored.
        self.on_stack.remove(id);
        self.path.pop();
    }

    fn record_cycle(&mut self, target: &str) {
        if let Some(start) = self.path.iter().position(|n| *n == target) {
            let mut cycle: Vec<NodeId> = self.path[start..].iter().map(|n| n.to_string()).collect();
            cycle.push(target.to_string());
            self.cycles.push(cycle);
        }
    }
}

pub fn detect_cycles(snapshot: &GraphSnapshot, max_cycles: usize) -> Vec<Vec<NodeId>> {
    let mut visitor = Visitor::new(snapshot, max_cycles);

    for node in snapshot.nodes() {
        if visitor.is_full() {
            break;
        }
        if !visitor.visited.contains(node.id.as_str()) {
            visitor.visit(node.id.as_str());
        }
    }

    visitor.cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build_snapshot;
    use crate::model::Service;

    fn cycles_of(services: &[Service]) -> Vec<Vec<NodeId>> {
        detect_cycles(&build_snapshot(services), 5)
    }

    #[test]
    fn test_simple_triangle() {
        let cycles = cycles_of(&[
            Service::new("A").depends_on(["B"]),
            Service::new("B").depends_on(["C"]),
            Service::new("C").depends_on(["A"]),
            Service::new("D"),
        ]);

        assert_eq!(cycles, vec![vec!["A", "B", "C", "A"]]);
    }

    #[test]
    fn test_acyclic_graph() {
        let cycles = cycles_of(&[
            Service::new("a").depends_on(["b", "c"]),
            Service::new("b").depends_on(["c"]),
            Service::new("c"),
        ]);
        assert!(cycles.is_empty());
    }

    #[test]
    fn test_self_loop() {
        let cycles = cycles_of(&[Service::new("a").depends_on(["a"])]);
        assert_eq!(cycles, vec![vec!["a", "a"]]);
    }

    #[test]
    fn test_suffix_starts_at_reentered_node() {
        // root -> x -> y -> z -> x: the cycle excludes the root prefix.
        let cycles = cycles_of(&[
            Service::new("root").depends_on(["x"]),
            Service::new("x").depends_on(["y"]),
            Service::new("y").depends_on(["z"]),
            Service::new("z").depends_on(["x"]),
        ]);
        assert_eq!(cycles, vec![vec!["x", "y", "z", "x"]]);
    }

    #[test]
    fn test_no_false_cycle_across_branches() {
        // Diamond: a -> b -> d, a -> c -> d. d is reached twice but never
        // while it is still on the path, so there is no cycle.
        let cycles = cycles_of(&[
            Service::new("a").depends_on(["b", "c"]),
            Service::new("b").depends_on(["d"]),
            Service::new("c").depends_on(["d"]),
            Service::new("d"),
        ]);
        assert!(cycles.is_empty());
    }

    #[test]
    fn test_dangling_targets_are_harmless() {
        let cycles = cycles_of(&[
            Service::new("a").depends_on(["ghost", "b"]),
            Service::new("b").depends_on(["a", "ghost"]),
        ]);
        assert_eq!(cycles, vec![vec!["a", "b", "a"]]);
    }

    #[test]
    fn test_cycle_count_is_capped() {
        let mut services = Vec::new();
        for i in 0..7 {
            let left = format!("l{}", i);
            let right = format!("r{}", i);
            services.push(Service::new(left.clone()).depends_on([right.clone()]));
            services.push(Service::new(right).depends_on([left]));
        }

        let cycles = cycles_of(&services);
        assert_eq!(cycles.len(), 5);
        assert_eq!(cycles[0], vec!["l0", "r0", "l0"]);
        assert_eq!(cycles[4], vec!["l4", "r4", "l4"]);

        let uncapped = detect_cycles(&build_snapshot(&services), 10);
        assert_eq!(uncapped.len(), 7);
    }

    #[test]
    fn test_zero_cap_reports_nothing() {
        let services = [Service::new("a").depends_on(["a"])];
        assert!(detect_cycles(&build_snapshot(&services), 0).is_empty());
    }

    #[test]
    fn test_every_reported_cycle_is_closed_and_follows_edges() {
        let services = [
            Service::new("a").depends_on(["b"]),
            Service::new("b").depends_on(["c", "a"]),
            Service::new("c").depends_on(["a", "b"]),
        ];
        let snapshot = build_snapshot(&services);
        let edges: HashSet<(&str, &str)> = snapshot
            .edges()
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();

        let cycles = detect_cycles(&snapshot, 5);
        assert!(!cycles.is_empty());
        for cycle in &cycles {
            assert_eq!(cycle.first(), cycle.last());
            for pair in cycle.windows(2) {
                assert!(edges.contains(&(pair[0].as_str(), pair[1].as_str())));
            }
        }
    }

    #[test]
    fn test_agrees_with_strongly_connected_components() {
        use petgraph::algo::tarjan_scc;
        use petgraph::graph::DiGraph;

        let services = [
            Service::new("a").depends_on(["b"]),
            Service::new("b").depends_on(["c"]),
            Service::new("c"),
            Service::new("d").depends_on(["e"]),
            Service::new("e").depends_on(["d"]),
        ];

        let mut graph = DiGraph::<&str, ()>::new();
        let idx: Vec<_> = services.iter().map(|s| graph.add_node(s.id.as_str())).collect();
        for (i, s) in services.iter().enumerate() {
            for dep in &s.depends_on {
                if let Some(j) = services.iter().position(|t| &t.id == dep) {
                    graph.add_edge(idx[i], idx[j], ());
                }
            }
        }
        let cyclic_components = tarjan_scc(&graph).into_iter().filter(|c| c.len() > 1).count();

        let cycles = cycles_of(&services);
        assert_eq!(cyclic_components, 1);
        assert_eq!(cycles, vec![vec!["d", "e", "d"]]);
    }
}
