use crate::model::GraphSnapshot;
use petgraph::dot::{Config as DotConfig, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct DotNode {
    label: String,
    declared: bool,
}

/// Graphviz rendering of the snapshot. Undeclared dependency targets appear as
/// dashed placeholder nodes so dangling edges stay visible.
pub fn to_dot(snapshot: &GraphSnapshot) -> String {
    let mut graph: DiGraph<DotNode, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for node in snapshot.nodes() {
        let idx = graph.add_node(DotNode {
            label: node.name.clone(),
            declared: true,
        });
        indices.entry(node.id.as_str()).or_insert(idx);
    }

    for edge in snapshot.edges() {
        let from = node_index(&mut graph, &mut indices, &edge.from);
        let to = node_index(&mut graph, &mut indices, &edge.to);
        graph.add_edge(from, to, ());
    }

    let dot = Dot::with_attr_getters(
        &graph,
        &[DotConfig::EdgeNoLabel, DotConfig::NodeNoLabel],
        &|_, _| String::new(),
        &|_, (_, node)| {
            let label = node.label.replace('\\', "\\\\").replace('"', "\\\"");
            if node.declared {
                format!("label = \"{}\" shape = box", label)
            } else {
                format!("label = \"{}\" shape = box style = dashed", label)
            }
        },
    );

    format!("{:?}", dot)
}

fn node_index<'a>(
    graph: &mut DiGraph<DotNode, ()>,
    indices: &mut HashMap<&'a str, NodeIndex>,
    id: &'a str,
) -> NodeIndex {
    *indices.entry(id).or_insert_with(|| {
        graph.add_node(DotNode {
            label: id.to_string(),
            declared: false,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build_snapshot;
    use crate::model::Service;

    #[test]
    fn test_dot_contains_nodes_and_edges() {
        let services = [
            Service::new("a").with_name("Alpha").depends_on(["b", "ghost"]),
            Service::new("b"),
        ];
        let dot = to_dot(&build_snapshot(&services));

        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("label = \"Alpha\""));
        assert!(dot.contains("label = \"ghost\" shape = box style = dashed"));
        assert_eq!(dot.matches("->").count(), 2);
    }
}
