//! Custom assertions for graph verification

use codegraph_analyzer::{CodeGraph, EdgeKind, NodeKind};

/// Assert that the graph holds a node of the given kind
pub fn assert_node(graph: &CodeGraph, id: &str, kind: NodeKind) {
    let node = graph
        .node(id)
        .unwrap_or_else(|| panic!("Expected node {id}, graph has: {:?}", node_ids(graph)));
    assert_eq!(node.kind, kind, "Node {id} has kind {:?}", node.kind);
}

/// Assert the exact number of `source → target` edges of a kind
pub fn assert_edge_count(graph: &CodeGraph, source: &str, target: &str, kind: EdgeKind, expected: usize) {
    let actual = graph.count_edges(source, target, kind);
    assert_eq!(
        actual,
        expected,
        "Expected {expected} {} edge(s) {source} -> {target}, got {actual}",
        kind.as_str()
    );
}

/// Number of nodes of one kind
pub fn count_kind(graph: &CodeGraph, kind: NodeKind) -> usize {
    graph.nodes_of_kind(kind).count()
}

pub fn node_ids(graph: &CodeGraph) -> Vec<String> {
    graph.nodes().map(|n| n.id.clone()).collect()
}

/// Order-independent node and edge sets of a graph
pub fn graph_signature(graph: &CodeGraph) -> (Vec<(String, NodeKind)>, Vec<(String, String, EdgeKind)>) {
    let mut nodes: Vec<_> = graph.nodes().map(|n| (n.id.clone(), n.kind)).collect();
    nodes.sort();
    let mut edges: Vec<_> = graph
        .edges()
        .map(|(s, t, e)| (s.to_string(), t.to_string(), e.kind))
        .collect();
    edges.sort();
    (nodes, edges)
}
