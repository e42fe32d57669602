//! Code graph with petgraph
//!
//! Directed graph keyed by identity string. Node insertion is an idempotent
//! upsert; edge insertion lazily creates missing endpoints.

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use super::{EdgeKind, GraphEdge, GraphNode, NodeKind};

/// Dependency/call graph of one analysis batch
#[derive(Debug, Clone, Default)]
pub struct CodeGraph {
    graph: DiGraph<GraphNode, GraphEdge>,

    /// Identity → node index mapping
    id_to_node: HashMap<String, NodeIndex>,
}

impl CodeGraph {
    /// Create empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless its identity already exists.
    ///
    /// An existing `Unknown` placeholder is upgraded to the inserted record;
    /// any other existing record is left untouched.
    pub fn upsert_node(&mut self, node: GraphNode) -> NodeIndex {
        if let Some(&idx) = self.id_to_node.get(&node.id) {
            if self.graph[idx].kind == NodeKind::Unknown && node.kind != NodeKind::Unknown {
                self.graph[idx] = node;
            }
            return idx;
        }

        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.id_to_node.insert(id, idx);
        idx
    }

    /// Index of `id`, creating an `Unknown` node when absent
    pub fn ensure_node(&mut self, id: &str) -> NodeIndex {
        match self.id_to_node.get(id) {
            Some(&idx) => idx,
            None => self.upsert_node(GraphNode::new(id, NodeKind::Unknown, id)),
        }
    }

    /// Add an edge. Structural kinds are de-duplicated per (source, target);
    /// `calls` edges always append.
    ///
    /// Returns `None` when a structural edge already existed.
    pub fn add_edge(&mut self, source: &str, target: &str, kind: EdgeKind) -> Option<EdgeIndex> {
        let from = self.ensure_node(source);
        let to = self.ensure_node(target);

        if kind.is_structural()
            && self
                .graph
                .edges_connecting(from, to)
                .any(|e| e.weight().kind == kind)
        {
            return None;
        }

        Some(self.graph.add_edge(from, to, GraphEdge::new(kind)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_node.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.id_to_node.get(id).map(|&idx| &self.graph[idx])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        match self.id_to_node.get(id) {
            Some(&idx) => Some(&mut self.graph[idx]),
            None => None,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Nodes of one kind, in insertion order
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights().filter(move |n| n.kind == kind)
    }

    /// Edges as (source id, target id, edge) in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &GraphEdge)> {
        self.graph.edge_references().map(move |e| {
            (
                self.graph[e.source()].id.as_str(),
                self.graph[e.target()].id.as_str(),
                e.weight(),
            )
        })
    }

    /// Edges of one kind
    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = (&str, &str)> {
        self.edges()
            .filter(move |(_, _, e)| e.kind == kind)
            .map(|(s, t, _)| (s, t))
    }

    /// Number of edges `source → target` of the given kind
    pub fn count_edges(&self, source: &str, target: &str, kind: EdgeKind) -> usize {
        match (self.id_to_node.get(source), self.id_to_node.get(target)) {
            (Some(&from), Some(&to)) => self
                .graph
                .edges_connecting(from, to)
                .filter(|e| e.weight().kind == kind)
                .count(),
            _ => 0,
        }
    }

    /// Identities this node points to with edges of `kind`
    pub fn targets(&self, source: &str, kind: EdgeKind) -> Vec<&str> {
        self.neighbors(source, kind, Direction::Outgoing)
    }

    /// Identities pointing at this node with edges of `kind`
    pub fn sources(&self, target: &str, kind: EdgeKind) -> Vec<&str> {
        self.neighbors(target, kind, Direction::Incoming)
    }

    fn neighbors(&self, id: &str, kind: EdgeKind, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.id_to_node.get(id) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, direction)
            .filter(|e| e.weight().kind == kind)
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                self.graph[other].id.as_str()
            })
            .collect()
    }
}
