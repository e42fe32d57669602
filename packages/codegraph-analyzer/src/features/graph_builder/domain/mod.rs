//! Graph Builder Domain Models
//!
//! Node/edge records, the identity scheme, and the `CodeGraph` container.

mod code_graph;
mod definition_index;
pub mod identity;

use serde::{Deserialize, Serialize};

use crate::shared::models::{NodeId, Span};

pub use code_graph::CodeGraph;
pub use definition_index::DefinitionIndex;

// ============================================================
// Node Kind
// ============================================================

/// Kind tag of a graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Class,
    Method,
    Function,
    Import,
    Error,
    /// Placeholder for a call target that matched no definition
    Reference,
    /// Endpoint created by edge insertion before anything registered it,
    /// named by its full identity
    Unknown,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Class => "class",
            NodeKind::Method => "method",
            NodeKind::Function => "function",
            NodeKind::Import => "import",
            NodeKind::Error => "error",
            NodeKind::Reference => "reference",
            NodeKind::Unknown => "unknown",
        }
    }

    /// Kinds that may be the target of call resolution
    pub fn is_callable(&self) -> bool {
        matches!(self, NodeKind::Method | NodeKind::Function)
    }
}

// ============================================================
// Edge Kind
// ============================================================

/// Kind tag of a graph edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// file→class, file→function, class→method
    Defines,
    /// file→error
    ContainsError,
    /// file→import
    Imports,
    /// caller context→callee
    Calls,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Defines => "defines",
            EdgeKind::ContainsError => "contains_error",
            EdgeKind::Imports => "imports",
            EdgeKind::Calls => "calls",
        }
    }

    /// Structural edges are recorded once per (source, target) pair
    pub fn is_structural(&self) -> bool {
        !matches!(self, EdgeKind::Calls)
    }
}

// ============================================================
// Graph Node / Edge
// ============================================================

/// Node record with optional enrichments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Display name
    pub name: String,
    pub span: Option<Span>,
    pub complexity: Option<u32>,
    pub maintainability: Option<f64>,
    pub documentation: Option<String>,
    pub code_snippet: Option<String>,
}

impl GraphNode {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            span: None,
            complexity: None,
            maintainability: None,
            documentation: None,
            code_snippet: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// Edge record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub kind: EdgeKind,
    pub weight: Option<u32>,
}

impl GraphEdge {
    pub fn new(kind: EdgeKind) -> Self {
        Self { kind, weight: None }
    }
}

// ============================================================
// Call Site
// ============================================================

/// A recorded call awaiting resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Identity of the enclosing context (file, class, function or method)
    pub caller: NodeId,
    /// `name` or `object.name`
    pub callee: String,
    pub span: Span,
}
