//! Flat node/link export for force-directed graph renderers
//!
//! Absent enrichments are written as zero/empty values so every exported
//! node has the same shape.

use serde::{Deserialize, Serialize};

use crate::features::graph_builder::domain::{CodeGraph, GraphNode};

/// `{ "nodes": [...], "links": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub links: Vec<ExportLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub complexity: u32,
    #[serde(default)]
    pub maintainability: f64,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub code_snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLink {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl From<&GraphNode> for ExportNode {
    fn from(node: &GraphNode) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind.as_str().to_string(),
            name: node.name.clone(),
            complexity: node.complexity.unwrap_or(0),
            maintainability: node.maintainability.unwrap_or(0.0),
            documentation: node.documentation.clone().unwrap_or_default(),
            code_snippet: node.code_snippet.clone().unwrap_or_default(),
        }
    }
}

impl CodeGraph {
    /// Convert to the flat node/link representation
    pub fn to_d3(&self) -> GraphExport {
        GraphExport {
            nodes: self.nodes().map(ExportNode::from).collect(),
            links: self
                .edges()
                .map(|(source, target, edge)| ExportLink {
                    source: source.to_string(),
                    target: target.to_string(),
                    kind: edge.kind.as_str().to_string(),
                    weight: edge.weight.unwrap_or_else(default_weight),
                })
                .collect(),
        }
    }
}
