//! Node enrichment
//!
//! Fills the optional node attributes: documentation, code snippet,
//! complexity and maintainability.

use crate::config::AnalyzerConfig;
use crate::features::graph_builder::domain::{CodeGraph, EdgeKind, GraphNode, NodeKind};
use crate::features::metrics::domain::FileMetrics;
use crate::features::metrics::infrastructure::function_complexity;
use crate::features::parsing::domain::{ParsedTree, SyntaxNode};
use crate::shared::utils::text::{clean_docstring, truncate_lines};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeEnricher {
    /// 0 disables snippets
    snippet_max_lines: usize,
}

impl NodeEnricher {
    pub fn new(snippet_max_lines: usize) -> Self {
        Self { snippet_max_lines }
    }

    /// `None` when enrichment is switched off
    pub fn from_config(config: &AnalyzerConfig) -> Option<Self> {
        config
            .enrich_nodes
            .then(|| Self::new(config.snippet_max_lines))
    }

    /// Docstring, snippet and (for callables) complexity of a definition
    pub fn describe_definition(&self, node: &mut GraphNode, def: &SyntaxNode, tree: &ParsedTree) {
        node.documentation = docstring(def.body(), tree);
        node.code_snippet = self.snippet(tree.text_of(def));
        if node.kind.is_callable() {
            node.complexity = Some(function_complexity(def));
        }
    }

    /// Module docstring of a file node
    pub fn describe_module(&self, node: &mut GraphNode, tree: &ParsedTree) {
        node.documentation = docstring(&tree.root.children, tree);
    }

    /// Copy file-level metrics onto the file node; classes get the sum of
    /// their methods' complexity
    pub fn apply_file_metrics(&self, graph: &mut CodeGraph, path: &str, metrics: &FileMetrics) {
        if let Some(file) = graph.node_mut(path) {
            file.complexity = Some(metrics.complexity);
            file.maintainability = Some(metrics.maintainability);
        }

        let class_totals: Vec<(String, u32)> = graph
            .targets(path, EdgeKind::Defines)
            .into_iter()
            .filter(|id| graph.node(id).is_some_and(|n| n.kind == NodeKind::Class))
            .map(|class_id| {
                let total = graph
                    .targets(class_id, EdgeKind::Defines)
                    .into_iter()
                    .filter_map(|method| graph.node(method).and_then(|n| n.complexity))
                    .sum();
                (class_id.to_string(), total)
            })
            .collect();

        for (class_id, total) in class_totals {
            if let Some(class) = graph.node_mut(&class_id) {
                class.complexity = Some(total);
            }
        }
    }

    fn snippet(&self, text: &str) -> Option<String> {
        if self.snippet_max_lines == 0 || text.is_empty() {
            return None;
        }
        Some(truncate_lines(text, self.snippet_max_lines))
    }
}

fn docstring(statements: &[SyntaxNode], tree: &ParsedTree) -> Option<String> {
    SyntaxNode::docstring_literal(statements)
        .map(|literal| clean_docstring(tree.text_of(literal)))
        .filter(|doc| !doc.is_empty())
}
