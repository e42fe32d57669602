//! Parsed tree representation
//!
//! Abstracts the parsed AST for downstream processing.

use super::syntax_node::SyntaxNode;
use crate::shared::models::Span;

/// Parsed syntax tree
#[derive(Debug, Clone)]
pub struct ParsedTree {
    /// Root node of the tree
    pub root: SyntaxNode,

    /// Source code
    pub source: String,

    /// File path (for error messages)
    pub file_path: String,

    /// Language
    pub language: String,

    /// Whether parsing had errors
    pub has_errors: bool,

    /// Parse errors, in document order
    pub errors: Vec<ParseError>,
}

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParsedTree {
    pub fn new(root: SyntaxNode, source: String, file_path: String, language: String) -> Self {
        Self {
            root,
            source,
            file_path,
            language,
            has_errors: false,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<ParseError>) -> Self {
        self.has_errors = !errors.is_empty();
        self.errors = errors;
        self
    }

    /// Source text covered by a node
    pub fn text_of(&self, node: &SyntaxNode) -> &str {
        self.source.get(node.byte_range.clone()).unwrap_or("")
    }

    /// First syntax error, if any
    pub fn first_error(&self) -> Option<&ParseError> {
        self.errors.first()
    }
}
