//! Tree-sitter Utility Functions
//!
//! Common helpers for working with tree-sitter nodes, shared by the parser
//! infrastructure.

use crate::shared::models::Span;
use tree_sitter::Node;

// ═══════════════════════════════════════════════════════════════════════════
// Text Extraction Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Extract text content from a node (empty when the range is not on a char boundary)
#[inline]
pub fn extract_node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

// ═══════════════════════════════════════════════════════════════════════════
// Span Conversion Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Convert tree-sitter node to Span (1-indexed lines)
#[inline]
pub fn node_to_span(node: &Node) -> Span {
    let start_pos = node.start_position();
    let end_pos = node.end_position();

    Span::new(
        start_pos.row as u32 + 1,
        start_pos.column as u32,
        end_pos.row as u32 + 1,
        end_pos.column as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse_python(code: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .unwrap();
        parser.parse(code, None).unwrap()
    }

    #[test]
    fn test_node_to_span_is_one_based() {
        let tree = parse_python("x = 1\ndef f():\n    pass\n");
        let func = tree.root_node().child(1).unwrap();
        let span = node_to_span(&func);
        assert_eq!(span.start_line, 2);
        assert_eq!(span.start_col, 0);
        assert_eq!(span.end_line, 3);
    }

    #[test]
    fn test_extract_node_text() {
        let code = "def hello():\n    pass";
        let tree = parse_python(code);
        let func = tree.root_node().child(0).unwrap();
        let name = func.child_by_field_name("name").unwrap();
        assert_eq!(extract_node_text(&name, code), "hello");
    }
}
