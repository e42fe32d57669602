//! Tree-sitter parser implementation
//!
//! This is where tree-sitter dependency lives.

use tree_sitter::{Node, Parser as TSParser, Tree};

use crate::features::parsing::domain::{ParseError, ParsedTree, SyntaxKind, SyntaxNode};
use crate::features::parsing::ports::Parser;
use crate::shared::models::{CodegraphError, Result};
use crate::shared::utils::tree_sitter::{extract_node_text, node_to_span};

/// Tree-sitter based parser
pub struct TreeSitterParser {
    language: TreeSitterLanguage,
}

/// Supported tree-sitter languages
#[derive(Debug, Clone, Copy)]
pub enum TreeSitterLanguage {
    Python,
}

impl TreeSitterParser {
    /// Create a Python parser
    pub fn python() -> Self {
        Self {
            language: TreeSitterLanguage::Python,
        }
    }

    /// Get the tree-sitter language
    fn get_ts_language(&self) -> tree_sitter::Language {
        match self.language {
            TreeSitterLanguage::Python => tree_sitter_python::language(),
        }
    }

    /// Convert tree-sitter tree to our domain model
    fn convert_tree(&self, tree: &Tree, source: &str, file_path: &str) -> ParsedTree {
        let root_node = tree.root_node();
        let (root, errors) = match self.convert_node(root_node, source) {
            Ok(root) => (root, collect_errors(root_node)),
            Err(too_deep) => (
                SyntaxNode::new(SyntaxKind::Module, node_to_span(&root_node))
                    .with_raw_kind(root_node.kind())
                    .with_byte_range(root_node.byte_range()),
                vec![too_deep],
            ),
        };

        ParsedTree::new(
            root,
            source.to_string(),
            file_path.to_string(),
            self.language_name().to_string(),
        )
        .with_errors(errors)
    }

    /// Convert a tree-sitter node to SyntaxNode
    ///
    /// Iterative, so input nesting never grows the call stack. Trees deeper
    /// than [`MAX_NESTING_DEPTH`] are rejected.
    fn convert_node(
        &self,
        root: Node<'_>,
        source: &str,
    ) -> std::result::Result<SyntaxNode, ParseError> {
        let mut steps = vec![Step::Enter(root, None)];
        let mut open: Vec<SyntaxNode> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(node, field) => {
                    if open.len() >= MAX_NESTING_DEPTH {
                        return Err(located_error("too deeply nested", &node));
                    }
                    let kind = self.map_node_kind(node.kind());
                    let mut shell = SyntaxNode::new(kind, node_to_span(&node))
                        .with_raw_kind(node.kind())
                        .with_field(field)
                        .with_byte_range(node.byte_range());
                    if node.child_count() == 0 {
                        shell = shell.with_text(extract_node_text(&node, source));
                    }
                    shell.children.reserve(node.child_count());
                    open.push(shell);
                    steps.push(Step::Exit);
                    let kept = kept_children(node);
                    steps.extend(
                        kept.into_iter()
                            .rev()
                            .map(|(child, field)| Step::Enter(child, field)),
                    );
                }
                Step::Exit => {
                    let Some(done) = open.pop() else { break };
                    match open.last_mut() {
                        Some(parent) => parent.children.push(done),
                        None => return Ok(done),
                    }
                }
            }
        }
        Err(located_error("invalid syntax", &root))
    }

    /// Map tree-sitter node kind to our SyntaxKind
    fn map_node_kind(&self, ts_kind: &str) -> SyntaxKind {
        match ts_kind {
            // Definitions
            "function_definition" => SyntaxKind::FunctionDef,
            "class_definition" => SyntaxKind::ClassDef,
            "decorated_definition" => SyntaxKind::DecoratedDef,
            "lambda" => SyntaxKind::LambdaDef,

            // Declarations
            "parameter" | "default_parameter" | "typed_parameter" | "typed_default_parameter" => {
                SyntaxKind::ParameterDecl
            }
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                SyntaxKind::ImportDecl
            }

            // Expressions
            "call" => SyntaxKind::CallExpr,
            "identifier" => SyntaxKind::NameExpr,
            "attribute" => SyntaxKind::AttributeExpr,
            "string" | "integer" | "float" | "true" | "false" | "none" => SyntaxKind::LiteralExpr,
            "binary_operator" => SyntaxKind::BinaryExpr,
            "boolean_operator" => SyntaxKind::BooleanExpr,
            "comparison_operator" => SyntaxKind::ComparisonExpr,
            "unary_operator" | "not_operator" => SyntaxKind::UnaryExpr,
            "conditional_expression" => SyntaxKind::ConditionalExpr,

            // Statements
            "expression_statement" => SyntaxKind::ExpressionStmt,
            "assignment" => SyntaxKind::AssignmentStmt,
            "augmented_assignment" => SyntaxKind::AugmentedAssignmentStmt,
            "return_statement" => SyntaxKind::ReturnStmt,
            "if_statement" => SyntaxKind::IfStmt,
            "elif_clause" => SyntaxKind::ElifClause,
            "else_clause" => SyntaxKind::ElseClause,
            "for_statement" => SyntaxKind::ForStmt,
            "while_statement" => SyntaxKind::WhileStmt,
            "try_statement" => SyntaxKind::TryStmt,
            "except_clause" | "except_group_clause" => SyntaxKind::ExceptClause,
            "with_statement" => SyntaxKind::WithStmt,
            "assert_statement" => SyntaxKind::AssertStmt,
            "match_statement" => SyntaxKind::MatchStmt,
            "case_clause" => SyntaxKind::CaseClause,

            // Comprehensions
            "for_in_clause" => SyntaxKind::ComprehensionFor,
            "if_clause" => SyntaxKind::ComprehensionIf,

            // Control flow
            "break_statement" => SyntaxKind::BreakStmt,
            "continue_statement" => SyntaxKind::ContinueStmt,
            "raise_statement" => SyntaxKind::RaiseStmt,
            "yield" => SyntaxKind::YieldExpr,
            "await" => SyntaxKind::AwaitExpr,

            // Other
            "module" => SyntaxKind::Module,
            "block" => SyntaxKind::Block,
            "comment" => SyntaxKind::Comment,
            "decorator" => SyntaxKind::Decorator,
            "type" => SyntaxKind::TypeAnnotation,

            // Unknown
            other => SyntaxKind::Other(other.to_string()),
        }
    }

}

/// Deepest syntax tree accepted from the parser
pub const MAX_NESTING_DEPTH: usize = 500;

enum Step<'t> {
    Enter(Node<'t>, Option<&'static str>),
    Exit,
}

/// Children worth converting, with their grammar field names
fn kept_children(node: Node<'_>) -> Vec<(Node<'_>, Option<&'static str>)> {
    let mut kept = Vec::with_capacity(node.child_count());
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            // Comments are the only extras downstream code cares about
            if !child.is_extra() || child.kind() == "comment" {
                kept.push((child, cursor.field_name()));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    kept
}

fn located_error(message: &str, node: &Node) -> ParseError {
    let span = node_to_span(node);
    ParseError {
        message: format!(
            "{} (line {}, column {})",
            message, span.start_line, span.start_col
        ),
        span,
    }
}

/// Python 2 statements the grammar still accepts
fn is_legacy_statement(node: &Node) -> bool {
    matches!(node.kind(), "print_statement" | "exec_statement")
}

/// `f(x for x in a, b)` and `[x for x in a, b]` parse with a bare comma
/// after the iterable
fn is_unparenthesized_iterable(node: &Node) -> bool {
    if node.kind() != "for_in_clause" {
        return false;
    }
    let mut cursor = node.walk();
    let has_comma = node.children(&mut cursor).any(|c| !c.is_named() && c.kind() == ",");
    has_comma
}

/// Collect parse errors in document order
fn collect_errors(root: Node<'_>) -> Vec<ParseError> {
    let mut errors = Vec::new();
    let mut pending = vec![root];

    while let Some(node) = pending.pop() {
        if node.is_missing() {
            errors.push(located_error(&format!("missing {:?}", node.kind()), &node));
            continue;
        }
        if node.is_error() || is_legacy_statement(&node) || is_unparenthesized_iterable(&node) {
            errors.push(located_error("invalid syntax", &node));
        }

        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        pending.extend(children.into_iter().rev());
    }
    errors
}

impl Parser for TreeSitterParser {
    fn parse(&self, source: &str, file_path: &str) -> Result<ParsedTree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.get_ts_language())
            .map_err(|e| CodegraphError::parse(format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| CodegraphError::parse("Failed to parse source code"))?;

        Ok(self.convert_tree(&tree, source, file_path))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        match self.language {
            TreeSitterLanguage::Python => matches!(ext, "py" | "pyi"),
        }
    }

    fn language_name(&self) -> &'static str {
        match self.language {
            TreeSitterLanguage::Python => "python",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_python_function() {
        let parser = TreeSitterParser::python();
        let source = "def hello():\n    pass";
        let tree = parser.parse(source, "test.py").unwrap();

        assert!(!tree.has_errors);
        assert_eq!(tree.language, "python");
        assert_eq!(tree.root.kind, SyntaxKind::Module);

        let func = &tree.root.children[0];
        assert_eq!(func.kind, SyntaxKind::FunctionDef);
        assert_eq!(func.name(), Some("hello"));
        assert_eq!(func.body().len(), 1);
    }

    #[test]
    fn test_parse_keeps_comments_and_fields() {
        let parser = TreeSitterParser::python();
        let source = "# header\nclass A(Base):\n    x = 1\n";
        let tree = parser.parse(source, "a.py").unwrap();

        assert_eq!(tree.root.children[0].kind, SyntaxKind::Comment);
        let class = &tree.root.children[1];
        assert_eq!(class.kind, SyntaxKind::ClassDef);
        assert_eq!(class.name(), Some("A"));
        assert!(class.child_by_field("superclasses").is_some());
        assert_eq!(tree.text_of(class.child_by_field("name").unwrap()), "A");
    }

    #[test]
    fn test_parse_reports_syntax_error() {
        let parser = TreeSitterParser::python();
        let tree = parser.parse("def broken(:\n    pass\n", "bad.py").unwrap();

        assert!(tree.has_errors);
        let err = tree.first_error().unwrap();
        assert_eq!(err.span.start_line, 1);
    }

    #[test]
    fn test_python2_statements_are_errors() {
        let parser = TreeSitterParser::python();

        let tree = parser.parse("x = 1\nprint \"hello\"\n", "legacy.py").unwrap();
        assert!(tree.has_errors);
        assert_eq!(tree.first_error().unwrap().span.start_line, 2);

        let tree = parser.parse("exec \"code\"\n", "legacy.py").unwrap();
        assert!(tree.has_errors);

        let tree = parser.parse("print(\"hello\")\n", "modern.py").unwrap();
        assert!(!tree.has_errors);
    }

    #[test]
    fn test_bare_comma_after_comprehension_iterable() {
        let parser = TreeSitterParser::python();

        for bad in ["f(x for x in y, 1)\n", "z = [x for x in a, b]\n"] {
            let tree = parser.parse(bad, "bad.py").unwrap();
            assert!(tree.has_errors, "{bad:?} should not parse");
        }
        for good in [
            "f(x for x in y)\n",
            "z = [x for x in (a, b)]\n",
            "z = {k: v for k, v in items}\n",
        ] {
            let tree = parser.parse(good, "good.py").unwrap();
            assert!(!tree.has_errors, "{good:?} should parse");
        }
    }

    #[test]
    fn test_deep_nesting_rejected_without_overflow() {
        let parser = TreeSitterParser::python();
        let source = format!("x = a{}\n", " + a".repeat(5000));
        let tree = parser.parse(&source, "deep.py").unwrap();

        assert!(tree.has_errors);
        assert_eq!(tree.errors.len(), 1);
        assert!(tree.first_error().unwrap().message.starts_with("too deeply nested"));
        assert!(tree.root.children.is_empty());
    }

    #[test]
    fn test_moderate_nesting_accepted() {
        let parser = TreeSitterParser::python();
        let source = format!("x = {}1{}\n", "(".repeat(50), ")".repeat(50));
        let tree = parser.parse(&source, "nested.py").unwrap();

        assert!(!tree.has_errors);
        assert_eq!(tree.root.children.len(), 1);
    }

    #[test]
    fn test_supports_extension() {
        let parser = TreeSitterParser::python();
        assert!(parser.supports_extension("py"));
        assert!(parser.supports_extension("pyi"));
        assert!(!parser.supports_extension("rs"));
    }
}
