//! Language-neutral syntax node representation
//!
//! Abstracts tree-sitter nodes for use in domain logic.

use std::ops::Range;

use crate::shared::models::Span;

/// Syntax node kind (language-neutral)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxKind {
    // Definitions
    FunctionDef,
    ClassDef,
    DecoratedDef,
    LambdaDef,

    // Declarations
    ParameterDecl,
    ImportDecl,

    // Expressions
    CallExpr,
    NameExpr,
    AttributeExpr,
    LiteralExpr,
    BinaryExpr,
    BooleanExpr,
    ComparisonExpr,
    UnaryExpr,
    ConditionalExpr,

    // Statements
    ExpressionStmt,
    AssignmentStmt,
    AugmentedAssignmentStmt,
    ReturnStmt,
    IfStmt,
    ElifClause,
    ElseClause,
    ForStmt,
    WhileStmt,
    TryStmt,
    ExceptClause,
    WithStmt,
    AssertStmt,
    MatchStmt,
    CaseClause,

    // Comprehensions
    ComprehensionFor,
    ComprehensionIf,

    // Control flow
    BreakStmt,
    ContinueStmt,
    RaiseStmt,
    YieldExpr,
    AwaitExpr,

    // Other
    Module,
    Block,
    Comment,
    Decorator,
    TypeAnnotation,

    // Unknown/Other
    Other(String),
}

impl SyntaxKind {
    /// Nodes that open a new branch for cyclomatic complexity
    pub fn is_decision_point(&self) -> bool {
        matches!(
            self,
            SyntaxKind::IfStmt
                | SyntaxKind::ElifClause
                | SyntaxKind::ConditionalExpr
                | SyntaxKind::ForStmt
                | SyntaxKind::WhileStmt
                | SyntaxKind::ExceptClause
                | SyntaxKind::WithStmt
                | SyntaxKind::AssertStmt
                | SyntaxKind::BooleanExpr
                | SyntaxKind::ComprehensionFor
                | SyntaxKind::ComprehensionIf
                | SyntaxKind::CaseClause
        )
    }
}

/// Language-neutral syntax node
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub span: Span,
    pub byte_range: Range<usize>,
    /// Leaf text (None for interior nodes)
    pub text: Option<String>,
    /// Grammar field this node occupies in its parent (`name`, `body`, ...)
    pub field: Option<&'static str>,
    pub children: Vec<SyntaxNode>,

    /// Original tree-sitter kind
    pub raw_kind: Option<String>,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind, span: Span) -> Self {
        Self {
            kind,
            span,
            byte_range: 0..0,
            text: None,
            field: None,
            children: Vec::new(),
            raw_kind: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_raw_kind(mut self, raw_kind: impl Into<String>) -> Self {
        self.raw_kind = Some(raw_kind.into());
        self
    }

    pub fn with_field(mut self, field: Option<&'static str>) -> Self {
        self.field = field;
        self
    }

    pub fn with_byte_range(mut self, range: Range<usize>) -> Self {
        self.byte_range = range;
        self
    }

    /// First child stored under the given grammar field
    pub fn child_by_field(&self, field: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.field == Some(field))
    }

    /// All children stored under the given grammar field
    pub fn children_by_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a SyntaxNode> {
        self.children.iter().filter(move |c| c.field == Some(field))
    }

    /// Get text content
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn raw_kind(&self) -> &str {
        self.raw_kind.as_deref().unwrap_or("")
    }

    /// Identifier stored in the `name` field (classes and functions)
    pub fn name(&self) -> Option<&str> {
        self.child_by_field("name")
            .map(|n| n.text())
            .filter(|n| !n.is_empty())
    }

    /// Strip a `decorated_definition` wrapper down to the definition itself
    pub fn unwrap_decorated(&self) -> &SyntaxNode {
        if self.kind == SyntaxKind::DecoratedDef {
            if let Some(def) = self.child_by_field("definition") {
                return def;
            }
        }
        self
    }

    /// Statements of the `body` block (empty for nodes without a body)
    pub fn body(&self) -> &[SyntaxNode] {
        self.child_by_field("body")
            .map(|b| b.children.as_slice())
            .unwrap_or(&[])
    }

    /// The string literal of a bare string statement (docstring position)
    pub fn string_statement(&self) -> Option<&SyntaxNode> {
        if self.kind != SyntaxKind::ExpressionStmt || self.children.len() != 1 {
            return None;
        }
        self.children
            .first()
            .filter(|c| c.kind == SyntaxKind::LiteralExpr && c.raw_kind() == "string")
    }

    /// Docstring literal of a module or definition body: the first
    /// non-comment statement, when it is a bare string
    pub fn docstring_literal(statements: &[SyntaxNode]) -> Option<&SyntaxNode> {
        statements
            .iter()
            .find(|s| s.kind != SyntaxKind::Comment)
            .and_then(SyntaxNode::string_statement)
    }

    /// Pre-order iterator over this node and all descendants
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Depth-first, parent-before-children traversal
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: SyntaxKind, field: Option<&'static str>, text: &str) -> SyntaxNode {
        SyntaxNode::new(kind, Span::zero())
            .with_field(field)
            .with_text(text)
    }

    #[test]
    fn test_decision_points() {
        assert!(SyntaxKind::IfStmt.is_decision_point());
        assert!(SyntaxKind::BooleanExpr.is_decision_point());
        assert!(!SyntaxKind::ElseClause.is_decision_point());
        assert!(!SyntaxKind::TryStmt.is_decision_point());
    }

    #[test]
    fn test_name_and_field_lookup() {
        let func = SyntaxNode::new(SyntaxKind::FunctionDef, Span::zero()).with_children(vec![
            leaf(SyntaxKind::Other("def".into()), None, "def"),
            leaf(SyntaxKind::NameExpr, Some("name"), "run"),
        ]);
        assert_eq!(func.name(), Some("run"));
        assert!(func.child_by_field("body").is_none());
        assert!(func.body().is_empty());
    }

    #[test]
    fn test_descendants_pre_order() {
        let tree = SyntaxNode::new(SyntaxKind::Module, Span::zero()).with_children(vec![
            SyntaxNode::new(SyntaxKind::ClassDef, Span::zero())
                .with_children(vec![leaf(SyntaxKind::NameExpr, Some("name"), "A")]),
            leaf(SyntaxKind::Comment, None, "# c"),
        ]);
        let kinds: Vec<_> = tree.descendants().map(|n| n.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::Module,
                SyntaxKind::ClassDef,
                SyntaxKind::NameExpr,
                SyntaxKind::Comment
            ]
        );
    }
}
