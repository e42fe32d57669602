//! Halstead software science metrics
//!
//! Operators and operands are taken from operator expressions only:
//! binary, boolean, comparison, unary and augmented assignment. Operands are
//! the expressions on either side, compared by source text.

use std::collections::HashSet;

use crate::features::parsing::domain::{ParsedTree, SyntaxKind, SyntaxNode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalsteadMetrics {
    /// Number of distinct operators (n1)
    pub distinct_operators: u32,
    /// Number of distinct operands (n2)
    pub distinct_operands: u32,
    /// Total number of operators (N1)
    pub total_operators: u32,
    /// Total number of operands (N2)
    pub total_operands: u32,
    /// Vocabulary: n = n1 + n2
    pub vocabulary: u32,
    /// Program length: N = N1 + N2
    pub length: u32,
    /// Volume: V = N * log2(n)
    pub volume: f64,
    /// Difficulty: D = (n1/2) * (N2/n2)
    pub difficulty: f64,
    /// Effort: E = D * V
    pub effort: f64,
}

impl HalsteadMetrics {
    /// Derive the composite measures from the four base counts
    pub fn from_counts(n1: u32, n2: u32, total_n1: u32, total_n2: u32) -> Self {
        let vocabulary = n1 + n2;
        let length = total_n1 + total_n2;

        let volume = if vocabulary > 0 {
            f64::from(length) * f64::from(vocabulary).log2()
        } else {
            0.0
        };

        let difficulty = if n2 > 0 {
            (f64::from(n1) / 2.0) * (f64::from(total_n2) / f64::from(n2))
        } else {
            0.0
        };

        Self {
            distinct_operators: n1,
            distinct_operands: n2,
            total_operators: total_n1,
            total_operands: total_n2,
            vocabulary,
            length,
            volume,
            difficulty,
            effort: difficulty * volume,
        }
    }
}

/// Operator/operand tally over one syntax tree
#[derive(Debug, Default)]
struct HalsteadCollector<'a> {
    operators: HashSet<&'a str>,
    operands: HashSet<&'a str>,
    total_operators: u32,
    total_operands: u32,
}

impl<'a> HalsteadCollector<'a> {
    fn visit(&mut self, node: &'a SyntaxNode, tree: &'a ParsedTree) {
        if is_operator_expression(&node.kind) {
            for child in &node.children {
                if child.kind == SyntaxKind::Comment {
                    continue;
                }
                let text = tree.text_of(child);
                if is_operator(child) {
                    self.operators.insert(text);
                    self.total_operators += 1;
                } else {
                    self.operands.insert(text);
                    self.total_operands += 1;
                }
            }
        }

        for child in &node.children {
            self.visit(child, tree);
        }
    }

    fn finish(self) -> HalsteadMetrics {
        HalsteadMetrics::from_counts(
            self.operators.len() as u32,
            self.operands.len() as u32,
            self.total_operators,
            self.total_operands,
        )
    }
}

fn is_operator_expression(kind: &SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::BinaryExpr
            | SyntaxKind::BooleanExpr
            | SyntaxKind::ComparisonExpr
            | SyntaxKind::UnaryExpr
            | SyntaxKind::AugmentedAssignmentStmt
    )
}

/// Operator slot of an operator expression: the `operator(s)` field, or an
/// anonymous keyword token such as the `not` of `not x`
fn is_operator(child: &SyntaxNode) -> bool {
    match child.field {
        Some("operator") | Some("operators") => true,
        Some(_) => false,
        None => child.children.is_empty() && child.raw_kind() == child.text(),
    }
}

/// Halstead metrics of a whole module
pub fn analyze_tree(tree: &ParsedTree) -> HalsteadMetrics {
    let mut collector = HalsteadCollector::default();
    collector.visit(&tree.root, tree);
    collector.finish()
}
