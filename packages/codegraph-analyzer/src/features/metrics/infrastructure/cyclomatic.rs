//! Cyclomatic complexity
//!
//! CC = 1 + decision points. Decision points:
//! - `if`, `elif`, conditional expressions
//! - `for` / `while` (one more when they carry an `else`)
//! - each `except` clause, and `try` with an `else`
//! - `with`, `assert`, each `case`
//! - each `and` / `or` operator
//! - each comprehension `for` / `if` clause
//!
//! Lambdas count toward their enclosing function. Nested functions and
//! classes add nothing to it: a nested class is measured on its own, a
//! nested function is not listed at all.

use crate::features::metrics::domain::FunctionMetric;
use crate::features::parsing::domain::{SyntaxKind, SyntaxNode};

/// Decision points contributed by this node alone (not its descendants)
pub fn decision_weight(node: &SyntaxNode) -> u32 {
    let has_else = || node.children.iter().any(|c| c.kind == SyntaxKind::ElseClause);

    match node.kind {
        SyntaxKind::ForStmt | SyntaxKind::WhileStmt => 1 + u32::from(has_else()),
        SyntaxKind::TryStmt => u32::from(has_else()),
        ref kind if kind.is_decision_point() => 1,
        _ => 0,
    }
}

/// Decision points in the subtree below `node`, stopping at nested
/// definitions
fn nested_decisions(node: &SyntaxNode) -> u32 {
    node.children
        .iter()
        .filter(|c| !is_nested_definition(c))
        .map(|c| decision_weight(c) + nested_decisions(c))
        .sum()
}

fn is_nested_definition(node: &SyntaxNode) -> bool {
    matches!(
        node.kind,
        SyntaxKind::ClassDef | SyntaxKind::FunctionDef | SyntaxKind::DecoratedDef
    )
}

/// Complexity of one function definition (body only)
pub fn function_complexity(def: &SyntaxNode) -> u32 {
    1 + def.child_by_field("body").map_or(0, nested_decisions)
}

/// Per-function complexities of a module plus the decision points that sit
/// outside any function
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexityReport {
    /// Module-level functions and methods, by line
    pub functions: Vec<FunctionMetric>,
    /// Decision points at module or class-body level
    pub module_decisions: u32,
}

impl ComplexityReport {
    /// Sum over `functions`
    pub fn total(&self) -> u32 {
        self.functions.iter().map(|f| f.complexity).sum()
    }
}

/// Measure every listed function of a module.
///
/// A function is listed, under its bare name, when its nearest enclosing
/// definition is the module or a class.
pub fn analyze_module(root: &SyntaxNode) -> ComplexityReport {
    let mut report = ComplexityReport::default();
    walk(root, &mut report);
    report.functions.sort_by_key(|f| f.line);
    report
}

fn walk(node: &SyntaxNode, report: &mut ComplexityReport) {
    for child in &node.children {
        match child.kind {
            SyntaxKind::FunctionDef => {
                if let Some(name) = child.name() {
                    report.functions.push(FunctionMetric {
                        name: name.to_string(),
                        complexity: function_complexity(child),
                        line: child.span.start_line,
                    });
                }
                walk_classes_in(child, report);
            }
            SyntaxKind::ClassDef => walk(child, report),
            _ => {
                report.module_decisions += decision_weight(child);
                walk(child, report);
            }
        }
    }
}

/// Classes declared inside a function are measured on their own
fn walk_classes_in(node: &SyntaxNode, report: &mut ComplexityReport) {
    for child in &node.children {
        if child.kind == SyntaxKind::ClassDef {
            walk(child, report);
        } else {
            walk_classes_in(child, report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::{Parser, TreeSitterParser};

    fn report(source: &str) -> ComplexityReport {
        let tree = TreeSitterParser::python().parse(source, "t.py").unwrap();
        assert!(!tree.has_errors);
        analyze_module(&tree.root)
    }

    fn entries(report: &ComplexityReport) -> Vec<(&str, u32, u32)> {
        report
            .functions
            .iter()
            .map(|f| (f.name.as_str(), f.complexity, f.line))
            .collect()
    }

    #[test]
    fn test_straight_line_function() {
        let r = report("def f():\n    return 1\n");
        assert_eq!(entries(&r), vec![("f", 1, 1)]);
        assert_eq!(r.total(), 1);
    }

    #[test]
    fn test_branches_and_loops() {
        let source = "\
def f(x, items):
    if x > 0 and x < 10:
        return 1
    elif x < 0:
        return -1
    for i in items:
        pass
    else:
        pass
    while x:
        x -= 1
    return 0 if x else 1
";
        // if, and, elif, for(+else), while, conditional
        assert_eq!(entries(&report(source)), vec![("f", 8, 1)]);
    }

    #[test]
    fn test_try_with_assert_and_comprehensions() {
        let source = "\
def g(paths):
    try:
        with open(paths[0]) as fh:
            assert fh
    except OSError:
        pass
    except ValueError:
        pass
    else:
        pass
    return [p for p in paths if p]
";
        // with, assert, 2 excepts, try-else, comprehension for, comprehension if
        assert_eq!(entries(&report(source)), vec![("g", 8, 1)]);
    }

    #[test]
    fn test_methods_and_nested_functions() {
        let source = "\
class A:
    def m(self, x):
        def inner():
            if x:
                pass
        return inner

    class B:
        def n(self):
            pass

def top():
    class Local:
        def go(self):
            if True:
                pass
    return Local
";
        let r = report(source);
        // the `if` of `inner` belongs to no listed function
        assert_eq!(
            entries(&r),
            vec![("m", 1, 2), ("n", 1, 9), ("top", 1, 12), ("go", 2, 14)]
        );
        assert_eq!(r.total(), 5);
    }

    #[test]
    fn test_module_level_decisions() {
        let source = "\
import sys
if sys.argv:
    pass

class C:
    flag = 1 if sys else 0

def f():
    pass
";
        let r = report(source);
        assert_eq!(r.module_decisions, 2);
        assert_eq!(r.total(), 1);
    }

    #[test]
    fn test_closure_decisions_not_folded() {
        let source = "\
def outer(items):
    @wraps(items)
    def keep(x):
        return x if x else None
    for item in items:
        pass
    return [f for f in (lambda: items if items else [])()]
";
        // for, comprehension for, lambda conditional
        assert_eq!(entries(&report(source)), vec![("outer", 4, 1)]);
    }

    #[test]
    fn test_decorated_and_async_functions_listed() {
        let source = "@cache\ndef a():\n    pass\n\nasync def b():\n    pass\n";
        let r = report(source);
        assert_eq!(entries(&r), vec![("a", 1, 2), ("b", 1, 5)]);
    }
}
