//! Raw line metrics
//!
//! Multi-line string statements (docstrings and bare string blocks) are
//! counted separately from comments and excluded from SLOC.

use std::collections::BTreeSet;

use crate::features::parsing::domain::{ParsedTree, SyntaxKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawMetrics {
    /// Physical lines
    pub loc: usize,
    /// Logical lines (statements and definitions)
    pub lloc: usize,
    /// Source lines: loc minus blank, comment-only and multi-line string lines
    pub sloc: usize,
    /// Lines containing a comment
    pub comments: usize,
    /// Comment-only lines
    pub single_comments: usize,
    /// Lines covered by multi-line string statements
    pub multi: usize,
    pub blank: usize,
}

impl RawMetrics {
    /// Comment percentage relative to SLOC, counting multi-line strings as
    /// comments
    pub fn comment_percentage(&self) -> f64 {
        if self.sloc == 0 {
            return 0.0;
        }
        (self.comments + self.multi) as f64 * 100.0 / self.sloc as f64
    }
}

pub fn analyze_tree(tree: &ParsedTree) -> RawMetrics {
    let lines: Vec<&str> = tree.source.lines().collect();
    let loc = lines.len();
    let blank = lines.iter().filter(|l| l.trim().is_empty()).count();
    let single_comments = lines
        .iter()
        .filter(|l| l.trim_start().starts_with('#'))
        .count();

    let mut comment_lines = BTreeSet::new();
    let mut multi = 0;
    let mut lloc = 0;

    for node in tree.root.descendants() {
        if node.kind == SyntaxKind::Comment {
            comment_lines.insert(node.span.start_line);
            continue;
        }
        if node.raw_kind().ends_with("_statement")
            || matches!(node.kind, SyntaxKind::FunctionDef | SyntaxKind::ClassDef)
        {
            lloc += 1;
        }
        if node.string_statement().is_some() && node.span.is_multiline() {
            multi += node.span.line_count() as usize;
        }
    }

    RawMetrics {
        loc,
        lloc,
        sloc: loc.saturating_sub(blank + single_comments + multi),
        comments: comment_lines.len(),
        single_comments,
        multi,
        blank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::{Parser, TreeSitterParser};

    fn raw(source: &str) -> RawMetrics {
        let tree = TreeSitterParser::python().parse(source, "r.py").unwrap();
        analyze_tree(&tree)
    }

    #[test]
    fn test_line_categories() {
        let source = "\
# header
import os

def f():
    \"\"\"Doc
    spanning lines.
    \"\"\"
    return os.sep  # trailing
";
        let m = raw(source);
        assert_eq!(m.loc, 8);
        assert_eq!(m.blank, 1);
        assert_eq!(m.single_comments, 1);
        assert_eq!(m.comments, 2);
        assert_eq!(m.multi, 3);
        assert_eq!(m.sloc, 3);
        // import, def, docstring expression, return
        assert_eq!(m.lloc, 4);
    }

    #[test]
    fn test_single_line_docstring_is_source() {
        let m = raw("def f():\n    \"\"\"One line.\"\"\"\n");
        assert_eq!(m.multi, 0);
        assert_eq!(m.sloc, 2);
    }

    #[test]
    fn test_comment_percentage() {
        let m = RawMetrics {
            sloc: 10,
            comments: 2,
            multi: 3,
            ..RawMetrics::default()
        };
        assert!((m.comment_percentage() - 50.0).abs() < 1e-9);
        assert_eq!(RawMetrics::default().comment_percentage(), 0.0);
    }
}
