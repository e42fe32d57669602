//! Metrics Summarizer
//!
//! Per-file metrics over the same batch the graph is built from. Each metric
//! is computed on its own; a failure is logged and that metric alone falls
//! back to its zero value.

use std::collections::BTreeMap;

use tracing::debug;

use crate::features::metrics::domain::{line_count, ClassMetric, FileMetrics, MetricsSummary};
use crate::features::metrics::infrastructure::{analyze_module, maintainability, ComplexityReport};
use crate::features::parsing::domain::{ParsedTree, SyntaxKind};
use crate::features::parsing::{ParseFileUseCase, Parser, TreeSitterParser};
use crate::shared::models::{CodegraphError, Result};

pub struct MetricsSummarizer<P: Parser = TreeSitterParser> {
    parse: ParseFileUseCase<P>,
}

impl MetricsSummarizer<TreeSitterParser> {
    pub fn new() -> Self {
        Self::with_parser(TreeSitterParser::python())
    }
}

impl Default for MetricsSummarizer<TreeSitterParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Parser> MetricsSummarizer<P> {
    pub fn with_parser(parser: P) -> Self {
        Self {
            parse: ParseFileUseCase::new(parser),
        }
    }

    /// Parse and measure every file of the batch
    pub fn summarize(&self, files: &BTreeMap<String, String>) -> MetricsSummary {
        let parsed = self.parse.execute_batch(files);
        summarize_parsed(
            files
                .iter()
                .zip(&parsed)
                .map(|((path, source), (_, tree))| (path.as_str(), source.as_str(), tree.as_ref().ok())),
        )
    }
}

/// Measure a batch whose files were already parsed.
///
/// `None` stands for a file the parser could not handle at all.
pub fn summarize_parsed<'a, I>(entries: I) -> MetricsSummary
where
    I: IntoIterator<Item = (&'a str, &'a str, Option<&'a ParsedTree>)>,
{
    let files = entries
        .into_iter()
        .map(|(path, source, tree)| (path.to_string(), file_metrics(path, source, tree)))
        .collect();
    MetricsSummary::from_files(files)
}

/// Metrics of one file
pub fn file_metrics(path: &str, source: &str, tree: Option<&ParsedTree>) -> FileMetrics {
    let complexity = measure_complexity(tree);
    let maintainability = measure_maintainability(tree, complexity.as_ref().ok());
    let classes = measure_classes(tree);

    let mut metrics = FileMetrics {
        lines: line_count(source),
        ..FileMetrics::default()
    };

    match complexity {
        Ok(report) => {
            metrics.complexity = report.total();
            metrics.functions = report.functions;
        }
        Err(e) => debug!("{}: complexity unavailable: {}", path, e),
    }
    match maintainability {
        Ok(score) => metrics.maintainability = score,
        Err(e) => debug!("{}: maintainability unavailable: {}", path, e),
    }
    match classes {
        Ok(classes) => metrics.classes = classes,
        Err(e) => debug!("{}: class listing unavailable: {}", path, e),
    }
    metrics
}

/// Convenience entry point: parse with the Python parser and summarize
pub fn calculate_code_metrics(files: &BTreeMap<String, String>) -> MetricsSummary {
    MetricsSummarizer::new().summarize(files)
}

fn usable(tree: Option<&ParsedTree>) -> Result<&ParsedTree> {
    let tree = tree.ok_or_else(|| CodegraphError::parse("source could not be parsed"))?;
    match tree.first_error() {
        Some(err) => Err(CodegraphError::parse(err.message.clone())),
        None => Ok(tree),
    }
}

fn measure_complexity(tree: Option<&ParsedTree>) -> Result<ComplexityReport> {
    let tree = usable(tree)?;
    Ok(analyze_module(&tree.root))
}

fn measure_maintainability(tree: Option<&ParsedTree>, report: Option<&ComplexityReport>) -> Result<f64> {
    let tree = usable(tree)?;
    let total = match report {
        Some(report) => report.total() + report.module_decisions,
        None => {
            let report = analyze_module(&tree.root);
            report.total() + report.module_decisions
        }
    };
    Ok(maintainability::module_inputs(tree, total).score())
}

fn measure_classes(tree: Option<&ParsedTree>) -> Result<Vec<ClassMetric>> {
    let tree = usable(tree)?;
    Ok(tree
        .root
        .descendants()
        .filter(|n| n.kind == SyntaxKind::ClassDef)
        .filter_map(|class| {
            let name = class.name()?;
            let methods = class
                .descendants()
                .filter(|n| n.kind == SyntaxKind::FunctionDef)
                .count();
            Some(ClassMetric {
                name: name.to_string(),
                line: class.span.start_line,
                methods,
            })
        })
        .collect())
}
