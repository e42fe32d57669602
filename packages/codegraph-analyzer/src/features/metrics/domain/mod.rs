//! Metrics Domain Models
//!
//! Serialized field names are part of the output contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Batch-level metrics report keyed by file path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub overall: OverallMetrics,
    pub files: BTreeMap<String, FileMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallMetrics {
    pub total_files: usize,
    pub total_lines: usize,
    pub total_complexity: u32,
    /// Arithmetic mean over all files, 0 for an empty batch
    pub average_maintainability: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMetrics {
    /// `\n`-separated segment count
    pub lines: usize,
    /// Sum of `functions[*].complexity`
    pub complexity: u32,
    /// Maintainability index, 0..=100
    pub maintainability: f64,
    pub functions: Vec<FunctionMetric>,
    pub classes: Vec<ClassMetric>,
}

/// Cyclomatic complexity of one function or method, under its bare name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetric {
    pub name: String,
    pub complexity: u32,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetric {
    pub name: String,
    pub line: u32,
    /// Function definitions anywhere in the class body
    pub methods: usize,
}

impl MetricsSummary {
    /// Build the summary, deriving `overall` from the per-file entries
    pub fn from_files(files: BTreeMap<String, FileMetrics>) -> Self {
        let total_files = files.len();
        let total_lines = files.values().map(|f| f.lines).sum();
        let total_complexity = files.values().map(|f| f.complexity).sum();
        let average_maintainability = if total_files > 0 {
            files.values().map(|f| f.maintainability).sum::<f64>() / total_files as f64
        } else {
            0.0
        };

        Self {
            overall: OverallMetrics {
                total_files,
                total_lines,
                total_complexity,
                average_maintainability,
            },
            files,
        }
    }

    pub fn file(&self, path: &str) -> Option<&FileMetrics> {
        self.files.get(path)
    }
}

impl FileMetrics {
    /// Metrics of a file that could not be parsed: only `lines` is known
    pub fn lines_only(source: &str) -> Self {
        Self {
            lines: line_count(source),
            ..Self::default()
        }
    }
}

/// Number of `\n`-separated segments, counting a trailing empty segment
#[inline]
pub fn line_count(source: &str) -> usize {
    source.split('\n').count()
}
