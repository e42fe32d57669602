//! Metrics Feature
//!
//! Per-file line counts, cyclomatic complexity, maintainability index and
//! class listings, aggregated over a batch.
//!
//! ## Structure
//! - `domain/` - MetricsSummary, FileMetrics
//! - `infrastructure/` - cyclomatic, Halstead, raw and maintainability calculators
//! - `application/` - MetricsSummarizer

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{calculate_code_metrics, summarize_parsed, MetricsSummarizer};
pub use domain::{ClassMetric, FileMetrics, FunctionMetric, MetricsSummary, OverallMetrics};
