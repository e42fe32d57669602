/*
 * Codegraph Analyzer - Static Python Dependency/Call Graph
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span) and tree-sitter helpers
 * - features/    : Vertical slices (parsing → graph_builder, metrics)
 * - config/      : Presets + YAML configuration
 *
 * Input is a batch {path → source}; output is a graph plus a metrics summary.
 */

#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration presets and YAML loading
pub mod config;

/// Crate error type
pub mod errors;

/// Feature modules (parsing, graph_builder, metrics)
pub mod features;

/// Shared models and utilities
pub mod shared;

pub use config::{AnalyzerConfig, ConfigError, Preset};
pub use errors::{CodegraphError, Result};
pub use features::graph_builder::{
    AnalysisResult, CodeAnalyzer, CodeGraph, EdgeKind, GraphExport, GraphNode, NodeKind,
};
pub use features::metrics::{calculate_code_metrics, MetricsSummary};
