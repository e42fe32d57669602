//! Graph Builder Feature
//!
//! Builds the dependency/call graph of a batch of Python files.
//!
//! ## Structure
//! - `domain/` - CodeGraph, GraphNode, NodeKind, EdgeKind, identity scheme
//! - `infrastructure/` - DefinitionCollector, RelationshipProcessor,
//!   CallResolver, NodeEnricher, D3 export
//! - `application/` - CodeAnalyzer

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports
pub use application::{AnalysisResult, CodeAnalyzer};
pub use domain::{CallSite, CodeGraph, DefinitionIndex, EdgeKind, GraphEdge, GraphNode, NodeKind};
pub use infrastructure::{ExportLink, ExportNode, GraphExport};
