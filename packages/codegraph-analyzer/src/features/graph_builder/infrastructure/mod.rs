//! Graph Builder Infrastructure
//!
//! The two tree passes, call resolution, enrichment and export.

pub mod call_resolver;
pub mod d3_converter;
pub mod definition_collector;
pub mod node_enricher;
pub mod relationship_processor;

pub use call_resolver::{CallResolver, ResolutionStats};
pub use d3_converter::{ExportLink, ExportNode, GraphExport};
pub use definition_collector::DefinitionCollector;
pub use node_enricher::NodeEnricher;
pub use relationship_processor::RelationshipProcessor;
