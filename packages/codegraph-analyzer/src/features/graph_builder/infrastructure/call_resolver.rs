//! Call Resolver
//!
//! Turns recorded call sites into `calls` edges once every definition is
//! known. Resolution is name-only: a callee matches every indexed identity
//! whose last segment equals it, and all matches are linked. A callee with no
//! match gets one shared `ref:<callee>` node.

use tracing::debug;

use crate::features::graph_builder::domain::{
    identity, CallSite, CodeGraph, DefinitionIndex, EdgeKind, GraphNode, NodeKind,
};

/// Outcome counters of one resolution run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Call sites with at least one matching definition
    pub resolved_calls: usize,
    /// Call sites linked to a reference node
    pub unresolved_calls: usize,
    /// Total `calls` edges added
    pub call_edges: usize,
}

pub struct CallResolver<'a> {
    index: &'a DefinitionIndex,
}

impl<'a> CallResolver<'a> {
    pub fn new(index: &'a DefinitionIndex) -> Self {
        Self { index }
    }

    /// Add `calls` edges for every call site. Never fails.
    pub fn resolve(&self, calls: &[CallSite], graph: &mut CodeGraph) -> ResolutionStats {
        let mut stats = ResolutionStats::default();

        for call in calls {
            match self.index.resolve(&call.callee) {
                Some(targets) => {
                    for target in targets {
                        graph.add_edge(&call.caller, target, EdgeKind::Calls);
                        stats.call_edges += 1;
                    }
                    stats.resolved_calls += 1;
                }
                None => {
                    let ref_id = identity::reference_id(&call.callee);
                    graph.upsert_node(GraphNode::new(
                        ref_id.as_str(),
                        NodeKind::Reference,
                        call.callee.as_str(),
                    ));
                    graph.add_edge(&call.caller, &ref_id, EdgeKind::Calls);
                    stats.call_edges += 1;
                    stats.unresolved_calls += 1;
                }
            }
        }

        debug!(
            "Resolved {} calls, {} unresolved, {} call edges",
            stats.resolved_calls, stats.unresolved_calls, stats.call_edges
        );
        stats
    }
}
