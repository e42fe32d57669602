//! Shared models

mod span;

pub use crate::errors::{CodegraphError, Result};
pub use span::Span;

/// Graph node identity
pub type NodeId = String;
