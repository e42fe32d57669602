//! Error types for codegraph-analyzer
//!
//! Per-file and per-metric failures are contained inside the analysis and
//! never surface here; only batch-level problems do.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for codegraph-analyzer operations
#[derive(Debug, Error)]
pub enum CodegraphError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// The caller supplied no source files at all
    #[error("no analyzable files")]
    EmptyBatch,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON export error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CodegraphError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        CodegraphError::Parse(msg.into())
    }
}

/// Result type alias for codegraph operations
pub type Result<T> = std::result::Result<T, CodegraphError>;
