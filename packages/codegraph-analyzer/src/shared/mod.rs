//! Shared module - Common types and utilities
//!
//! Types shared across all features. Only `utils::tree_sitter` touches the
//! tree-sitter API directly.

pub mod models;
pub mod utils;

pub use models::*;
