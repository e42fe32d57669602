//! Utility modules shared across features
//!
//! - `tree_sitter`: position and text helpers for tree-sitter nodes
//! - `text`: identity segments and docstring cleanup
//! - `source_files`: batch discovery on disk

pub mod source_files;
pub mod text;
pub mod tree_sitter;
