//! Common test utilities for codegraph-analyzer
//!
//! Shared fixtures and assertions for the integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

// Re-export all utilities
pub use assertions::*;
pub use fixtures::*;
