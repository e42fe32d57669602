//! Feature modules

pub mod graph_builder;
pub mod metrics;
pub mod parsing;
