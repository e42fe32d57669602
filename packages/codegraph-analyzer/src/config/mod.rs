//! Configuration System
//!
//! Two levels:
//! - Preset (`minimal`, `standard`, `full`) with builder overrides
//! - YAML file (schema v1) naming a preset plus field overrides

pub mod analyzer_config;
pub mod error;
pub mod preset;

pub use analyzer_config::{
    AnalyzerConfig, AnalyzerConfigBuilder, ConfigFileV1, ConfigOverrides, MAX_SNIPPET_LINES,
};
pub use error::{ConfigError, ConfigResult};
pub use preset::Preset;
