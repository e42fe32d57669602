//! Metric calculators over parsed syntax trees

pub mod cyclomatic;
pub mod halstead;
pub mod maintainability;
pub mod raw;

pub use cyclomatic::{analyze_module, function_complexity, ComplexityReport};
pub use halstead::HalsteadMetrics;
pub use maintainability::{maintainability_index, MaintainabilityInputs};
pub use raw::RawMetrics;
