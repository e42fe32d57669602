//! Maintainability Index
//!
//! ```text
//! MI = clamp(0, 100, (171 - 5.2 * ln(V) - 0.23 * CC - 16.2 * ln(LLOC)
//!                     + 50 * sin(sqrt(2.46 * rad(C)))) * 100 / 171)
//! ```
//!
//! V = Halstead volume, CC = total cyclomatic complexity, LLOC = logical
//! lines, C = comment percentage with multi-line strings counted as comments.

use super::{halstead, raw};
use crate::features::parsing::domain::ParsedTree;

/// Inputs of the index, kept for inspection
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaintainabilityInputs {
    pub halstead_volume: f64,
    pub complexity: u32,
    pub lloc: usize,
    pub comment_percentage: f64,
}

impl MaintainabilityInputs {
    pub fn score(&self) -> f64 {
        maintainability_index(
            self.halstead_volume,
            self.complexity,
            self.lloc,
            self.comment_percentage,
        )
    }
}

/// Index from its four inputs. Degenerate modules (no operators or no
/// statements) score 100.
pub fn maintainability_index(volume: f64, complexity: u32, lloc: usize, comment_percentage: f64) -> f64 {
    if volume <= 0.0 || lloc == 0 {
        return 100.0;
    }

    let comment_factor = 50.0 * (2.46 * comment_percentage.to_radians()).sqrt().sin();
    let raw_mi = 171.0 - 5.2 * volume.ln() - 0.23 * f64::from(complexity) - 16.2 * (lloc as f64).ln()
        + comment_factor;

    (raw_mi * 100.0 / 171.0).clamp(0.0, 100.0)
}

/// Gather the index inputs of a parsed module.
///
/// `complexity` is the module's total cyclomatic complexity, functions and
/// top-level decision points included.
pub fn module_inputs(tree: &ParsedTree, complexity: u32) -> MaintainabilityInputs {
    let raw = raw::analyze_tree(tree);
    MaintainabilityInputs {
        halstead_volume: halstead::analyze_tree(tree).volume,
        complexity,
        lloc: raw.lloc,
        comment_percentage: raw.comment_percentage(),
    }
}
