//! One-at-a-time sensitivity analysis.
//!
//! For each factor, two scenario runs pin its centre at the low and the high
//! end of its range while every other factor keeps its base distribution.
//! The swing in mean outcome, relative to the base mean, ranks the factors.
//!
//! ```text
//! impact_percent = |mean_high - mean_low| / |base.mean| * 100
//! ```
//!
//! When `base.mean` is exactly zero the relative swing is undefined and the
//! impact is reported as `0.0`.

mod analyzer;

pub use analyzer::{SensitivityAnalyzer, SensitivityRow, SENSITIVITY_DIVISOR};
