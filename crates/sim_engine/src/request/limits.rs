//! Clamping policy for untrusted numeric input.

use serde::{Deserialize, Serialize};

/// Closed interval with a fallback for missing values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound, also the value NaN maps to.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Value used when the field is absent.
    pub default: f64,
}

impl Range {
    /// Creates a range.
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Clamps `value` into `[min, max]`; NaN becomes `min`.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.max(self.min).min(self.max)
        }
    }

    /// `default` for `None`, otherwise [`Range::clamp`].
    #[inline]
    pub fn coerce(&self, value: Option<f64>) -> f64 {
        value.map_or(self.default, |v| self.clamp(v))
    }
}

/// Bounds applied to every numeric field of a [`SimulateRequest`](super::SimulateRequest).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputLimits {
    /// Trial count.
    pub iterations: Range,
    /// Success threshold.
    pub threshold: Range,
    /// Assumption mean.
    pub mean: Range,
    /// Assumption standard deviation.
    pub std: Range,
    /// Assumption weight.
    pub weight: Range,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            iterations: Range::new(1_000.0, 300_000.0, 10_000.0),
            threshold: Range::new(-1_000.0, 1_000.0, 0.0),
            mean: Range::new(-1_000.0, 1_000.0, 0.0),
            std: Range::new(0.0, 1_000.0, 0.0),
            weight: Range::new(0.0, 100.0, 1.0),
        }
    }
}

impl InputLimits {
    /// Coerces an iteration count and truncates it to an integer.
    pub fn iterations(&self, value: Option<f64>) -> usize {
        self.iterations.coerce(value).floor() as usize
    }
}
