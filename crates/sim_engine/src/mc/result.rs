//! Simulation outputs.

use serde::{Deserialize, Serialize};

/// Fixed bucketing of a success probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SuccessLabel {
    /// `p < 0.33`
    Low,
    /// `0.33 <= p < 0.66`
    Medium,
    /// `p >= 0.66`
    High,
}

impl SuccessLabel {
    /// Lower edge of [`SuccessLabel::Medium`].
    pub const MEDIUM_CUT: f64 = 0.33;
    /// Lower edge of [`SuccessLabel::High`].
    pub const HIGH_CUT: f64 = 0.66;

    /// Buckets a probability.
    pub fn from_probability(p: f64) -> Self {
        if p < Self::MEDIUM_CUT {
            SuccessLabel::Low
        } else if p < Self::HIGH_CUT {
            SuccessLabel::Medium
        } else {
            SuccessLabel::High
        }
    }

    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessLabel::Low => "LOW",
            SuccessLabel::Medium => "MEDIUM",
            SuccessLabel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for SuccessLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Echo of the inputs that shaped a probability run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilitySummary {
    /// Threshold a trial had to exceed.
    pub threshold: f64,
    /// Number of factors that took part.
    pub enabled_count: usize,
}

/// Probability-mode result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityResult {
    /// Trials executed.
    pub iterations: usize,
    /// Share of trials with `outcome > threshold`, in `[0, 1]`.
    pub probability_success: f64,
    /// Bucket of `probability_success`.
    pub label: SuccessLabel,
    /// Inputs echo.
    pub summary: ProbabilitySummary,
}

/// Percentile-mode result.
///
/// Percentiles index the ascending sort with truncation, so
/// `p10 <= median <= p90` holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileResult {
    /// Trials executed.
    pub iterations: usize,
    /// Arithmetic mean of all outcomes.
    pub mean: f64,
    /// `outcomes[n / 2]`.
    pub median: f64,
    /// `outcomes[floor(n * 0.1)]`.
    pub p10: f64,
    /// `outcomes[floor(n * 0.9)]`.
    pub p90: f64,
    /// Share of outcomes strictly above zero.
    pub prob_positive: f64,
}

impl PercentileResult {
    /// Summarises outcomes, sorting them in place.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_outcomes(outcomes: &mut [f64]) -> Option<Self> {
        let n = outcomes.len();
        if n == 0 {
            return None;
        }

        outcomes.sort_by(f64::total_cmp);

        let sum: f64 = outcomes.iter().sum();
        let positive = outcomes.iter().filter(|&&x| x > 0.0).count();

        Some(Self {
            iterations: n,
            mean: sum / n as f64,
            median: outcomes[n / 2],
            p10: outcomes[n / 10],
            p90: outcomes[n * 9 / 10],
            prob_positive: positive as f64 / n as f64,
        })
    }
}

/// Output of [`SimulationRunner::run`](crate::SimulationRunner::run).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimResult {
    /// Threshold-exceedance result.
    Probability(ProbabilityResult),
    /// Distribution summary.
    Percentiles(PercentileResult),
}

impl SimResult {
    /// Trials executed.
    pub fn iterations(&self) -> usize {
        match self {
            SimResult::Probability(r) => r.iterations,
            SimResult::Percentiles(r) => r.iterations,
        }
    }

    /// The probability result, if this is one.
    pub fn as_probability(&self) -> Option<&ProbabilityResult> {
        match self {
            SimResult::Probability(r) => Some(r),
            SimResult::Percentiles(_) => None,
        }
    }

    /// The percentile result, if this is one.
    pub fn as_percentiles(&self) -> Option<&PercentileResult> {
        match self {
            SimResult::Probability(_) => None,
            SimResult::Percentiles(r) => Some(r),
        }
    }
}
