//! Factors, assumptions, and decision variables.

use serde::{Deserialize, Serialize};

use crate::rng::SimRng;

/// Sign applied to an assumption's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Contribution is added.
    #[default]
    Positive,
    /// Contribution is subtracted.
    Negative,
}

impl Direction {
    /// `1.0` for positive, `-1.0` for negative.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

/// One weighted, normally-distributed input.
///
/// Only enabled assumptions take part in a trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    /// Caller-chosen identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Centre of the distribution.
    pub mean: f64,
    /// Standard deviation, non-negative.
    pub std: f64,
    /// Importance weight, non-negative.
    pub weight: f64,
    /// Sign of the contribution.
    pub direction: Direction,
    /// Whether the assumption participates.
    pub enabled: bool,
}

impl Assumption {
    /// Creates an enabled assumption. Negative `std` or `weight` is taken as zero.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mean: f64,
        std: f64,
        weight: f64,
        direction: Direction,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mean,
            std: std.max(0.0),
            weight: weight.max(0.0),
            direction,
            enabled: true,
        }
    }

    /// Returns a copy with `enabled` set.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// One bounded decision input: central estimate plus a `[min, max]` range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name, used by decision formulas to look samples up.
    pub name: String,
    /// Central estimate.
    pub base: f64,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Optional human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Variable {
    /// Creates an unlabelled variable.
    pub fn new(name: impl Into<String>, base: f64, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            base,
            min,
            max,
            label: None,
        }
    }

    /// Standard deviation implied by the range: `(max - min) / 4`.
    #[inline]
    pub fn derived_std(&self) -> f64 {
        ((self.max - self.min) / 4.0).max(0.0)
    }

    /// Label if present, otherwise the name.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A single independent input as seen by the runner.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    /// Name carried through to sensitivity rows.
    pub name: String,
    /// Distribution centre.
    pub mean: f64,
    /// Distribution spread.
    pub std: f64,
    /// Clamp range for samples, if any.
    pub bounds: Option<(f64, f64)>,
}

impl Factor {
    /// Unbounded factor. A negative or NaN `std` is taken as zero.
    pub fn new(name: impl Into<String>, mean: f64, std: f64) -> Self {
        Self {
            name: name.into(),
            mean,
            std: std.max(0.0),
            bounds: None,
        }
    }

    /// Factor whose samples are clamped to `[min, max]`.
    pub fn bounded(name: impl Into<String>, mean: f64, std: f64, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            mean,
            std: std.max(0.0),
            bounds: Some((min, max)),
        }
    }

    /// Draws `mean + std * z`, clamped to the bounds when present.
    ///
    /// Always consumes one normal variate, even when `std` is zero, so the
    /// stream position does not depend on parameter values.
    #[inline]
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        let x = self.mean + self.std * rng.gen_normal();
        match self.bounds {
            Some((lo, hi)) => x.max(lo).min(hi),
            None => x,
        }
    }
}

/// Ordered set of independent factors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorSet {
    factors: Vec<Factor>,
}

impl FactorSet {
    /// Wraps an explicit list.
    pub fn new(factors: Vec<Factor>) -> Self {
        Self { factors }
    }

    /// Enabled assumptions only, in input order.
    pub fn from_assumptions(assumptions: &[Assumption]) -> Self {
        let factors = assumptions
            .iter()
            .filter(|a| a.enabled)
            .map(|a| Factor::new(a.name.clone(), a.mean, a.std))
            .collect();
        Self { factors }
    }

    /// One bounded factor per variable with `std = (max - min) / 4`.
    pub fn from_variables(variables: &[Variable]) -> Self {
        let factors = variables
            .iter()
            .map(|v| Factor::bounded(v.name.clone(), v.base, v.derived_std(), v.min, v.max))
            .collect();
        Self { factors }
    }

    /// Number of factors.
    #[inline]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// `true` when there are no factors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Factor slice.
    #[inline]
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// Factor names in order.
    pub fn names(&self) -> Vec<&str> {
        self.factors.iter().map(|f| f.name.as_str()).collect()
    }

    /// Draws one sample per factor into `out`.
    ///
    /// `out` must have the same length as the set.
    #[inline]
    pub fn sample_into(&self, rng: &mut SimRng, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.factors.len());
        for (slot, factor) in out.iter_mut().zip(&self.factors) {
            *slot = factor.sample(rng);
        }
    }

    /// Copy of the set with factor `index` centred on `value`.
    ///
    /// Spread and bounds are left untouched. Out-of-range indices return an
    /// unmodified copy.
    pub fn with_pinned_mean(&self, index: usize, value: f64) -> Self {
        let mut pinned = self.clone();
        if let Some(factor) = pinned.factors.get_mut(index) {
            factor.mean = value;
        }
        pinned
    }

    /// Low and high scenario values for factor `index`.
    ///
    /// Bounded factors use their bounds; unbounded factors use `mean ± 2 std`,
    /// the same spread a range implies under `std = (max - min) / 4`.
    pub fn low_high(&self, index: usize) -> Option<(f64, f64)> {
        self.factors.get(index).map(|f| match f.bounds {
            Some(bounds) => bounds,
            None => (f.mean - 2.0 * f.std, f.mean + 2.0 * f.std),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_negative_std_is_treated_as_zero() {
        let built = Assumption::new("a", "A", 3.0, -2.0, -1.0, Direction::Positive);
        assert_eq!((built.std, built.weight), (0.0, 0.0));

        let mut raw = Assumption::new("a", "A", 3.0, 1.0, 1.0, Direction::Positive);
        raw.std = -2.0;
        let factors = FactorSet::from_assumptions(&[raw]);
        assert_eq!(factors.factors()[0].std, 0.0);

        let factor = Factor::bounded("b", 1.0, f64::NAN, 0.0, 2.0);
        assert_eq!(factor.std, 0.0);

        let mut rng = SimRng::from_seed(4);
        assert_eq!(factors.factors()[0].sample(&mut rng), 3.0);
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::Positive.sign(), 1.0);
        assert_eq!(Direction::Negative.sign(), -1.0);
        assert_eq!(Direction::default(), Direction::Positive);
    }

    #[test]
    fn test_direction_serde() {
        let json = serde_json::to_string(&Direction::Negative).unwrap();
        assert_eq!(json, "\"negative\"");
        let parsed: Direction = serde_json::from_str("\"positive\"").unwrap();
        assert_eq!(parsed, Direction::Positive);
    }

    #[test]
    fn test_from_assumptions_skips_disabled() {
        let assumptions = vec![
            Assumption::new("a", "A", 1.0, 0.5, 1.0, Direction::Positive),
            Assumption::new("b", "B", 2.0, 0.5, 1.0, Direction::Positive).with_enabled(false),
            Assumption::new("c", "C", 3.0, 0.5, 1.0, Direction::Negative),
        ];

        let set = FactorSet::from_assumptions(&assumptions);

        assert_eq!(set.len(), 2);
        assert_eq!(set.names(), vec!["A", "C"]);
        assert!(set.factors().iter().all(|f| f.bounds.is_none()));
    }

    #[test]
    fn test_from_variables_derives_std() {
        let vars = vec![Variable::new("salary", 100.0, 80.0, 120.0)];
        let set = FactorSet::from_variables(&vars);

        let factor = &set.factors()[0];
        assert_relative_eq!(factor.std, 10.0);
        assert_eq!(factor.bounds, Some((80.0, 120.0)));
        assert_eq!(factor.mean, 100.0);
    }

    #[test]
    fn test_bounded_sample_is_clamped() {
        let factor = Factor::bounded("x", 0.0, 100.0, -1.0, 1.0);
        let mut rng = SimRng::from_seed(5);
        for _ in 0..1_000 {
            let x = factor.sample(&mut rng);
            assert!((-1.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn test_zero_std_sample_is_exact() {
        let factor = Factor::new("x", 4.25, 0.0);
        let mut rng = SimRng::from_seed(5);
        for _ in 0..100 {
            assert_eq!(factor.sample(&mut rng), 4.25);
        }
    }

    #[test]
    fn test_with_pinned_mean() {
        let set = FactorSet::from_variables(&[
            Variable::new("a", 10.0, 0.0, 20.0),
            Variable::new("b", 5.0, 1.0, 9.0),
        ]);

        let pinned = set.with_pinned_mean(1, 1.0);

        assert_eq!(pinned.factors()[0], set.factors()[0]);
        assert_eq!(pinned.factors()[1].mean, 1.0);
        assert_eq!(pinned.factors()[1].std, set.factors()[1].std);
        assert_eq!(set.with_pinned_mean(7, 0.0), set);
    }

    #[test]
    fn test_low_high() {
        let set = FactorSet::new(vec![
            Factor::bounded("a", 10.0, 5.0, 0.0, 20.0),
            Factor::new("b", 10.0, 1.5),
        ]);

        assert_eq!(set.low_high(0), Some((0.0, 20.0)));
        assert_eq!(set.low_high(1), Some((7.0, 13.0)));
        assert_eq!(set.low_high(2), None);
    }

    #[test]
    fn test_variable_display_name() {
        let mut v = Variable::new("ramp_months", 3.0, 1.0, 6.0);
        assert_eq!(v.display_name(), "ramp_months");
        v.label = Some("Ramp-up time".to_string());
        assert_eq!(v.display_name(), "Ramp-up time");
    }
}
