//! Outcome formulas mapping one trial's samples to a scalar.

use super::factor::{Assumption, FactorSet};

/// Maps the samples of one trial to one outcome.
///
/// `samples[i]` is the draw for factor `i` of the [`FactorSet`] the run was
/// started with. Any `Fn(&[f64]) -> f64` closure is an outcome model.
///
/// ```rust
/// use sim_engine::OutcomeModel;
///
/// let spread = |s: &[f64]| s[1] - s[0];
/// assert_eq!(spread.evaluate(&[2.0, 5.0]), 3.0);
/// ```
pub trait OutcomeModel {
    /// Outcome of a single trial.
    fn evaluate(&self, samples: &[f64]) -> f64;
}

impl<F> OutcomeModel for F
where
    F: Fn(&[f64]) -> f64,
{
    #[inline]
    fn evaluate(&self, samples: &[f64]) -> f64 {
        self(samples)
    }
}

/// Signed, weighted sum over enabled assumptions.
///
/// Coefficients line up with [`FactorSet::from_assumptions`] for the same
/// slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedSumModel {
    coefficients: Vec<f64>,
}

impl WeightedSumModel {
    /// `sign * weight` for every enabled assumption, in order.
    ///
    /// Negative or NaN weights count as zero; direction alone carries the sign.
    pub fn from_assumptions(assumptions: &[Assumption]) -> Self {
        let coefficients = assumptions
            .iter()
            .filter(|a| a.enabled)
            .map(|a| a.direction.sign() * a.weight.max(0.0))
            .collect();
        Self { coefficients }
    }

    /// Model with unit weight on every factor.
    pub fn unit(len: usize) -> Self {
        Self {
            coefficients: vec![1.0; len],
        }
    }

    /// Signed weights.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl OutcomeModel for WeightedSumModel {
    #[inline]
    fn evaluate(&self, samples: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(samples)
            .map(|(c, x)| c * x)
            .sum()
    }
}

/// Plain sum of every sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdditiveModel;

impl OutcomeModel for AdditiveModel {
    #[inline]
    fn evaluate(&self, samples: &[f64]) -> f64 {
        samples.iter().sum()
    }
}

/// First-year value of a hire.
///
/// Reads these named samples, falling back to the listed default when a
/// variable is not supplied:
///
/// | name             | default | meaning                               |
/// |------------------|---------|---------------------------------------|
/// | `salary`         | 0       | annual salary                         |
/// | `overhead_pct`   | 0       | benefits and overhead as a fraction   |
/// | `productivity`   | 1       | fraction of full output once ramped   |
/// | `ramp_months`    | 0       | months to reach full output           |
/// | `value_per_year` | 0       | value produced by a fully ramped hire |
///
/// Ramp-up is treated as a linear climb, so half of the ramp period is lost:
///
/// ```text
/// cost       = salary * (1 + overhead_pct)
/// throughput = max(productivity, 0) * max(12 - ramp_months / 2, 0) / 12
/// revenue    = value_per_year * throughput
/// outcome    = revenue - cost
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiringModel {
    salary: Option<usize>,
    overhead_pct: Option<usize>,
    productivity: Option<usize>,
    ramp_months: Option<usize>,
    value_per_year: Option<usize>,
}

impl HiringModel {
    /// Variable names the formula understands.
    pub const VARIABLES: [&'static str; 5] = [
        "salary",
        "overhead_pct",
        "productivity",
        "ramp_months",
        "value_per_year",
    ];

    /// Resolves sample positions from factor names.
    pub fn for_factors(factors: &FactorSet) -> Self {
        let names = factors.names();
        let position = |key: &str| names.iter().position(|n| *n == key);
        Self {
            salary: position("salary"),
            overhead_pct: position("overhead_pct"),
            productivity: position("productivity"),
            ramp_months: position("ramp_months"),
            value_per_year: position("value_per_year"),
        }
    }

    /// `true` when the names describe a hiring decision.
    pub fn recognises(names: &[&str]) -> bool {
        names.contains(&"salary")
            && (names.contains(&"value_per_year") || names.contains(&"productivity"))
    }

    #[inline]
    fn read(samples: &[f64], index: Option<usize>, default: f64) -> f64 {
        index.and_then(|i| samples.get(i).copied()).unwrap_or(default)
    }
}

impl OutcomeModel for HiringModel {
    fn evaluate(&self, samples: &[f64]) -> f64 {
        let salary = Self::read(samples, self.salary, 0.0);
        let overhead = Self::read(samples, self.overhead_pct, 0.0);
        let productivity = Self::read(samples, self.productivity, 1.0);
        let ramp = Self::read(samples, self.ramp_months, 0.0);
        let value = Self::read(samples, self.value_per_year, 0.0);

        let cost = salary * (1.0 + overhead);
        let effective_months = (12.0 - ramp / 2.0).max(0.0);
        let throughput = productivity.max(0.0) * effective_months / 12.0;
        let revenue = value * throughput;

        revenue - cost
    }
}

/// Outcome formula chosen for a decision request.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionModel {
    /// Hire / don't-hire economics.
    Hiring(HiringModel),
    /// Sum of all variables.
    Additive(AdditiveModel),
}

impl DecisionModel {
    /// Picks [`HiringModel`] when the factor names describe a hire,
    /// otherwise [`AdditiveModel`].
    pub fn for_factors(factors: &FactorSet) -> Self {
        if HiringModel::recognises(&factors.names()) {
            DecisionModel::Hiring(HiringModel::for_factors(factors))
        } else {
            DecisionModel::Additive(AdditiveModel)
        }
    }

    /// Short model name for reports.
    pub fn name(&self) -> &'static str {
        match self {
            DecisionModel::Hiring(_) => "hiring",
            DecisionModel::Additive(_) => "additive",
        }
    }
}

impl OutcomeModel for DecisionModel {
    #[inline]
    fn evaluate(&self, samples: &[f64]) -> f64 {
        match self {
            DecisionModel::Hiring(model) => model.evaluate(samples),
            DecisionModel::Additive(model) => model.evaluate(samples),
        }
    }
}
