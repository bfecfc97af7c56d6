//! Trial loop and aggregation.

use super::config::SimulationConfig;
use super::result::{PercentileResult, ProbabilityResult, ProbabilitySummary, SimResult, SuccessLabel};
use crate::model::{FactorSet, OutcomeModel};
use crate::rng::SimRng;

/// Aggregation applied to the trial outcomes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationMode {
    /// Share of trials with `outcome > threshold`.
    Probability {
        /// Exceedance threshold.
        threshold: f64,
    },
    /// Sorted-outcome percentiles.
    Percentiles,
}

/// Runs independent trials over a [`FactorSet`].
///
/// Each call to a `run*` method creates its own [`SimRng`] from the
/// configured seed, so two calls with a seeded config see the same stream.
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    /// Creates a runner from a validated configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Runner configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs in the given mode.
    pub fn run<M>(&self, factors: &FactorSet, model: &M, mode: SimulationMode) -> SimResult
    where
        M: OutcomeModel + ?Sized,
    {
        match mode {
            SimulationMode::Probability { threshold } => {
                SimResult::Probability(self.run_probability(factors, model, threshold))
            }
            SimulationMode::Percentiles => {
                SimResult::Percentiles(self.run_percentiles(factors, model))
            }
        }
    }

    /// Estimates `P(outcome > threshold)`.
    pub fn run_probability<M>(
        &self,
        factors: &FactorSet,
        model: &M,
        threshold: f64,
    ) -> ProbabilityResult
    where
        M: OutcomeModel + ?Sized,
    {
        let iterations = self.config.iterations();
        let mut successes = 0usize;
        self.for_each_outcome(factors, model, |outcome| {
            if outcome > threshold {
                successes += 1;
            }
        });

        let probability_success = successes as f64 / iterations as f64;

        ProbabilityResult {
            iterations,
            probability_success,
            label: SuccessLabel::from_probability(probability_success),
            summary: ProbabilitySummary {
                threshold,
                enabled_count: factors.len(),
            },
        }
    }

    /// Summarises the outcome distribution by percentiles.
    pub fn run_percentiles<M>(&self, factors: &FactorSet, model: &M) -> PercentileResult
    where
        M: OutcomeModel + ?Sized,
    {
        let mut outcomes = Vec::with_capacity(self.config.iterations());
        self.for_each_outcome(factors, model, |outcome| outcomes.push(outcome));

        // iterations >= 1 is enforced by SimulationConfig
        PercentileResult::from_outcomes(&mut outcomes).unwrap_or(PercentileResult {
            iterations: 0,
            mean: 0.0,
            median: 0.0,
            p10: 0.0,
            p90: 0.0,
            prob_positive: 0.0,
        })
    }

    fn for_each_outcome<M, F>(&self, factors: &FactorSet, model: &M, mut sink: F)
    where
        M: OutcomeModel + ?Sized,
        F: FnMut(f64),
    {
        let mut rng = SimRng::from_optional_seed(self.config.seed());
        let mut samples = vec![0.0; factors.len()];

        for _ in 0..self.config.iterations() {
            factors.sample_into(&mut rng, &mut samples);
            sink(model.evaluate(&samples));
        }
    }
}
