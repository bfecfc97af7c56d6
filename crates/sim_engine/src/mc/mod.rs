//! Monte Carlo simulation runner.
//!
//! ```text
//! SimulationRunner
//! ├── SimulationConfig  (iterations, seed)
//! ├── SimRng            (one per run, request-local)
//! └── trial loop
//!     ├── FactorSet::sample_into()
//!     └── OutcomeModel::evaluate()
//! ```
//!
//! Two aggregation modes are offered side by side:
//!
//! - [`SimulationMode::Probability`]: share of trials whose outcome exceeds a
//!   threshold, bucketed into a [`SuccessLabel`].
//! - [`SimulationMode::Percentiles`]: mean, median, p10, p90 and the share of
//!   positive outcomes over the sorted trial outcomes.
//!
//! The loop always runs the configured number of trials.
//!
//! ```rust
//! use sim_engine::mc::{SimulationConfig, SimulationRunner};
//! use sim_engine::model::{Factor, FactorSet};
//!
//! let factors = FactorSet::new(vec![Factor::new("x", 10.0, 2.0)]);
//! let config = SimulationConfig::builder().iterations(20_000).seed(1).build().unwrap();
//! let result = SimulationRunner::new(config).run_percentiles(&factors, &|s: &[f64]| s[0]);
//!
//! assert!(result.p10 <= result.median && result.median <= result.p90);
//! ```

pub mod config;
pub mod result;
pub mod runner;

pub use config::{SimulationConfig, SimulationConfigBuilder, MAX_ITERATIONS};
pub use result::{PercentileResult, ProbabilityResult, ProbabilitySummary, SimResult, SuccessLabel};
pub use runner::{SimulationMode, SimulationRunner};
