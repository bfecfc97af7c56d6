//! # Sim Engine
//!
//! Monte Carlo estimation of outcome distributions for sets of independent,
//! normally-distributed inputs.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                 sim_engine                    │
//! ├───────────────────────────────────────────────┤
//! │  rng/          - SimRng (uniform + Box-Muller)│
//! │  model/        - FactorSet, OutcomeModel      │
//! │  mc/           - SimulationRunner, results    │
//! │  sensitivity/  - one-at-a-time analysis       │
//! │  request/      - boundary adapters, clamping  │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Two external request shapes are supported. A list of weighted
//! [`Assumption`]s is simulated against a threshold (probability mode), and a
//! map of bounded [`Variable`]s is pushed through a decision formula and
//! summarised by percentiles plus sensitivity rows. Both are translated into a
//! single [`FactorSet`] before reaching the runner.
//!
//! ## Example
//!
//! ```rust
//! use sim_engine::{
//!     Assumption, Direction, FactorSet, SimulationConfig, SimulationRunner, WeightedSumModel,
//! };
//!
//! let assumptions = vec![Assumption::new("a1", "Demand", 1.0, 0.0, 1.0, Direction::Positive)];
//! let factors = FactorSet::from_assumptions(&assumptions);
//! let model = WeightedSumModel::from_assumptions(&assumptions);
//!
//! let config = SimulationConfig::builder().iterations(5_000).seed(7).build().unwrap();
//! let result = SimulationRunner::new(config).run_probability(&factors, &model, 0.0);
//!
//! assert_eq!(result.probability_success, 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod mc;
pub mod model;
pub mod request;
pub mod rng;
pub mod sensitivity;

pub use error::{ConfigError, EngineError, ValidationError};
pub use mc::{
    PercentileResult, ProbabilityResult, ProbabilitySummary, SimResult, SimulationConfig,
    SimulationConfigBuilder, SimulationMode, SimulationRunner, SuccessLabel, MAX_ITERATIONS,
};
pub use model::{
    AdditiveModel, Assumption, DecisionModel, Direction, Factor, FactorSet, HiringModel,
    OutcomeModel, Variable, WeightedSumModel,
};
pub use request::{
    analyze_decision, decision_probability, simulate, DecisionReport, DecisionRequest,
    InputLimits, Range, SimulateRequest,
};
pub use rng::SimRng;
pub use sensitivity::{SensitivityAnalyzer, SensitivityRow, SENSITIVITY_DIVISOR};

/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
