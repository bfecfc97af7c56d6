//! Independent-variable model shared by every simulation.
//!
//! The two request shapes (weighted assumptions and bounded decision
//! variables) are both reduced to a [`FactorSet`]. Turning one trial's samples
//! into a scalar outcome is the job of an [`OutcomeModel`], injected into the
//! runner rather than hard-coded.
//!
//! ```text
//! Assumption[] ──┐                      ┌── WeightedSumModel
//!                ├──> FactorSet ──> samples ──> OutcomeModel ──> outcome
//! Variable[]  ───┘                      └── HiringModel / AdditiveModel
//! ```

mod factor;
mod outcome;

pub use factor::{Assumption, Direction, Factor, FactorSet, Variable};
pub use outcome::{AdditiveModel, DecisionModel, HiringModel, OutcomeModel, WeightedSumModel};
