//! Boundary adapters between external request shapes and the engine.
//!
//! - [`SimulateRequest`]: weighted assumptions plus a threshold. Built from
//!   arbitrary JSON with every numeric field clamped into [`InputLimits`], so
//!   malformed input degrades instead of failing.
//! - [`DecisionRequest`]: named, bounded variables for a decision formula.
//!   Validated strictly; the tool surface rejects bad shapes up front.

mod decision;
mod limits;
mod simulate;

pub use decision::{
    analyze_decision, decision_probability, DecisionReport, DecisionRequest,
    DEFAULT_DECISION_ITERATIONS,
};
pub use limits::{InputLimits, Range};
pub use simulate::{simulate, SimulateRequest};
