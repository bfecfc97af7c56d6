//! Error types for the simulation engine.
//!
//! - `ConfigError`: invalid runner configuration
//! - `ValidationError`: rejected decision inputs at the tool boundary
//! - `EngineError`: either of the above, returned by the request helpers
//!
//! Nothing inside the Monte Carlo loop returns an error; both types are
//! raised before a run starts.

use thiserror::Error;

/// Configuration error for [`SimulationRunner`](crate::SimulationRunner).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Iteration count outside `[1, MAX_ITERATIONS]`.
    #[error("Invalid iteration count {0}: must be in range [1, {max}]", max = crate::MAX_ITERATIONS)]
    InvalidIterations(usize),

    /// A required parameter was not supplied to the builder.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Validation failure for a decision request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The decision name is empty or whitespace.
    #[error("decision_name must not be empty")]
    EmptyDecisionName,

    /// No variables were supplied.
    #[error("variables must contain at least one entry")]
    NoVariables,

    /// A numeric field is NaN or infinite.
    #[error("variable '{variable}': {field} must be a finite number")]
    NonFinite {
        /// Variable name.
        variable: String,
        /// Offending field.
        field: &'static str,
    },

    /// The lower bound exceeds the upper bound.
    #[error("variable '{variable}': min ({min}) must not exceed max ({max})")]
    InvertedBounds {
        /// Variable name.
        variable: String,
        /// Supplied lower bound.
        min: f64,
        /// Supplied upper bound.
        max: f64,
    },
}

/// Failure of a request helper in [`request`](crate::request).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Runner configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Decision inputs rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
