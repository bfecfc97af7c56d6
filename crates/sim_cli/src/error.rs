//! CLI error types.

use thiserror::Error;

/// Errors surfaced by `sim` subcommands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Input file not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Simulation rejected: {0}")]
    Engine(#[from] sim_engine::EngineError),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
