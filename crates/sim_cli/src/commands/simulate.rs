//! Simulate command implementation
//!
//! Runs a probability-mode simulation over a file of weighted assumptions.

use sim_engine::{simulate, InputLimits, ProbabilityResult, SimulateRequest};
use tracing::info;

use super::read_json;
use crate::{CliError, Result};

/// Run the simulate command
pub fn run(input: &str, seed: Option<u64>, format: &str) -> Result<()> {
    let output = execute(input, seed, format)?;
    println!("{}", output);
    Ok(())
}

fn execute(input: &str, seed: Option<u64>, format: &str) -> Result<String> {
    info!("Starting simulation...");
    info!("  Input: {}", input);

    let body = read_json(input)?;
    let mut request = SimulateRequest::from_json(&body, &InputLimits::default());
    if seed.is_some() {
        request.seed = seed;
    }

    info!(
        iterations = request.iterations,
        enabled = request.enabled_count(),
        seed = ?request.seed,
        "Request loaded"
    );

    let result = simulate(&request)?;
    info!("Simulation complete");

    render(&request, &result, format)
}

/// Formats a result as `json` or `table`.
pub fn render(request: &SimulateRequest, result: &ProbabilityResult, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(result)?),
        "table" => Ok(table(request, result)),
        other => Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: json, table",
            other
        ))),
    }
}

fn table(request: &SimulateRequest, result: &ProbabilityResult) -> String {
    let rows = [
        ("Iterations", result.iterations.to_string()),
        ("Threshold", format!("{:.2}", result.summary.threshold)),
        (
            "Enabled",
            format!("{} of {}", result.summary.enabled_count, request.assumptions.len()),
        ),
        (
            "P(success)",
            format!("{:.1}%", result.probability_success * 100.0),
        ),
        ("Label", result.label.to_string()),
    ];

    let mut lines = vec![
        "┌──────────────┬──────────────┐".to_string(),
        "│ Metric       │ Value        │".to_string(),
        "├──────────────┼──────────────┤".to_string(),
    ];
    for (metric, value) in rows {
        lines.push(format!("│ {:<12} │ {:>12} │", metric, value));
    }
    lines.push("└──────────────┴──────────────┘".to_string());
    lines.join("\n")
}
