//! Check command implementation
//!
//! Prints the engine version and the clamping ranges applied to simulation input.

use sim_engine::{InputLimits, Range, MAX_ITERATIONS, SENSITIVITY_DIVISOR};

use crate::Result;

/// Run the check command
pub fn run() -> Result<()> {
    println!("{}", report());
    Ok(())
}

fn report() -> String {
    let limits = InputLimits::default();
    let row = |name: &str, range: &Range| {
        format!(
            "  {:<11} [{}, {}] default {}",
            name, range.min, range.max, range.default
        )
    };

    [
        format!("sim v{} (engine v{})", env!("CARGO_PKG_VERSION"), sim_engine::VERSION),
        String::new(),
        "Input limits:".to_string(),
        row("iterations", &limits.iterations),
        row("threshold", &limits.threshold),
        row("mean", &limits.mean),
        row("std", &limits.std),
        row("weight", &limits.weight),
        String::new(),
        format!("Runner iteration cap: {}", MAX_ITERATIONS),
        format!("Sensitivity runs use iterations / {}", SENSITIVITY_DIVISOR),
    ]
    .join("\n")
}
