//! Analyze command implementation
//!
//! Runs a decision analysis with sensitivity ranking over a decision file.
//!
//! The file holds `decision_name` and `variables`, where `variables` maps each
//! name to `{base, min, max, label?}` in the order the drivers should appear.

use serde_json::Value;
use sim_engine::{analyze_decision, DecisionReport, DecisionRequest, Variable};
use tracing::info;

use super::read_json;
use crate::{CliError, Result};

/// Run the analyze command
pub fn run(input: &str, iterations: Option<usize>, seed: Option<u64>, format: &str) -> Result<()> {
    let output = execute(input, iterations, seed, format)?;
    println!("{}", output);
    Ok(())
}

fn execute(
    input: &str,
    iterations: Option<usize>,
    seed: Option<u64>,
    format: &str,
) -> Result<String> {
    info!("Starting decision analysis...");
    info!("  Input: {}", input);

    let mut request = parse_decision(&read_json(input)?)?;
    if let Some(iterations) = iterations {
        request.iterations = iterations;
    }
    if seed.is_some() {
        request.seed = seed;
    }

    info!(
        decision = %request.decision_name,
        variables = request.variables.len(),
        iterations = request.iterations,
        seed = ?request.seed,
        "Decision loaded"
    );

    let report = analyze_decision(&request)?;
    info!(model = %report.model, "Analysis complete");

    render(&report, format)
}

/// Builds a request from the decision file layout.
pub fn parse_decision(body: &Value) -> Result<DecisionRequest> {
    let decision_name = body
        .get("decision_name")
        .and_then(Value::as_str)
        .ok_or_else(|| CliError::InvalidArgument("decision_name must be a string".to_string()))?;

    let entries = body
        .get("variables")
        .and_then(Value::as_object)
        .ok_or_else(|| CliError::InvalidArgument("variables must be an object".to_string()))?;

    let mut variables = Vec::with_capacity(entries.len());
    for (name, spec) in entries {
        let field = |key: &str| {
            spec.get(key).and_then(Value::as_f64).ok_or_else(|| {
                CliError::InvalidArgument(format!("variable '{}': {} must be a number", name, key))
            })
        };
        let mut variable = Variable::new(name.clone(), field("base")?, field("min")?, field("max")?);
        variable.label = spec.get("label").and_then(Value::as_str).map(str::to_string);
        variables.push(variable);
    }

    let mut request = DecisionRequest::new(decision_name, variables);
    if let Some(iterations) = body.get("iterations").and_then(Value::as_u64) {
        request.iterations = iterations as usize;
    }
    request.seed = body.get("seed").and_then(Value::as_u64);
    Ok(request)
}

/// Formats a report as `text` or `json`.
pub fn render(report: &DecisionReport, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(report)?),
        "text" => Ok(text(report)),
        other => Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: text, json",
            other
        ))),
    }
}

fn text(report: &DecisionReport) -> String {
    let mut lines = vec![report.summary_text(), String::new()];

    lines.push(format!(
        "{:<20} {:>12} {:>12} {:>14} {:>14} {:>9}",
        "Variable", "Min", "Max", "Outcome @min", "Outcome @max", "Impact"
    ));
    lines.push("-".repeat(86));
    for row in &report.sensitivity {
        lines.push(format!(
            "{:<20} {:>12.2} {:>12.2} {:>14.2} {:>14.2} {:>8.1}%",
            row.variable, row.min, row.max, row.outcome_at_low, row.outcome_at_high, row.impact_percent
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::write_temp;
    use approx::assert_relative_eq;
    use serde_json::json;

    const HIRING: &str = r#"{
        "decision_name": "Hire a data engineer",
        "variables": {
            "salary": {"base": 120000, "min": 100000, "max": 140000},
            "overhead_pct": {"base": 0.3, "min": 0.2, "max": 0.4},
            "productivity": {"base": 1.0, "min": 0.7, "max": 1.2},
            "ramp_months": {"base": 3, "min": 1, "max": 6},
            "value_per_year": {"base": 220000, "min": 150000, "max": 300000, "label": "Value delivered"}
        }
    }"#;

    #[test]
    fn test_parse_decision_preserves_order_and_labels() {
        let request = parse_decision(&serde_json::from_str(HIRING).unwrap()).unwrap();

        let names: Vec<&str> = request.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            ["salary", "overhead_pct", "productivity", "ramp_months", "value_per_year"]
        );
        assert_eq!(request.variables[4].label.as_deref(), Some("Value delivered"));
        assert_relative_eq!(request.variables[1].derived_std(), 0.05, epsilon = 1e-12);
        assert_eq!(request.seed, None);
    }

    #[test]
    fn test_parse_decision_rejects_missing_fields() {
        let err = parse_decision(&json!({"variables": {}})).unwrap_err();
        assert!(err.to_string().contains("decision_name"));

        let err = parse_decision(&json!({
            "decision_name": "x",
            "variables": {"cost": {"base": 1, "min": "low", "max": 2}}
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: variable 'cost': min must be a number"
        );
    }

    #[test]
    fn test_text_output() {
        let path = write_temp("analyze_hiring.json", HIRING);

        let output = execute(path.to_str().unwrap(), Some(4000), Some(8), "text").unwrap();

        assert!(output.starts_with("Decision analysis: Hire a data engineer"));
        assert!(output.contains("Model: hiring | Simulations: 4000"));
        assert!(output.contains("Outcome @min"));
        assert!(output.matches('%').count() >= 5);
    }

    #[test]
    fn test_json_output_is_reproducible() {
        let path = write_temp("analyze_json.json", HIRING);
        let path = path.to_str().unwrap();

        let a = execute(path, Some(2000), Some(3), "json").unwrap();
        let b = execute(path, Some(2000), Some(3), "json").unwrap();
        assert_eq!(a, b);

        let json: Value = serde_json::from_str(&a).unwrap();
        assert_eq!(json["model"], "hiring");
        assert_eq!(json["sensitivity"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_validation_error_surfaces() {
        let path = write_temp(
            "analyze_inverted.json",
            r#"{"decision_name": "x", "variables": {"a": {"base": 1, "min": 3, "max": 2}}}"#,
        );
        let err = execute(path.to_str().unwrap(), None, None, "text").unwrap_err();
        assert!(matches!(err, CliError::Engine(_)));
    }

    #[test]
    fn test_iterations_out_of_range() {
        let path = write_temp("analyze_iters.json", HIRING);
        let err = execute(path.to_str().unwrap(), Some(0), None, "text").unwrap_err();
        assert!(matches!(err, CliError::Engine(_)));
    }
}
