//! Probability-mode requests from the simulation endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::limits::InputLimits;
use crate::error::EngineError;
use crate::mc::{ProbabilityResult, SimulationConfig, SimulationRunner};
use crate::model::{Assumption, Direction, FactorSet, WeightedSumModel};

/// Sanitised simulation request.
///
/// Serialises to the same JSON shape the simulation endpoint accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateRequest {
    /// Inputs, enabled or not.
    pub assumptions: Vec<Assumption>,
    /// Trial count.
    pub iterations: usize,
    /// Success threshold.
    pub threshold: f64,
    /// Seed for a reproducible run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimulateRequest {
    /// Builds a request from any JSON value. Never fails.
    ///
    /// Missing fields take their defaults, numeric strings are parsed, and
    /// any other non-numeric value is treated as NaN (and so clamps to the
    /// range minimum). A body that is not an object yields the defaults.
    pub fn from_json(body: &Value, limits: &InputLimits) -> Self {
        let assumptions = body
            .get("assumptions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| assumption_from_json(index, item, limits))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            assumptions,
            iterations: limits.iterations(lenient_number(body.get("iterations"))),
            threshold: limits.threshold.coerce(lenient_number(body.get("threshold"))),
            seed: lenient_seed(body.get("seed")),
        }
    }

    /// Number of assumptions that will take part.
    pub fn enabled_count(&self) -> usize {
        self.assumptions.iter().filter(|a| a.enabled).count()
    }
}

/// Runs a probability-mode simulation for `request`.
///
/// # Errors
///
/// `EngineError::Config` when `iterations` is outside the runner bounds,
/// which cannot happen for a request built by [`SimulateRequest::from_json`].
pub fn simulate(request: &SimulateRequest) -> Result<ProbabilityResult, EngineError> {
    let config = SimulationConfig::builder()
        .iterations(request.iterations)
        .maybe_seed(request.seed)
        .build()?;

    let factors = FactorSet::from_assumptions(&request.assumptions);
    let model = WeightedSumModel::from_assumptions(&request.assumptions);

    Ok(SimulationRunner::new(config).run_probability(&factors, &model, request.threshold))
}

fn assumption_from_json(index: usize, item: &Value, limits: &InputLimits) -> Assumption {
    let id = match item.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("a{}", index + 1),
    };
    let name = item
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| id.clone());

    let direction = match item.get("direction").and_then(Value::as_str) {
        Some(d) if d.eq_ignore_ascii_case("negative") => Direction::Negative,
        _ => Direction::Positive,
    };

    Assumption {
        id,
        name,
        mean: limits.mean.coerce(lenient_number(item.get("mean"))),
        std: limits.std.coerce(lenient_number(item.get("std"))),
        weight: limits.weight.coerce(lenient_number(item.get("weight"))),
        direction,
        enabled: lenient_bool(item.get("enabled"), true),
    }
}

/// `None` when absent or null; NaN for anything that is not a number.
fn lenient_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => Some(s.trim().parse::<f64>().unwrap_or(f64::NAN)),
        _ => Some(f64::NAN),
    }
}

fn lenient_bool(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|x| x != 0.0),
        Some(Value::String(s)) => !matches!(s.trim().to_ascii_lowercase().as_str(), "false" | "0" | ""),
        _ => default,
    }
}

fn lenient_seed(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|x| x.is_finite()).map(|x| x.abs().trunc() as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
