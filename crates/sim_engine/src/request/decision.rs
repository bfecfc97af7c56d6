//! Percentile-mode decision analysis with sensitivity ranking.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::limits::InputLimits;
use super::simulate::SimulateRequest;
use crate::error::{EngineError, ValidationError};
use crate::mc::{
    PercentileResult, ProbabilityResult, SimulationConfig, SimulationRunner, SuccessLabel,
};
use crate::model::{Assumption, DecisionModel, Direction, FactorSet, Variable};
use crate::sensitivity::{SensitivityAnalyzer, SensitivityRow};

/// Trial count when a decision request does not name one.
pub const DEFAULT_DECISION_ITERATIONS: usize = 10_000;

/// A named decision over bounded variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// What is being decided.
    pub decision_name: String,
    /// Inputs, in the order they were supplied.
    pub variables: Vec<Variable>,
    /// Base-run trial count.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Seed for a reproducible analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_iterations() -> usize {
    DEFAULT_DECISION_ITERATIONS
}

impl DecisionRequest {
    /// Request with the default trial count and no seed.
    pub fn new(decision_name: impl Into<String>, variables: Vec<Variable>) -> Self {
        Self {
            decision_name: decision_name.into(),
            variables,
            iterations: DEFAULT_DECISION_ITERATIONS,
            seed: None,
        }
    }

    /// Checks the name, that variables exist, that numbers are finite, and
    /// that `min <= max` for every variable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.decision_name.trim().is_empty() {
            return Err(ValidationError::EmptyDecisionName);
        }
        if self.variables.is_empty() {
            return Err(ValidationError::NoVariables);
        }
        for v in &self.variables {
            for (field, value) in [("base", v.base), ("min", v.min), ("max", v.max)] {
                if !value.is_finite() {
                    return Err(ValidationError::NonFinite {
                        variable: v.name.clone(),
                        field,
                    });
                }
            }
            if v.min > v.max {
                return Err(ValidationError::InvertedBounds {
                    variable: v.name.clone(),
                    min: v.min,
                    max: v.max,
                });
            }
        }
        Ok(())
    }

    /// The same inputs as a weighted-assumption request at threshold zero,
    /// for engines that only accept that shape.
    ///
    /// Each variable becomes an enabled, positive, unit-weight assumption
    /// with `mean = base` and `std = (max - min) / 4`, clamped by `limits`.
    /// The resulting score is an unweighted sum of the inputs, not the
    /// decision formula; [`decision_probability`] runs the formula itself.
    pub fn to_simulate_request(&self, limits: &InputLimits) -> SimulateRequest {
        let assumptions = self
            .variables
            .iter()
            .map(|v| Assumption {
                id: v.name.clone(),
                name: v.display_name().to_string(),
                mean: limits.mean.clamp(v.base),
                std: limits.std.clamp(v.derived_std()),
                weight: 1.0,
                direction: Direction::Positive,
                enabled: true,
            })
            .collect();

        SimulateRequest {
            assumptions,
            iterations: limits.iterations(Some(self.iterations as f64)),
            threshold: 0.0,
            seed: self.seed,
        }
    }
}

/// Outcome distribution and sensitivity ranking for one decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    /// Echo of the decision name.
    pub decision_name: String,
    /// Outcome formula that was applied.
    pub model: String,
    /// Base-run distribution.
    pub result: PercentileResult,
    /// Factors by descending impact.
    pub sensitivity: Vec<SensitivityRow>,
}

impl DecisionReport {
    /// Bucket of the probability of a positive outcome.
    pub fn outlook(&self) -> SuccessLabel {
        SuccessLabel::from_probability(self.result.prob_positive)
    }

    /// Plain-text summary for conversational callers.
    pub fn summary_text(&self) -> String {
        let r = &self.result;
        let mut text = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(text, "Decision analysis: {}", self.decision_name);
        let _ = writeln!(text, "Model: {} | Simulations: {}", self.model, r.iterations);
        let _ = writeln!(text);
        let _ = writeln!(text, "Expected outcome: {:.2}", r.mean);
        let _ = writeln!(text, "Median outcome: {:.2}", r.median);
        let _ = writeln!(text, "Range (P10 to P90): {:.2} to {:.2}", r.p10, r.p90);
        let _ = writeln!(
            text,
            "Probability of a positive outcome: {:.1}% ({})",
            r.prob_positive * 100.0,
            self.outlook()
        );

        if !self.sensitivity.is_empty() {
            let _ = writeln!(text);
            let _ = writeln!(text, "Key drivers (largest impact first):");
            for (rank, row) in self.sensitivity.iter().enumerate() {
                let _ = writeln!(
                    text,
                    "  {}. {}: {:.1}% impact (outcome {:.2} at {} -> {:.2} at {})",
                    rank + 1,
                    row.variable,
                    row.impact_percent,
                    row.outcome_at_low,
                    row.min,
                    row.outcome_at_high,
                    row.max,
                );
            }
        }

        text.trim_end().to_string()
    }
}

/// Validates `request`, runs the base simulation, then the sensitivity pass.
///
/// # Errors
///
/// `EngineError::Validation` for rejected inputs; `EngineError::Config` when
/// `iterations` is outside the runner bounds.
pub fn analyze_decision(request: &DecisionRequest) -> Result<DecisionReport, EngineError> {
    request.validate()?;

    let config = SimulationConfig::builder()
        .iterations(request.iterations)
        .maybe_seed(request.seed)
        .build()?;

    let factors = FactorSet::from_variables(&request.variables);
    let model = DecisionModel::for_factors(&factors);

    let result = SimulationRunner::new(config.clone()).run_percentiles(&factors, &model);
    let sensitivity = SensitivityAnalyzer::new(config).analyze(&factors, &model, &result);

    Ok(DecisionReport {
        decision_name: request.decision_name.clone(),
        model: model.name().to_string(),
        result,
        sensitivity,
    })
}

/// Probability that the decision's outcome formula comes out above zero.
///
/// Runs the base configuration of [`analyze_decision`] in probability mode,
/// so with a seed `probability_success` equals the report's `prob_positive`.
///
/// # Errors
///
/// Same as [`analyze_decision`].
pub fn decision_probability(request: &DecisionRequest) -> Result<ProbabilityResult, EngineError> {
    request.validate()?;

    let config = SimulationConfig::builder()
        .iterations(request.iterations)
        .maybe_seed(request.seed)
        .build()?;

    let factors = FactorSet::from_variables(&request.variables);
    let model = DecisionModel::for_factors(&factors);

    Ok(SimulationRunner::new(config).run_probability(&factors, &model, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hiring_request() -> DecisionRequest {
        let mut request = DecisionRequest::new(
            "Hire a second support engineer",
            vec![
                Variable::new("salary", 90_000.0, 80_000.0, 100_000.0),
                Variable::new("overhead_pct", 0.25, 0.2, 0.3),
                Variable::new("productivity", 0.8, 0.6, 1.0),
                Variable::new("ramp_months", 3.0, 1.0, 6.0),
                Variable::new("value_per_year", 180_000.0, 120_000.0, 240_000.0),
            ],
        );
        request.seed = Some(2024);
        request
    }

    #[test]
    fn test_validate_rejects_bad_requests() {
        let mut request = hiring_request();
        request.decision_name = "  ".to_string();
        assert_eq!(request.validate(), Err(ValidationError::EmptyDecisionName));

        let request = DecisionRequest::new("x", Vec::new());
        assert_eq!(request.validate(), Err(ValidationError::NoVariables));

        let request = DecisionRequest::new("x", vec![Variable::new("a", f64::NAN, 0.0, 1.0)]);
        assert!(matches!(
            request.validate(),
            Err(ValidationError::NonFinite { field: "base", .. })
        ));

        let request = DecisionRequest::new("x", vec![Variable::new("a", 1.0, 2.0, 0.0)]);
        assert!(matches!(
            request.validate(),
            Err(ValidationError::InvertedBounds { .. })
        ));

        assert!(hiring_request().validate().is_ok());
    }

    #[test]
    fn test_analyze_hiring_decision() {
        let report = analyze_decision(&hiring_request()).unwrap();

        assert_eq!(report.model, "hiring");
        assert_eq!(report.result.iterations, DEFAULT_DECISION_ITERATIONS);
        assert_eq!(report.sensitivity.len(), 5);
        assert!(report.result.p10 <= report.result.median);
        assert!(report.result.median <= report.result.p90);
        // value_per_year has by far the widest swing
        assert_eq!(report.sensitivity[0].variable, "value_per_year");
        for pair in report.sensitivity.windows(2) {
            assert!(pair[0].impact_percent >= pair[1].impact_percent);
        }
    }

    #[test]
    fn test_analyze_is_deterministic_with_seed() {
        let a = analyze_decision(&hiring_request()).unwrap();
        let b = analyze_decision(&hiring_request()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_analyze_rejects_invalid() {
        let request = DecisionRequest::new("", vec![Variable::new("a", 1.0, 0.0, 2.0)]);
        assert!(matches!(
            analyze_decision(&request),
            Err(EngineError::Validation(ValidationError::EmptyDecisionName))
        ));
    }

    #[test]
    fn test_zero_spread_decision() {
        let mut request = DecisionRequest::new(
            "Fixed costs",
            vec![
                Variable::new("salary", 100.0, 100.0, 100.0),
                Variable::new("productivity", 1.0, 1.0, 1.0),
                Variable::new("value_per_year", 150.0, 150.0, 150.0),
            ],
        );
        request.iterations = 2_000;

        let report = analyze_decision(&request).unwrap();

        assert_relative_eq!(report.result.mean, 50.0);
        assert_eq!(report.result.prob_positive, 1.0);
        assert!(report.sensitivity.iter().all(|r| r.impact_percent == 0.0));
        let order: Vec<&str> = report.sensitivity.iter().map(|r| r.variable.as_str()).collect();
        assert_eq!(order, vec!["salary", "productivity", "value_per_year"]);
    }

    #[test]
    fn test_summary_text_mentions_drivers() {
        let report = analyze_decision(&hiring_request()).unwrap();
        let text = report.summary_text();

        assert!(text.starts_with("Decision analysis: Hire a second support engineer"));
        assert!(text.contains("Expected outcome:"));
        assert!(text.contains("Range (P10 to P90):"));
        assert!(text.contains("Key drivers"));
        assert!(text.contains("1. value_per_year"));
    }

    #[test]
    fn test_to_simulate_request() {
        let mut request = DecisionRequest::new(
            "x",
            vec![Variable {
                name: "growth".to_string(),
                base: 5.0,
                min: 1.0,
                max: 9.0,
                label: Some("Growth rate".to_string()),
            }],
        );
        request.iterations = 50;
        request.seed = Some(3);

        let sim = request.to_simulate_request(&InputLimits::default());

        assert_eq!(sim.iterations, 1_000);
        assert_eq!(sim.threshold, 0.0);
        assert_eq!(sim.seed, Some(3));
        let a = &sim.assumptions[0];
        assert_eq!(a.id, "growth");
        assert_eq!(a.name, "Growth rate");
        assert_eq!((a.mean, a.std, a.weight), (5.0, 2.0, 1.0));
        assert!(a.enabled);
    }

    #[test]
    fn test_decision_request_serde_defaults() {
        let request: DecisionRequest = serde_json::from_str(
            r#"{"decision_name": "d", "variables": [{"name": "a", "base": 1, "min": 0, "max": 2}]}"#,
        )
        .unwrap();
        assert_eq!(request.iterations, DEFAULT_DECISION_ITERATIONS);
        assert_eq!(request.seed, None);
        assert_eq!(request.variables[0].label, None);
    }

    fn loss_making_request() -> DecisionRequest {
        let mut request = DecisionRequest::new(
            "Hire without enough work",
            vec![
                Variable::new("salary", 200_000.0, 190_000.0, 210_000.0),
                Variable::new("productivity", 1.0, 1.0, 1.0),
                Variable::new("value_per_year", 100_000.0, 100_000.0, 100_000.0),
            ],
        );
        request.seed = Some(1);
        request
    }

    #[test]
    fn test_decision_probability_follows_outcome_formula() {
        let request = loss_making_request();

        let report = analyze_decision(&request).unwrap();
        let probability = decision_probability(&request).unwrap();

        assert!(report.result.mean < -90_000.0);
        assert_eq!(report.outlook(), SuccessLabel::Low);
        assert_eq!(probability.probability_success, 0.0);
        assert_eq!(probability.label, SuccessLabel::Low);
        assert_eq!(probability.summary.threshold, 0.0);
        assert_eq!(probability.summary.enabled_count, 3);
    }

    #[test]
    fn test_decision_probability_matches_report_when_seeded() {
        let request = hiring_request();

        let report = analyze_decision(&request).unwrap();
        let probability = decision_probability(&request).unwrap();

        assert_eq!(probability.iterations, report.result.iterations);
        assert_eq!(
            probability.probability_success.to_bits(),
            report.result.prob_positive.to_bits()
        );
        assert_eq!(probability.label, report.outlook());
    }

    #[test]
    fn test_decision_probability_rejects_invalid() {
        let request = DecisionRequest::new("x", Vec::new());
        assert!(matches!(
            decision_probability(&request),
            Err(EngineError::Validation(ValidationError::NoVariables))
        ));
    }
}
