//! End-to-end properties of the simulation engine.
//!
//! # Test Categories
//!
//! 1. **Scenarios**: certain outcomes, disabled inputs, zero-spread decisions
//! 2. **Determinism**: seeded runs are bit-identical
//! 3. **Statistical**: monotonicity in an assumption's mean
//! 4. **Properties**: probability range and percentile ordering

use proptest::prelude::*;
use serde_json::json;
use sim_engine::{
    analyze_decision, simulate, Assumption, DecisionRequest, Direction, FactorSet, InputLimits,
    SimulateRequest, SimulationConfig, SimulationRunner, SuccessLabel, Variable, WeightedSumModel,
};

fn request(body: serde_json::Value) -> SimulateRequest {
    SimulateRequest::from_json(&body, &InputLimits::default())
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_single_positive_assumption_always_succeeds() {
    let result = simulate(&request(json!({
        "iterations": 50000,
        "threshold": 0,
        "assumptions": [{"mean": 1, "std": 0, "weight": 1, "direction": "positive", "enabled": true}]
    })))
    .unwrap();

    assert_eq!(result.probability_success, 1.0);
    assert_eq!(result.label, SuccessLabel::High);
}

#[test]
fn test_single_negative_assumption_never_succeeds() {
    let result = simulate(&request(json!({
        "iterations": 50000,
        "threshold": 0,
        "assumptions": [{"mean": 1, "std": 0, "weight": 1, "direction": "negative", "enabled": true}]
    })))
    .unwrap();

    assert_eq!(result.probability_success, 0.0);
    assert_eq!(result.label, SuccessLabel::Low);
}

#[test]
fn test_all_disabled_scores_zero() {
    let assumptions = json!([
        {"mean": 10, "std": 3, "weight": 2, "enabled": false},
        {"mean": -4, "std": 1, "weight": 5, "direction": "negative", "enabled": false}
    ]);

    let below = simulate(&request(json!({"assumptions": assumptions, "threshold": -1}))).unwrap();
    assert_eq!(below.probability_success, 1.0);

    let at = simulate(&request(json!({"assumptions": assumptions, "threshold": 0}))).unwrap();
    assert_eq!(at.probability_success, 0.0);

    let above = simulate(&request(json!({"assumptions": assumptions, "threshold": 3}))).unwrap();
    assert_eq!(above.probability_success, 0.0);
    assert_eq!(above.summary.enabled_count, 0);
}

#[test]
fn test_zero_spread_variables_have_zero_impact() {
    let report = analyze_decision(&DecisionRequest::new(
        "Fixed inputs",
        vec![
            Variable::new("salary", 100.0, 100.0, 100.0),
            Variable::new("value_per_year", 300.0, 300.0, 300.0),
            Variable::new("ramp_months", 2.0, 2.0, 2.0),
        ],
    ))
    .unwrap();

    assert!(report.result.mean != 0.0);
    assert!(report.sensitivity.iter().all(|r| r.impact_percent == 0.0));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_seeded_simulation_is_bit_identical() {
    let body = json!({
        "iterations": 20000,
        "threshold": 0.5,
        "seed": 123456,
        "assumptions": [
            {"mean": 0.4, "std": 1.0, "weight": 1.0},
            {"mean": 0.2, "std": 0.5, "weight": 2.0, "direction": "negative"},
            {"mean": 1.0, "std": 2.0, "weight": 0.5}
        ]
    });

    let a = simulate(&request(body.clone())).unwrap();
    let b = simulate(&request(body)).unwrap();

    assert_eq!(a.probability_success.to_bits(), b.probability_success.to_bits());
}

// ============================================================================
// Statistical
// ============================================================================

#[test]
fn test_raising_positive_mean_does_not_lower_success() {
    let run = |mean: f64| {
        let assumptions = vec![
            Assumption::new("a", "A", mean, 1.0, 1.0, Direction::Positive),
            Assumption::new("b", "B", 0.5, 1.0, 1.0, Direction::Negative),
        ];
        let config = SimulationConfig::builder()
            .iterations(200_000)
            .seed(77)
            .build()
            .unwrap();
        SimulationRunner::new(config)
            .run_probability(
                &FactorSet::from_assumptions(&assumptions),
                &WeightedSumModel::from_assumptions(&assumptions),
                0.0,
            )
            .probability_success
    };

    let mut previous = run(-1.0);
    for mean in [-0.5, 0.0, 0.5, 1.0, 1.5] {
        let current = run(mean);
        assert!(
            current + 0.005 >= previous,
            "success fell from {} to {} at mean {}",
            previous,
            current,
            mean
        );
        previous = current;
    }
}

// ============================================================================
// Properties
// ============================================================================

fn assumption_strategy() -> impl Strategy<Value = Assumption> {
    (-50.0..50.0f64, 0.0..20.0f64, 0.0..5.0f64, any::<bool>(), any::<bool>()).prop_map(
        |(mean, std, weight, negative, enabled)| {
            let direction = if negative {
                Direction::Negative
            } else {
                Direction::Positive
            };
            Assumption::new("p", "P", mean, std, weight, direction).with_enabled(enabled)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn prop_probability_in_unit_interval(
        assumptions in prop::collection::vec(assumption_strategy(), 0..6),
        threshold in -100.0..100.0f64,
        seed in any::<u64>(),
    ) {
        let result = simulate(&SimulateRequest {
            assumptions,
            iterations: 1_000,
            threshold,
            seed: Some(seed),
        }).unwrap();

        prop_assert!((0.0..=1.0).contains(&result.probability_success));
        prop_assert_eq!(result.label, SuccessLabel::from_probability(result.probability_success));
    }

    #[test]
    fn prop_percentiles_are_ordered(
        assumptions in prop::collection::vec(assumption_strategy(), 1..6),
        iterations in 1..3_000usize,
        seed in any::<u64>(),
    ) {
        let config = SimulationConfig::builder().iterations(iterations).seed(seed).build().unwrap();
        let result = SimulationRunner::new(config).run_percentiles(
            &FactorSet::from_assumptions(&assumptions),
            &WeightedSumModel::from_assumptions(&assumptions),
        );

        prop_assert!(result.p10 <= result.median);
        prop_assert!(result.median <= result.p90);
        prop_assert!((0.0..=1.0).contains(&result.prob_positive));
        prop_assert_eq!(result.iterations, iterations);
    }
}
