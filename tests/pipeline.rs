//! End-to-end pipeline tests for the forecast engine.

use chrono::NaiveDate;
use demandcast::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// 90 days of daily revenue rising linearly from 100 to 190, no noise.
fn linear_observations() -> Vec<Observation> {
    (0..90)
        .map(|i| {
            Observation::new(
                base_date() + chrono::Duration::days(i),
                100.0 + i as f64,
                10 + i as u64 / 10,
            )
        })
        .collect()
}

fn request(model_type: ModelType) -> ForecastRequest {
    ForecastRequest {
        series_id: "sku-42".to_string(),
        model_type,
        period_granularity: Granularity::Daily,
        horizon_periods: 7,
        lookback_periods: 30,
    }
}

#[test]
fn trend_forecast_continues_a_linear_series() {
    let orchestrator = ForecastOrchestrator::default();
    let result = orchestrator
        .forecast(&request(ModelType::Trend), &linear_observations())
        .unwrap();

    assert_eq!(result.predictions.len(), 7);

    // Strictly increasing revenue, confidence exactly 0.8.
    for w in result.predictions.windows(2) {
        assert!(w[1].predicted_revenue > w[0].predicted_revenue);
    }
    for p in &result.predictions {
        assert_eq!(p.confidence, 0.8);
    }

    // The smoothed forecast should track the true line (190 + h) within
    // the smoothing lag.
    let first = result.predictions[0].predicted_revenue;
    assert!((first - 191.0).abs() < 5.0, "first prediction {first}");
}

#[test]
fn every_model_type_satisfies_the_output_invariants() {
    let orchestrator = ForecastOrchestrator::default();
    let observations = linear_observations();

    for model_type in [
        ModelType::Trend,
        ModelType::Autoregressive,
        ModelType::Seasonal,
        ModelType::Ensemble,
    ] {
        let result = orchestrator
            .forecast(&request(model_type), &observations)
            .unwrap();

        assert_eq!(result.predictions.len(), 7);
        for w in result.predictions.windows(2) {
            assert!(w[0].period_start < w[1].period_start);
        }
        for p in &result.predictions {
            assert!(p.lower_bound >= 0.0);
            assert!(p.lower_bound <= p.predicted_revenue);
            assert!(p.predicted_revenue <= p.upper_bound);
            assert!(p.predicted_quantity >= 0.0);
            assert!((0.0..=1.0).contains(&p.confidence));
        }
    }
}

#[test]
fn forecasts_are_bit_identical_across_invocations() {
    let orchestrator = ForecastOrchestrator::default();
    let observations = linear_observations();

    for model_type in [ModelType::Ensemble, ModelType::Autoregressive] {
        let a = orchestrator
            .forecast(&request(model_type), &observations)
            .unwrap();
        let b = orchestrator
            .forecast(&request(model_type), &observations)
            .unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn minimum_data_gate_at_thirty_periods() {
    let orchestrator = ForecastOrchestrator::default();

    let make = |n: i64| -> Vec<Observation> {
        (0..n)
            .map(|i| Observation::new(base_date() + chrono::Duration::days(i), 100.0, 10))
            .collect()
    };

    let err = orchestrator
        .forecast(&request(ModelType::Trend), &make(29))
        .unwrap_err();
    assert_eq!(err.kind(), "InsufficientDataError");

    assert!(orchestrator
        .forecast(&request(ModelType::Trend), &make(30))
        .is_ok());
}

#[test]
fn weekly_granularity_steps_by_whole_weeks() {
    let orchestrator = ForecastOrchestrator::default();
    // ~9 months of daily data -> enough distinct ISO weeks.
    let observations: Vec<Observation> = (0..280)
        .map(|i| {
            Observation::new(
                base_date() + chrono::Duration::days(i),
                50.0 + (i % 7) as f64,
                5,
            )
        })
        .collect();

    let mut req = request(ModelType::Seasonal);
    req.period_granularity = Granularity::Weekly;

    let result = orchestrator.forecast(&req, &observations).unwrap();

    for w in result.predictions.windows(2) {
        assert_eq!(w[1].period_start - w[0].period_start, chrono::Duration::weeks(1));
    }
}

#[test]
fn ensemble_reports_autoregressive_diagnostics() {
    let orchestrator = ForecastOrchestrator::default();
    let result = orchestrator
        .forecast(&request(ModelType::Ensemble), &linear_observations())
        .unwrap();

    let d = result.diagnostics.expect("AR member should contribute");
    assert!(d.aic.is_finite());
    assert!(d.bic.is_finite());
    assert!(result.excluded_models.is_empty());
}

#[test]
fn accuracy_self_check_is_reported() {
    let orchestrator = ForecastOrchestrator::default();
    let result = orchestrator
        .forecast(&request(ModelType::Trend), &linear_observations())
        .unwrap();

    let accuracy = result.accuracy.expect("holdout overlap always exists");
    assert_eq!(accuracy.evaluated_periods, 7);
    assert!(accuracy.rmse >= 0.0);
    assert!(accuracy.mae >= 0.0);
    assert!(accuracy.mape >= 0.0);
    assert!(accuracy.r2_score <= 1.0);
}

#[test]
fn cancellation_aborts_between_phases() {
    let orchestrator = ForecastOrchestrator::default();
    let token = CancelToken::new();
    token.cancel();

    let err = orchestrator
        .forecast_with_cancel(&request(ModelType::Ensemble), &linear_observations(), &token)
        .unwrap_err();
    assert!(matches!(err, ForecastError::Cancelled { .. }));
}

#[test]
fn result_serializes_to_the_wire_shape() {
    let orchestrator = ForecastOrchestrator::default();
    let result = orchestrator
        .forecast(&request(ModelType::Ensemble), &linear_observations())
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();

    let predictions = json["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 7);
    for p in predictions {
        assert!(p.get("periodStart").is_some());
        assert!(p.get("predictedRevenue").is_some());
        assert!(p.get("predictedQuantity").is_some());
        assert!(p.get("confidence").is_some());
        assert!(p.get("lowerBound").is_some());
        assert!(p.get("upperBound").is_some());
    }

    let accuracy = &json["accuracy"];
    for field in ["mape", "rmse", "mae", "r2Score", "evaluatedPeriods", "degenerate"] {
        assert!(accuracy.get(field).is_some(), "missing accuracy field {field}");
    }

    let window = &json["trainingWindow"];
    assert!(window.get("start").is_some());
    assert!(window.get("end").is_some());
    assert!(window.get("observationCount").is_some());
}
