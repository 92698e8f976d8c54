//! Forecast output structures handed to the persistence collaborator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{ForecastRequest, ModelType};

/// One forecasted period.
///
/// Invariant: `0 <= lower_bound <= predicted_revenue <= upper_bound` and
/// `predicted_quantity >= 0`. Use [`PredictionPoint::clamped`] so the
/// invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPoint {
    pub period_start: NaiveDate,
    pub predicted_revenue: f64,
    pub predicted_quantity: f64,
    /// Model confidence in [0, 1].
    pub confidence: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl PredictionPoint {
    /// Build a point with the bound invariant enforced.
    ///
    /// Revenue, quantity and bounds are clamped to be non-negative, and the
    /// bounds are widened if necessary so they bracket the point estimate.
    pub fn clamped(
        period_start: NaiveDate,
        revenue: f64,
        quantity: f64,
        confidence: f64,
        lower: f64,
        upper: f64,
    ) -> Self {
        let predicted_revenue = revenue.max(0.0);
        let lower_bound = lower.max(0.0).min(predicted_revenue);
        let upper_bound = upper.max(predicted_revenue);
        Self {
            period_start,
            predicted_revenue,
            predicted_quantity: quantity.max(0.0),
            confidence: confidence.clamp(0.0, 1.0),
            lower_bound,
            upper_bound,
        }
    }
}

/// Forecast accuracy scored against held-out actuals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyMetrics {
    /// Mean absolute percentage error, as a percentage (can exceed 100).
    pub mape: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Coefficient of determination; negative for fits worse than the mean.
    pub r2_score: f64,
    /// Number of periods actually scored (the overlapping prefix).
    pub evaluated_periods: usize,
    /// True when a metric fell back to a defined degenerate value
    /// (all-zero actuals for MAPE, constant actuals for R²).
    pub degenerate: bool,
}

/// The span of history the models trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Number of aggregated periods in the window.
    pub observation_count: usize,
}

/// Model-selection statistics reported by the autoregressive fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArDiagnostics {
    pub aic: f64,
    pub bic: f64,
}

/// The engine's output for one request.
///
/// Created once per request and immutable afterwards; the surrounding
/// system persists or discards it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// Echo of the request that produced this result.
    pub request: ForecastRequest,
    /// Exactly `horizon_periods` points, strictly ascending by period start.
    pub predictions: Vec<PredictionPoint>,
    /// `None` when no held-out actuals overlapped the horizon; the
    /// predictions are still valid in that case.
    pub accuracy: Option<AccuracyMetrics>,
    /// AIC/BIC of the autoregressive fit, when that model contributed.
    pub diagnostics: Option<ArDiagnostics>,
    /// Ensemble members that failed to fit and were excluded.
    pub excluded_models: Vec<ModelType>,
    pub training_window: TrainingWindow,
}
