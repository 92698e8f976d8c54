//! Trend-smoothing forecasting model.
//!
//! Double exponential smoothing (level + trend), suitable for series with
//! a roughly linear trend and no modeled seasonality.

use crate::core::{AggregatedPeriod, Granularity, PredictionPoint};
use crate::error::{ForecastError, Result};
use crate::models::revenue_per_unit;
use crate::utils::{mean, population_std_dev};

/// Fixed confidence reported for every trend-smoothing prediction.
pub const TREND_CONFIDENCE: f64 = 0.8;

/// Volatility fallback when the series mean is zero or the series is too
/// short to measure dispersion.
const VOLATILITY_FALLBACK: f64 = 0.1;

/// Double exponential smoothing forecaster.
///
/// The model equations are:
/// - Level: `l_t = α × y_t + (1-α) × (l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β × (l_t - l_{t-1}) + (1-β) × b_{t-1}`
/// - Forecast: `ŷ_{t+h} = l_t + h × b_t`, clamped at zero
///
/// The confidence band is the point estimate widened by the series'
/// coefficient of variation.
#[derive(Debug, Clone, Copy)]
pub struct TrendSmoothingModel {
    /// Level smoothing constant.
    alpha: f64,
    /// Trend smoothing constant.
    beta: f64,
}

/// Output of a trend-smoothing fit.
#[derive(Debug, Clone)]
pub struct TrendForecast {
    pub points: Vec<PredictionPoint>,
}

impl TrendSmoothingModel {
    /// Create a model with explicit smoothing constants.
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0001, 0.9999),
            beta: beta.clamp(0.0001, 0.9999),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Fit the smoothing state to the series and predict `horizon` periods.
    pub fn fit_and_predict(
        &self,
        series: &[AggregatedPeriod],
        granularity: Granularity,
        horizon: usize,
    ) -> Result<TrendForecast> {
        if series.is_empty() {
            return Err(ForecastError::ModelFit {
                model: "trend",
                reason: "cannot fit an empty series".to_string(),
            });
        }

        let revenues: Vec<f64> = series.iter().map(|p| p.revenue).collect();

        // Seed from the first two observations.
        let mut level = revenues[0];
        let mut trend = if revenues.len() > 1 {
            revenues[1] - revenues[0]
        } else {
            0.0
        };

        for &y in revenues.iter().skip(1) {
            let new_level = self.alpha * y + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (new_level - level) + (1.0 - self.beta) * trend;
            level = new_level;
        }

        let volatility = Self::volatility(&revenues);
        let ratio = revenue_per_unit(series);
        let last_start = series[series.len() - 1].period_start;

        let points = (1..=horizon)
            .map(|h| {
                let predicted = (level + trend * h as f64).max(0.0);
                PredictionPoint::clamped(
                    granularity.advance(last_start, h as u32),
                    predicted,
                    predicted / ratio,
                    TREND_CONFIDENCE,
                    predicted * (1.0 - volatility),
                    predicted * (1.0 + volatility),
                )
            })
            .collect();

        Ok(TrendForecast { points })
    }

    /// Coefficient of variation of the historical revenues.
    fn volatility(revenues: &[f64]) -> f64 {
        if revenues.len() < 2 {
            return VOLATILITY_FALLBACK;
        }
        let m = mean(revenues);
        if m == 0.0 {
            return VOLATILITY_FALLBACK;
        }
        let cv = population_std_dev(revenues) / m;
        if cv.is_finite() {
            cv
        } else {
            VOLATILITY_FALLBACK
        }
    }
}

impl Default for TrendSmoothingModel {
    fn default() -> Self {
        Self::new(0.3, 0.1)
    }
}
