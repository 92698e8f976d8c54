//! Seasonal decomposition forecasting model.
//!
//! Linear trend over the series index plus a fixed-amplitude weekly
//! seasonal multiplier. The 7-period sine seasonality applies regardless
//! of granularity; the cycle is defined in forecast steps, not days.

use std::f64::consts::TAU;

use crate::core::{AggregatedPeriod, Granularity, PredictionPoint};
use crate::error::{ForecastError, Result};
use crate::models::revenue_per_unit;
use crate::utils::{linear_slope, mean};

/// Fixed confidence reported for every seasonal prediction.
pub const SEASONAL_CONFIDENCE: f64 = 0.85;

/// Relative amplitude of the weekly seasonal swing.
const SEASONAL_AMPLITUDE: f64 = 0.1;

/// Seasonal period, in forecast steps.
const SEASONAL_PERIOD: f64 = 7.0;

/// Relative half-width of the confidence band.
const BAND_WIDTH: f64 = 0.15;

/// Number of trailing periods averaged into the level baseline.
const BASELINE_WINDOW: usize = 7;

/// Trend-plus-weekly-seasonality forecaster.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalDecompositionModel;

/// Output of a seasonal decomposition fit.
#[derive(Debug, Clone)]
pub struct SeasonalForecast {
    pub points: Vec<PredictionPoint>,
}

impl SeasonalDecompositionModel {
    pub fn new() -> Self {
        Self
    }

    /// Fit trend and baseline to the series and predict `horizon` periods.
    pub fn fit_and_predict(
        &self,
        series: &[AggregatedPeriod],
        granularity: Granularity,
        horizon: usize,
    ) -> Result<SeasonalForecast> {
        if series.is_empty() {
            return Err(ForecastError::ModelFit {
                model: "seasonal",
                reason: "cannot fit an empty series".to_string(),
            });
        }

        let revenues: Vec<f64> = series.iter().map(|p| p.revenue).collect();

        let slope = linear_slope(&revenues);
        let window = revenues.len().min(BASELINE_WINDOW);
        let baseline = mean(&revenues[revenues.len() - window..]);

        let ratio = revenue_per_unit(series);
        let last_start = series[series.len() - 1].period_start;

        let points = (1..=horizon)
            .map(|h| {
                let multiplier = Self::seasonal_multiplier(h);
                let predicted = ((baseline + slope * h as f64) * multiplier).max(0.0);
                PredictionPoint::clamped(
                    granularity.advance(last_start, h as u32),
                    predicted,
                    predicted / ratio,
                    SEASONAL_CONFIDENCE,
                    predicted * (1.0 - BAND_WIDTH),
                    predicted * (1.0 + BAND_WIDTH),
                )
            })
            .collect();

        Ok(SeasonalForecast { points })
    }

    /// `1 + 0.1·sin(2πh/7)` for forecast step `h` (1-indexed).
    fn seasonal_multiplier(h: usize) -> f64 {
        1.0 + SEASONAL_AMPLITUDE * (TAU * h as f64 / SEASONAL_PERIOD).sin()
    }
}
