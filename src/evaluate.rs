//! Accuracy evaluation of predictions against held-out actuals.

use crate::core::AccuracyMetrics;
use crate::error::{ForecastError, Result};
use crate::utils::mean;

/// Computes MAPE/RMSE/MAE/R² over the overlapping prefix of actual and
/// predicted values.
///
/// Degenerate inputs map to defined values rather than NaN/Inf: zero
/// actuals are skipped from MAPE (all-skipped reports 0), and constant
/// actuals report R² as 0. Both cases set the `degenerate` flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccuracyEvaluator;

impl AccuracyEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Score `predicted` against `actual`.
    ///
    /// When the slices differ in length only the overlapping prefix is
    /// evaluated; `evaluated_periods` records how many points were scored.
    /// Fails with `InsufficientActuals` when there is no overlap at all.
    pub fn evaluate(&self, actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics> {
        let n = actual.len().min(predicted.len());
        if n == 0 {
            return Err(ForecastError::InsufficientActuals);
        }

        let actual = &actual[..n];
        let predicted = &predicted[..n];
        let n_f = n as f64;

        let mae = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| (a - p).abs())
            .sum::<f64>()
            / n_f;

        let mse = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| (a - p).powi(2))
            .sum::<f64>()
            / n_f;
        let rmse = mse.sqrt();

        let mut degenerate = false;

        // MAPE skips zero actuals instead of zero-filling them.
        let mut mape_sum = 0.0;
        let mut mape_count = 0usize;
        for (a, p) in actual.iter().zip(predicted) {
            if *a != 0.0 {
                mape_sum += ((a - p) / a).abs();
                mape_count += 1;
            }
        }
        let mape = if mape_count == 0 {
            degenerate = true;
            0.0
        } else {
            100.0 * mape_sum / mape_count as f64
        };

        let mean_actual = mean(actual);
        let ss_tot: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
        let ss_res: f64 = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| (a - p).powi(2))
            .sum();
        let r2_score = if ss_tot == 0.0 {
            degenerate = true;
            0.0
        } else {
            1.0 - ss_res / ss_tot
        };

        Ok(AccuracyMetrics {
            mape,
            rmse,
            mae,
            r2_score,
            evaluated_periods: n,
            degenerate,
        })
    }
}
