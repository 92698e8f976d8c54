//! Autoregressive forecasting model.
//!
//! An ARIMA(5,1,0)-class fit: the series is differenced once, a 5-lag
//! autoregression is estimated by ordinary least squares on the lagged
//! differences, and forecasts are produced recursively and re-integrated
//! back to the level scale. AIC/BIC of the fit are reported for
//! diagnostics.

use crate::cancel::CancelToken;
use crate::core::{AggregatedPeriod, ArDiagnostics, Granularity, PredictionPoint};
use crate::error::{ForecastError, Result};
use crate::models::revenue_per_unit;
use crate::utils::{quantile_normal, solve_symmetric};

/// Fixed confidence reported for every autoregressive prediction. Slightly
/// below the other models; the numerical fit is the least stable member.
pub const AUTOREGRESSIVE_CONFIDENCE: f64 = 0.75;

/// Default number of autoregressive lags.
const DEFAULT_LAGS: usize = 5;

/// Differenced AR(p) forecaster with OLS coefficient estimation.
#[derive(Debug, Clone, Copy)]
pub struct AutoregressiveModel {
    /// Autoregressive order p.
    lags: usize,
}

/// Output of an autoregressive fit.
#[derive(Debug, Clone)]
pub struct ArForecast {
    pub points: Vec<PredictionPoint>,
    pub diagnostics: ArDiagnostics,
}

impl AutoregressiveModel {
    pub fn new() -> Self {
        Self { lags: DEFAULT_LAGS }
    }

    /// Use a non-default autoregressive order.
    pub fn with_lags(lags: usize) -> Self {
        Self { lags: lags.max(1) }
    }

    pub fn lags(&self) -> usize {
        self.lags
    }

    /// Fit the AR(p) model on the once-differenced series and predict
    /// `horizon` periods.
    ///
    /// The normal-equation accumulation and the recursive forecast loop
    /// both check `cancel` periodically so a caller abort does not run the
    /// most expensive phase to completion.
    pub fn fit_and_predict(
        &self,
        series: &[AggregatedPeriod],
        granularity: Granularity,
        horizon: usize,
        cancel: &CancelToken,
    ) -> Result<ArForecast> {
        let revenues: Vec<f64> = series.iter().map(|p| p.revenue).collect();

        // One round of differencing for stationarity.
        let diff: Vec<f64> = revenues.windows(2).map(|w| w[1] - w[0]).collect();

        let lags = self.lags;
        if diff.len() < lags + 1 {
            return Err(ForecastError::ModelFit {
                model: "autoregressive",
                reason: format!(
                    "differenced series has {} points, need at least {}",
                    diff.len(),
                    lags + 1
                ),
            });
        }

        let (intercept, coefficients) = Self::estimate_coefficients(&diff, lags, cancel)?;

        // Residual variance over the fitted range.
        let n_eff = diff.len() - lags;
        let mut sse = 0.0;
        for t in lags..diff.len() {
            let mut pred = intercept;
            for (i, c) in coefficients.iter().enumerate() {
                pred += c * diff[t - 1 - i];
            }
            let err = diff[t] - pred;
            sse += err * err;
        }
        let variance = sse / n_eff as f64;

        let diagnostics = Self::information_criteria(variance, n_eff, lags);

        // Recursive forecast on the differenced scale.
        let mut extended = diff;
        let base_len = extended.len();
        for _ in 0..horizon {
            cancel.check("fitting")?;
            let t = extended.len();
            let mut pred = intercept;
            for (i, c) in coefficients.iter().enumerate() {
                pred += c * extended[t - 1 - i];
            }
            extended.push(pred);
        }

        // Re-integrate: cumulative sum from the last observed revenue.
        let mut level = revenues[revenues.len() - 1];
        let z = quantile_normal(0.975);
        let ratio = revenue_per_unit(series);
        let last_start = series[series.len() - 1].period_start;

        let mut points = Vec::with_capacity(horizon);
        for (h, &delta) in extended[base_len..].iter().enumerate() {
            level += delta;
            let predicted = level.max(0.0);
            // Interval widens with the step index.
            let se = (variance * (h + 1) as f64).sqrt();
            points.push(PredictionPoint::clamped(
                granularity.advance(last_start, (h + 1) as u32),
                predicted,
                predicted / ratio,
                AUTOREGRESSIVE_CONFIDENCE,
                predicted - z * se,
                predicted + z * se,
            ));
        }

        Ok(ArForecast {
            points,
            diagnostics,
        })
    }

    /// Solve the normal equations of the lagged regression
    /// `diff[t] = intercept + Σ φ_i · diff[t-i]` by Cholesky decomposition.
    ///
    /// The accumulation is the dominant cost of the fit, so the cancel
    /// token is polled every 64 rows.
    fn estimate_coefficients(
        diff: &[f64],
        lags: usize,
        cancel: &CancelToken,
    ) -> Result<(f64, Vec<f64>)> {
        let k = lags + 1; // intercept + lags
        let mut xtx = vec![vec![0.0; k]; k];
        let mut xty = vec![0.0; k];

        for t in lags..diff.len() {
            if (t - lags) % 64 == 0 {
                cancel.check("fitting")?;
            }
            let mut row = vec![0.0; k];
            row[0] = 1.0;
            for i in 0..lags {
                row[i + 1] = diff[t - 1 - i];
            }

            for i in 0..k {
                xty[i] += row[i] * diff[t];
                for j in 0..k {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }

        // Tiny ridge keeps near-collinear designs solvable.
        for (i, r) in xtx.iter_mut().enumerate() {
            r[i] += 1e-8;
        }

        let beta = solve_symmetric(&xtx, &xty).ok_or(ForecastError::ModelFit {
            model: "autoregressive",
            reason: "normal equations are not positive definite".to_string(),
        })?;

        Ok((beta[0], beta[1..].to_vec()))
    }

    /// Gaussian-likelihood AIC/BIC for the fitted residual variance.
    fn information_criteria(variance: f64, n_eff: usize, lags: usize) -> ArDiagnostics {
        let n = n_eff as f64;
        let k = (lags + 1) as f64;
        // Floor avoids -inf log-likelihood on a perfect fit.
        let var = variance.max(1e-12);
        let ll = -0.5 * n * (1.0 + var.ln() + (2.0 * std::f64::consts::PI).ln());
        ArDiagnostics {
            aic: -2.0 * ll + 2.0 * k,
            bic: -2.0 * ll + k * n.ln(),
        }
    }
}

impl Default for AutoregressiveModel {
    fn default() -> Self {
        Self::new()
    }
}
