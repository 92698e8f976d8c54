//! Weighted ensemble combination of the component model forecasts.

use crate::core::PredictionPoint;
use crate::error::{ForecastError, Result};

/// Confidence reported when all three members contributed.
pub const FULL_ENSEMBLE_CONFIDENCE: f64 = 0.9;

/// Confidence reported when at least one member was excluded.
pub const DEGRADED_ENSEMBLE_CONFIDENCE: f64 = 0.75;

/// Relative half-width of the blended confidence band.
const BAND_WIDTH: f64 = 0.2;

/// Fixed blend weights for the three component models.
///
/// When a member is absent its weight is redistributed by renormalizing
/// the remaining weights to sum to 1 (autoregressive absent yields
/// trend 0.57 / seasonal 0.43).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnsembleWeights {
    pub trend: f64,
    pub autoregressive: f64,
    pub seasonal: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            trend: 0.4,
            autoregressive: 0.3,
            seasonal: 0.3,
        }
    }
}

/// Combines per-step model outputs into a single blended forecast.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnsembleCombiner {
    weights: EnsembleWeights,
}

impl EnsembleCombiner {
    pub fn new(weights: EnsembleWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> EnsembleWeights {
        self.weights
    }

    /// Blend the available member forecasts with renormalized weights.
    ///
    /// Absent members (failed fits) are simply excluded; the combination
    /// errors only when no member contributed at all. All present members
    /// must cover the same horizon.
    pub fn combine(
        &self,
        trend: Option<&[PredictionPoint]>,
        autoregressive: Option<&[PredictionPoint]>,
        seasonal: Option<&[PredictionPoint]>,
    ) -> Result<Vec<PredictionPoint>> {
        let members: Vec<(&[PredictionPoint], f64)> = [
            (trend, self.weights.trend),
            (autoregressive, self.weights.autoregressive),
            (seasonal, self.weights.seasonal),
        ]
        .into_iter()
        .filter_map(|(points, weight)| points.map(|p| (p, weight)))
        .collect();

        if members.is_empty() {
            return Err(ForecastError::ModelFit {
                model: "ensemble",
                reason: "no member model produced a forecast".to_string(),
            });
        }

        let horizon = members[0].0.len();
        for (points, _) in &members {
            if points.len() != horizon {
                return Err(ForecastError::Computation(format!(
                    "ensemble member horizons differ: {} vs {horizon}",
                    points.len()
                )));
            }
        }

        let total_weight: f64 = members.iter().map(|(_, w)| w).sum();
        let confidence = if members.len() == 3 {
            FULL_ENSEMBLE_CONFIDENCE
        } else {
            DEGRADED_ENSEMBLE_CONFIDENCE
        };

        let combined = (0..horizon)
            .map(|h| {
                let mut revenue = 0.0;
                let mut quantity = 0.0;
                for (points, weight) in &members {
                    let w = weight / total_weight;
                    revenue += points[h].predicted_revenue * w;
                    quantity += points[h].predicted_quantity * w;
                }
                PredictionPoint::clamped(
                    members[0].0[h].period_start,
                    revenue,
                    quantity,
                    confidence,
                    revenue * (1.0 - BAND_WIDTH),
                    revenue * (1.0 + BAND_WIDTH),
                )
            })
            .collect();

        Ok(combined)
    }
}
