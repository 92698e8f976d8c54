//! Forecasting models and the ensemble combiner.

mod autoregressive;
mod ensemble;
mod seasonal;
mod trend;

pub use autoregressive::{ArForecast, AutoregressiveModel};
pub use ensemble::{EnsembleCombiner, EnsembleWeights};
pub use seasonal::{SeasonalDecompositionModel, SeasonalForecast};
pub use trend::{TrendForecast, TrendSmoothingModel};

use crate::core::AggregatedPeriod;

/// Revenue-per-unit ratio from the most recent period, used to scale
/// predicted revenue into predicted quantity.
///
/// When the last period sold zero units the ratio is undefined; the engine
/// treats it as 1 (quantity tracks revenue one-to-one), a defined
/// degenerate value rather than a divide-by-zero.
pub(crate) fn revenue_per_unit(series: &[AggregatedPeriod]) -> f64 {
    match series.last() {
        Some(p) if p.quantity > 0 && p.revenue > 0.0 => p.revenue / p.quantity as f64,
        _ => 1.0,
    }
}
