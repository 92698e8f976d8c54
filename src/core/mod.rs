//! Core data structures for the forecast engine.

mod observation;
mod request;
mod result;

pub use observation::{AggregatedPeriod, Granularity, Observation};
pub use request::{ForecastRequest, ModelType, MIN_LOOKBACK_PERIODS};
pub use result::{
    AccuracyMetrics, ArDiagnostics, ForecastResult, PredictionPoint, TrainingWindow,
};
