//! # demandcast
//!
//! Demand forecast generation engine: turns raw time-stamped sales
//! records into multi-horizon predictions using three independent models
//! (trend smoothing, differenced autoregression, seasonal decomposition)
//! combined into a weighted ensemble, with accuracy scoring against
//! held-out actuals.
//!
//! The engine is a stateless, synchronous, in-process library: the caller
//! materializes historical observations, the
//! [`ForecastOrchestrator`](orchestrator::ForecastOrchestrator) runs the
//! pipeline (validate → aggregate → fit → combine → evaluate), and the
//! resulting [`ForecastResult`](core::ForecastResult) is handed back for
//! the surrounding system to persist or serve.
//!
//! ```
//! use chrono::NaiveDate;
//! use demandcast::prelude::*;
//!
//! let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let observations: Vec<Observation> = (0..90)
//!     .map(|i| Observation::new(base + chrono::Duration::days(i), 100.0 + i as f64, 10))
//!     .collect();
//!
//! let request = ForecastRequest {
//!     series_id: "sku-42".to_string(),
//!     model_type: ModelType::Ensemble,
//!     period_granularity: Granularity::Daily,
//!     horizon_periods: 7,
//!     lookback_periods: 30,
//! };
//!
//! let orchestrator = ForecastOrchestrator::default();
//! let result = orchestrator.forecast(&request, &observations).unwrap();
//! assert_eq!(result.predictions.len(), 7);
//! ```

pub mod aggregate;
pub mod cancel;
pub mod core;
pub mod error;
pub mod evaluate;
pub mod models;
pub mod orchestrator;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::core::{
        AccuracyMetrics, AggregatedPeriod, ArDiagnostics, ForecastRequest, ForecastResult,
        Granularity, ModelType, Observation, PredictionPoint, TrainingWindow,
    };
    pub use crate::error::{ForecastError, Result};
    pub use crate::evaluate::AccuracyEvaluator;
    pub use crate::models::{
        AutoregressiveModel, EnsembleCombiner, SeasonalDecompositionModel, TrendSmoothingModel,
    };
    pub use crate::orchestrator::ForecastOrchestrator;
}
