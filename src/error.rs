//! Error types for the demandcast engine.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while generating a forecast.
///
/// Every variant maps to a stable `kind` string (see [`ForecastError::kind`])
/// so callers can serialize structured error responses without matching on
/// the enum themselves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// The forecast request violates an input invariant.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Fewer aggregated periods than the requested lookback window.
    #[error("insufficient data: need at least {needed} periods, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A model failed to fit the series.
    #[error("model fit failed ({model}): {reason}")]
    ModelFit { model: &'static str, reason: String },

    /// No overlap between the forecast horizon and the held-out actuals.
    #[error("no actual periods overlap the forecast horizon")]
    InsufficientActuals,

    /// The request was cancelled or its deadline expired.
    #[error("request cancelled during {phase} phase")]
    Cancelled { phase: &'static str },

    /// Numerical failure that could not be mapped to a degenerate value.
    #[error("computation error: {0}")]
    Computation(String),
}

impl ForecastError {
    /// Stable error kind for structured error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::InsufficientData { .. } => "InsufficientDataError",
            Self::ModelFit { .. } => "ModelFitError",
            Self::InsufficientActuals => "InsufficientActualsError",
            Self::Cancelled { .. } => "CancelledError",
            Self::Computation(_) => "ComputationError",
        }
    }
}
