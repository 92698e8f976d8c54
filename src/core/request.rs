//! Forecast request contract and validation.

use serde::{Deserialize, Serialize};

use crate::core::Granularity;
use crate::error::{ForecastError, Result};

/// Minimum viable training window, in aggregated periods.
///
/// Requests below this fail validation; the engine never degrades silently
/// onto a shorter history.
pub const MIN_LOOKBACK_PERIODS: usize = 30;

/// Which model (or ensemble of models) a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Trend,
    Autoregressive,
    Seasonal,
    Ensemble,
}

impl ModelType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::Trend => "trend",
            ModelType::Autoregressive => "autoregressive",
            ModelType::Seasonal => "seasonal",
            ModelType::Ensemble => "ensemble",
        }
    }
}

/// Input contract for one forecast computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    /// Logical series the observations belong to.
    pub series_id: String,
    pub model_type: ModelType,
    pub period_granularity: Granularity,
    /// Number of future periods to predict. Must be >= 1.
    pub horizon_periods: usize,
    /// Number of historical periods the training window must cover.
    /// Must be >= [`MIN_LOOKBACK_PERIODS`].
    pub lookback_periods: usize,
}

impl ForecastRequest {
    /// Check the request invariants.
    pub fn validate(&self) -> Result<()> {
        if self.horizon_periods < 1 {
            return Err(ForecastError::Validation(
                "horizonPeriods must be >= 1".to_string(),
            ));
        }
        if self.lookback_periods < MIN_LOOKBACK_PERIODS {
            return Err(ForecastError::Validation(format!(
                "lookbackPeriods must be >= {MIN_LOOKBACK_PERIODS}, got {}",
                self.lookback_periods
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ForecastRequest {
        ForecastRequest {
            series_id: "series-1".to_string(),
            model_type: ModelType::Ensemble,
            period_granularity: Granularity::Daily,
            horizon_periods: 7,
            lookback_periods: 30,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let mut req = request();
        req.horizon_periods = 0;
        assert!(matches!(
            req.validate(),
            Err(ForecastError::Validation(_))
        ));
    }

    #[test]
    fn short_lookback_is_rejected() {
        let mut req = request();
        req.lookback_periods = 29;
        let err = req.validate().unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn request_deserializes_from_wire_shape() {
        let json = r#"{
            "seriesId": "sku-42",
            "modelType": "ensemble",
            "periodGranularity": "daily",
            "horizonPeriods": 14,
            "lookbackPeriods": 90
        }"#;
        let req: ForecastRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.series_id, "sku-42");
        assert_eq!(req.model_type, ModelType::Ensemble);
        assert_eq!(req.horizon_periods, 14);
        assert!(req.validate().is_ok());
    }
}
