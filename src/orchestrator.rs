//! Forecast orchestration: validation, aggregation, model fitting,
//! combination and evaluation for one request.

use std::time::Duration;

use tracing::{debug, warn};

use crate::aggregate::aggregate;
use crate::cancel::CancelToken;
use crate::core::{
    AccuracyMetrics, AggregatedPeriod, ArDiagnostics, ForecastRequest, ForecastResult, ModelType,
    Observation, PredictionPoint, TrainingWindow,
};
use crate::error::{ForecastError, Result};
use crate::evaluate::AccuracyEvaluator;
use crate::models::{
    AutoregressiveModel, EnsembleCombiner, SeasonalDecompositionModel, TrendSmoothingModel,
};

/// Drives one forecast request through its phases:
/// `Validating → Aggregating → Fitting → Combining → Evaluating`.
///
/// The component models and the evaluator are injected at construction so
/// tests can substitute configured instances. Each request is a stateless
/// computation; the orchestrator holds no per-request state and is safe to
/// share across threads.
#[derive(Debug, Clone, Default)]
pub struct ForecastOrchestrator {
    trend: TrendSmoothingModel,
    autoregressive: AutoregressiveModel,
    seasonal: SeasonalDecompositionModel,
    combiner: EnsembleCombiner,
    evaluator: AccuracyEvaluator,
    deadline: Option<Duration>,
}

/// Outcome of the fitting/combining phases.
struct FittedForecast {
    predictions: Vec<PredictionPoint>,
    diagnostics: Option<ArDiagnostics>,
    excluded_models: Vec<ModelType>,
}

impl ForecastOrchestrator {
    pub fn new(
        trend: TrendSmoothingModel,
        autoregressive: AutoregressiveModel,
        seasonal: SeasonalDecompositionModel,
        combiner: EnsembleCombiner,
        evaluator: AccuracyEvaluator,
    ) -> Self {
        Self {
            trend,
            autoregressive,
            seasonal,
            combiner,
            evaluator,
            deadline: None,
        }
    }

    /// Bound every request handled by this orchestrator to a deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Run a forecast request to completion.
    pub fn forecast(
        &self,
        request: &ForecastRequest,
        observations: &[Observation],
    ) -> Result<ForecastResult> {
        self.forecast_with_cancel(request, observations, &CancelToken::new())
    }

    /// Run a forecast request with cooperative cancellation.
    ///
    /// The token is checked at every phase boundary, and inside the
    /// autoregressive forecast loop. A configured deadline is merged into
    /// the caller's token.
    pub fn forecast_with_cancel(
        &self,
        request: &ForecastRequest,
        observations: &[Observation],
        cancel: &CancelToken,
    ) -> Result<ForecastResult> {
        let token = match self.deadline {
            Some(d) => cancel.bounded(d),
            None => cancel.clone(),
        };

        debug!(series_id = %request.series_id, model = request.model_type.as_str(), "validating");
        request.validate()?;

        token.check("aggregating")?;
        debug!(series_id = %request.series_id, "aggregating");
        let periods = aggregate(
            observations,
            request.period_granularity,
            request.lookback_periods,
        )?;

        token.check("fitting")?;
        debug!(series_id = %request.series_id, periods = periods.len(), "fitting");
        let fitted = self.fit(request, &periods, &token)?;

        token.check("evaluating")?;
        let accuracy = self.evaluate(request, &periods, &fitted.predictions)?;

        debug!(series_id = %request.series_id, "completed");
        Ok(ForecastResult {
            request: request.clone(),
            predictions: fitted.predictions,
            accuracy,
            diagnostics: fitted.diagnostics,
            excluded_models: fitted.excluded_models,
            training_window: TrainingWindow {
                start: periods[0].period_start,
                end: periods[periods.len() - 1].period_start,
                observation_count: periods.len(),
            },
        })
    }

    fn fit(
        &self,
        request: &ForecastRequest,
        periods: &[AggregatedPeriod],
        token: &CancelToken,
    ) -> Result<FittedForecast> {
        let granularity = request.period_granularity;
        let horizon = request.horizon_periods;

        match request.model_type {
            ModelType::Trend => {
                let forecast = self.trend.fit_and_predict(periods, granularity, horizon)?;
                Ok(FittedForecast {
                    predictions: forecast.points,
                    diagnostics: None,
                    excluded_models: Vec::new(),
                })
            }
            ModelType::Autoregressive => {
                let forecast =
                    self.autoregressive
                        .fit_and_predict(periods, granularity, horizon, token)?;
                Ok(FittedForecast {
                    predictions: forecast.points,
                    diagnostics: Some(forecast.diagnostics),
                    excluded_models: Vec::new(),
                })
            }
            ModelType::Seasonal => {
                let forecast = self.seasonal.fit_and_predict(periods, granularity, horizon)?;
                Ok(FittedForecast {
                    predictions: forecast.points,
                    diagnostics: None,
                    excluded_models: Vec::new(),
                })
            }
            ModelType::Ensemble => self.fit_ensemble(request, periods, token),
        }
    }

    /// Fit all three members independently (they share no mutable state,
    /// so they run as parallel tasks) and blend the survivors.
    fn fit_ensemble(
        &self,
        request: &ForecastRequest,
        periods: &[AggregatedPeriod],
        token: &CancelToken,
    ) -> Result<FittedForecast> {
        let granularity = request.period_granularity;
        let horizon = request.horizon_periods;

        let (trend_res, (ar_res, seasonal_res)) = rayon::join(
            || self.trend.fit_and_predict(periods, granularity, horizon),
            || {
                rayon::join(
                    || {
                        self.autoregressive
                            .fit_and_predict(periods, granularity, horizon, token)
                    },
                    || self.seasonal.fit_and_predict(periods, granularity, horizon),
                )
            },
        );

        let mut excluded_models = Vec::new();
        let trend = Self::fold_member(trend_res, ModelType::Trend, request, &mut excluded_models)?;
        let autoregressive = Self::fold_member(
            ar_res,
            ModelType::Autoregressive,
            request,
            &mut excluded_models,
        )?;
        let seasonal =
            Self::fold_member(seasonal_res, ModelType::Seasonal, request, &mut excluded_models)?;

        if trend.is_none() && autoregressive.is_none() && seasonal.is_none() {
            return Err(ForecastError::ModelFit {
                model: "ensemble",
                reason: "all ensemble members failed to fit".to_string(),
            });
        }

        token.check("combining")?;
        let diagnostics = autoregressive.as_ref().map(|f| f.diagnostics);
        let predictions = self.combiner.combine(
            trend.as_ref().map(|f| f.points.as_slice()),
            autoregressive.as_ref().map(|f| f.points.as_slice()),
            seasonal.as_ref().map(|f| f.points.as_slice()),
        )?;

        Ok(FittedForecast {
            predictions,
            diagnostics,
            excluded_models,
        })
    }

    /// Record a failed ensemble member as excluded; cancellation still
    /// aborts the whole request.
    fn fold_member<T>(
        result: Result<T>,
        model: ModelType,
        request: &ForecastRequest,
        excluded: &mut Vec<ModelType>,
    ) -> Result<Option<T>> {
        match result {
            Ok(forecast) => Ok(Some(forecast)),
            Err(err @ ForecastError::Cancelled { .. }) => Err(err),
            Err(err) => {
                warn!(
                    series_id = %request.series_id,
                    model = model.as_str(),
                    error = %err,
                    "excluding ensemble member"
                );
                excluded.push(model);
                Ok(None)
            }
        }
    }

    /// Score predictions against the most recent aggregated actuals.
    ///
    /// The holdout is the tail `min(horizon, lookback)` periods of the same
    /// series the models trained on. This is a retrospective self-check,
    /// not true out-of-sample accuracy. A zero overlap downgrades accuracy
    /// to `None` instead of failing the request.
    fn evaluate(
        &self,
        request: &ForecastRequest,
        periods: &[AggregatedPeriod],
        predictions: &[PredictionPoint],
    ) -> Result<Option<AccuracyMetrics>> {
        let holdout = request
            .horizon_periods
            .min(request.lookback_periods)
            .min(periods.len());
        let actual: Vec<f64> = periods[periods.len() - holdout..]
            .iter()
            .map(|p| p.revenue)
            .collect();
        let predicted: Vec<f64> = predictions.iter().map(|p| p.predicted_revenue).collect();

        match self.evaluator.evaluate(&actual, &predicted) {
            Ok(metrics) => Ok(Some(metrics)),
            Err(ForecastError::InsufficientActuals) => {
                warn!(series_id = %request.series_id, "no actuals overlap; skipping accuracy");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
