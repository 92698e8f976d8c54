//! Time series aggregation: collapses raw observations into
//! regular-interval period buckets.

use std::collections::BTreeMap;

use crate::core::{AggregatedPeriod, Granularity, Observation};
use crate::error::{ForecastError, Result};

/// Group observations into period buckets and sum revenue/quantity.
///
/// Output is strictly ascending by period start with no duplicate keys.
/// Fails with `InsufficientData` when fewer than `min_periods` distinct
/// periods result. Pure function of its input; no side effects.
pub fn aggregate(
    observations: &[Observation],
    granularity: Granularity,
    min_periods: usize,
) -> Result<Vec<AggregatedPeriod>> {
    let mut buckets: BTreeMap<chrono::NaiveDate, (f64, u64)> = BTreeMap::new();

    for obs in observations {
        let key = granularity.period_key(obs.date);
        let entry = buckets.entry(key).or_insert((0.0, 0));
        entry.0 += obs.revenue;
        entry.1 += obs.quantity;
    }

    if buckets.len() < min_periods {
        return Err(ForecastError::InsufficientData {
            needed: min_periods,
            got: buckets.len(),
        });
    }

    Ok(buckets
        .into_iter()
        .map(|(period_start, (revenue, quantity))| AggregatedPeriod {
            period_start,
            revenue,
            quantity,
        })
        .collect())
}
