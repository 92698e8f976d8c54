//! Raw sales observations and aggregated period buckets.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One historical sales fact, as supplied by the collaborator store.
///
/// Observations are read-only input to the engine; aggregation collapses
/// them into [`AggregatedPeriod`] buckets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Calendar date of the sale.
    pub date: NaiveDate,
    /// Revenue for this fact, non-negative.
    pub revenue: f64,
    /// Units sold, non-negative.
    pub quantity: u64,
}

impl Observation {
    pub fn new(date: NaiveDate, revenue: f64, quantity: u64) -> Self {
        Self {
            date,
            revenue,
            quantity,
        }
    }
}

/// One bucket after grouping observations by period key.
///
/// Buckets are produced in strictly ascending order of `period_start` with
/// no duplicate keys; revenue and quantity are sums over the constituent
/// observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPeriod {
    /// First calendar date of the bucket (day, ISO-week Monday, or month start).
    pub period_start: NaiveDate,
    /// Total revenue across the bucket.
    pub revenue: f64,
    /// Total units sold across the bucket.
    pub quantity: u64,
}

/// Bucketing granularity for aggregation and forecast stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Map a calendar date to the start date of its period bucket.
    ///
    /// Daily buckets key on the date itself, weekly buckets on the Monday of
    /// the ISO week, monthly buckets on the first of the month.
    pub fn period_key(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => date,
            Granularity::Weekly => {
                let iso = date.iso_week();
                // Valid for every ISO (year, week) produced by iso_week().
                NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon)
                    .unwrap_or(date)
            }
            Granularity::Monthly => {
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
            }
        }
    }

    /// Advance a period start by `steps` whole periods.
    pub fn advance(self, period_start: NaiveDate, steps: u32) -> NaiveDate {
        match self {
            Granularity::Daily => period_start + chrono::Duration::days(steps as i64),
            Granularity::Weekly => period_start + chrono::Duration::weeks(steps as i64),
            Granularity::Monthly => period_start + Months::new(steps),
        }
    }
}
