//! Numerical utilities shared by the forecasting models.

pub mod ols;
pub mod stats;

pub use ols::{linear_slope, solve_symmetric};
pub use stats::{mean, population_std_dev, quantile_normal};
