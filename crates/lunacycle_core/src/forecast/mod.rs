//! Base forecast collaborator contract.
//!
//! # Responsibility
//! - Define the seam through which period history becomes a base forecast.
//! - Provide an offline statistical baseline implementation.
//!
//! # Invariants
//! - Forecasters are read-only over the supplied dates.
//! - A failed forecast means "no base prediction"; the engine is not invoked.

mod baseline;

pub use baseline::BaselineForecaster;

use crate::model::prediction::BaseForecast;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ForecastResult<T> = Result<T, ForecastError>;

/// Forecast collaborator failure.
#[derive(Debug)]
pub enum ForecastError {
    /// Not enough period starts to derive a single cycle length.
    InsufficientHistory { required: usize, actual: usize },
    /// The forecasting backend could not be reached or failed.
    Unavailable(String),
}

impl Display for ForecastError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientHistory { required, actual } => write!(
                f,
                "forecast needs at least {required} period dates, got {actual}"
            ),
            Self::Unavailable(message) => write!(f, "forecast service unavailable: {message}"),
        }
    }
}

impl Error for ForecastError {}

/// Turns an ordered list of period start dates into a base forecast.
pub trait Forecaster {
    fn forecast(&self, dates: &[NaiveDate]) -> ForecastResult<BaseForecast>;
}

impl<F: Forecaster + ?Sized> Forecaster for &F {
    fn forecast(&self, dates: &[NaiveDate]) -> ForecastResult<BaseForecast> {
        (**self).forecast(dates)
    }
}
