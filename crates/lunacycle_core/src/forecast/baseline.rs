//! Recency-weighted statistical baseline forecaster.
//!
//! # Invariants
//! - Window offsets from the last period are bounded to
//!   `[MIN_OFFSET_DAYS, MAX_OFFSET_DAYS]` on their respective ends.
//! - Confidence never exceeds `MAX_CONFIDENCE`.

use super::{ForecastError, ForecastResult, Forecaster};
use crate::engine::stats::{add_days, cycle_lengths};
use crate::model::prediction::BaseForecast;
use chrono::NaiveDate;

const MIN_OFFSET_DAYS: i64 = 20;
const MAX_OFFSET_DAYS: i64 = 40;
/// Half-width of the window when all observed cycles are identical.
const FLAT_HISTORY_SPREAD_DAYS: i64 = 2;
const MAX_CONFIDENCE: f64 = 0.95;
const MAX_CV_PENALTY: f64 = 0.5;

/// Offline forecaster: weighted mean cycle length plus/minus one standard
/// deviation, anchored on the latest period start.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineForecaster;

impl BaselineForecaster {
    pub fn new() -> Self {
        Self
    }
}

impl Forecaster for BaselineForecaster {
    fn forecast(&self, dates: &[NaiveDate]) -> ForecastResult<BaseForecast> {
        let cycles = cycle_lengths(dates);
        let Some(last_date) = dates.iter().max().copied().filter(|_| !cycles.is_empty()) else {
            return Err(ForecastError::InsufficientHistory {
                required: 2,
                actual: dates.len(),
            });
        };

        let avg_cycle = weighted_average(&cycles);
        let std_dev = if cycles.len() > 1 {
            population_std_dev(&cycles)
        } else {
            0.0
        };

        let (earliest_days, latest_days) = if std_dev > 0.0 {
            ((avg_cycle - std_dev) as i64, (avg_cycle + std_dev) as i64)
        } else {
            (
                avg_cycle as i64 - FLAT_HISTORY_SPREAD_DAYS,
                avg_cycle as i64 + FLAT_HISTORY_SPREAD_DAYS,
            )
        };

        let confidence = if avg_cycle > 0.0 {
            let cv = std_dev / avg_cycle;
            MAX_CONFIDENCE.min(1.0 - MAX_CV_PENALTY.min(cv / 2.0))
        } else {
            0.0
        };

        Ok(BaseForecast {
            earliest: add_days(last_date, earliest_days.max(MIN_OFFSET_DAYS)),
            latest: add_days(last_date, latest_days.min(MAX_OFFSET_DAYS)),
            confidence,
        })
    }
}

/// Mean with linearly increasing weights `1..=n`, favoring recent cycles.
fn weighted_average(cycles: &[i64]) -> f64 {
    let (weighted_sum, weight_total) = cycles
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sum, total), (index, cycle)| {
            let weight = (index + 1) as f64;
            (sum + *cycle as f64 * weight, total + weight)
        });
    weighted_sum / weight_total
}

fn population_std_dev(cycles: &[i64]) -> f64 {
    let count = cycles.len() as f64;
    let mean = cycles.iter().sum::<i64>() as f64 / count;
    let variance = cycles
        .iter()
        .map(|cycle| (*cycle as f64 - mean).powi(2))
        .sum::<f64>()
        / count;
    variance.sqrt()
}
