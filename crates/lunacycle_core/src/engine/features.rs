//! Rolling numeric summaries of recent logs.
//!
//! # Invariants
//! - Only the `window` most recent logs by date contribute.
//! - An average over zero present values is `None`, never `0.0`.

use crate::config::DEFAULT_RECENT_LOG_WINDOW;
use crate::engine::ovulation::is_pain_near;
use crate::model::daily_log::{most_recent, DailyLog, SleepBand, Stress};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Feature vector for analytics and downstream modeling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogFeatures {
    pub stress_rolling_avg: Option<f64>,
    pub sleep_rolling_avg: Option<f64>,
    pub mucus_peak_day: Option<NaiveDate>,
    pub pain_near_ovulation: bool,
}

/// Summarizes the seven most recent logs.
pub fn extract_features(logs: &[DailyLog], ovulation_date: Option<NaiveDate>) -> LogFeatures {
    extract_features_in_window(logs, ovulation_date, DEFAULT_RECENT_LOG_WINDOW)
}

/// Summarizes the `window` most recent logs.
pub fn extract_features_in_window(
    logs: &[DailyLog],
    ovulation_date: Option<NaiveDate>,
    window: usize,
) -> LogFeatures {
    if logs.is_empty() {
        return LogFeatures::default();
    }

    let recent = most_recent(logs, window);

    let stress_rolling_avg = average(recent.iter().filter_map(|log| log.stress.map(stress_score)));
    let sleep_rolling_avg = average(recent.iter().filter_map(|log| log.sleep_band.map(sleep_score)));
    let mucus_peak_day = recent
        .iter()
        .find(|log| log.has_egg_white_mucus())
        .map(|log| log.date);
    let pain_near_ovulation = ovulation_date
        .map(|ovulation| recent.iter().any(|log| is_pain_near(log, ovulation)))
        .unwrap_or(false);

    LogFeatures {
        stress_rolling_avg,
        sleep_rolling_avg,
        mucus_peak_day,
        pain_near_ovulation,
    }
}

fn sleep_score(band: SleepBand) -> f64 {
    match band {
        SleepBand::Lt6 => 0.0,
        SleepBand::Btw6And8 => 1.0,
        SleepBand::Gt8 => 2.0,
    }
}

fn stress_score(stress: Stress) -> f64 {
    match stress {
        Stress::Low => 0.0,
        Stress::Normal => 1.0,
        Stress::High => 2.0,
    }
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        return None;
    }
    Some(sum / count as f64)
}
