//! Log-based enhancement of a base forecast.
//!
//! # Responsibility
//! - Compose ovulation estimation, signal detection, confidence adjustment
//!   and window adjustment into one `PredictionRange`.
//!
//! # Invariants
//! - Pure: no I/O and no logging; inputs are never mutated.
//! - Without logs the base window and confidence pass through untouched.

use crate::config::EngineConfig;
use crate::engine::confidence::{adjust_confidence, adjust_window};
use crate::engine::ovulation::{detect_ovulation, estimate_ovulation_date};
use crate::model::daily_log::{most_recent, DailyLog};
use crate::model::prediction::{BaseForecast, PredictionRange};
use chrono::NaiveDate;

/// Enhances `base` with evidence from `daily_logs`.
///
/// `periods` may be in any order; the most recent start anchors the
/// ovulation estimate.
pub fn enhance_prediction(
    base: &BaseForecast,
    daily_logs: &[DailyLog],
    periods: &[NaiveDate],
    config: &EngineConfig,
) -> PredictionRange {
    let predicted_ovulation_date = estimate_ovulation_date(Some(base), periods);
    if daily_logs.is_empty() {
        return PredictionRange {
            predicted_ovulation_date,
            ..PredictionRange::from(*base)
        };
    }

    let recent_logs: Vec<DailyLog> = most_recent(daily_logs, config.recent_log_window)
        .into_iter()
        .cloned()
        .collect();
    let ovulation_signal = detect_ovulation(&recent_logs, predicted_ovulation_date);
    let adjustment = adjust_confidence(base.confidence, &recent_logs, &ovulation_signal);
    let window = adjust_window(base.earliest, base.latest, adjustment.window_shift);

    PredictionRange {
        earliest: window.earliest,
        latest: window.latest,
        confidence: adjustment.confidence,
        base_confidence: Some(base.confidence),
        adjustment_note: adjustment.note.map(str::to_string),
        predicted_ovulation_date,
        ovulation_signal: Some(ovulation_signal),
    }
}
