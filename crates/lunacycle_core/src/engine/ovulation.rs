//! Ovulation estimation and symptom-based detection.
//!
//! # Responsibility
//! - Derive a predicted ovulation date from the base forecast window.
//! - Detect direct physiological evidence of ovulation in recent logs,
//!   independently of any statistics.
//!
//! # Invariants
//! - Egg-white mucus outranks pain regardless of date proximity.
//! - Among several matches, the earliest chronological log wins.
//! - With a non-empty period history, the estimate always lands strictly
//!   after the most recent period start.

use crate::engine::stats::{add_days, days_between, LUTEAL_PHASE_DAYS};
use crate::model::daily_log::{sorted_by_date, DailyLog};
use crate::model::prediction::{BaseForecast, OvulationReason, OvulationSignal};
use chrono::NaiveDate;

/// Max distance (inclusive, either direction) between a pain log and the
/// predicted ovulation date for the pain to count as a signal.
pub const PAIN_WINDOW_DAYS: i64 = 2;

/// Scans recent logs for direct evidence of ovulation.
pub fn detect_ovulation(
    recent_logs: &[DailyLog],
    predicted_ovulation_date: Option<NaiveDate>,
) -> OvulationSignal {
    let sorted = sorted_by_date(recent_logs);

    if let Some(log) = sorted.iter().find(|log| log.has_egg_white_mucus()) {
        return OvulationSignal::detected(log.date, OvulationReason::Mucus);
    }

    if let Some(predicted) = predicted_ovulation_date {
        if let Some(log) = sorted
            .iter()
            .find(|log| is_pain_near(log, predicted))
        {
            return OvulationSignal::detected(log.date, OvulationReason::Pain);
        }
    }

    OvulationSignal::not_detected()
}

/// Returns whether `log` has pain within `PAIN_WINDOW_DAYS` of `ovulation`.
pub fn is_pain_near(log: &DailyLog, ovulation: NaiveDate) -> bool {
    log.has_pain() && days_between(ovulation, log.date).abs() <= PAIN_WINDOW_DAYS
}

/// Estimates the ovulation date preceding the forecast window.
///
/// The estimate is the window midpoint minus the luteal length. When that
/// lands on or before the most recent period start, the period start plus the
/// luteal length is used instead. `periods` may be in any order.
pub fn estimate_ovulation_date(
    base: Option<&BaseForecast>,
    periods: &[NaiveDate],
) -> Option<NaiveDate> {
    let base = base?;
    let half_span = days_between(base.earliest, base.latest).div_euclid(2);
    let midpoint = add_days(base.earliest, half_span - LUTEAL_PHASE_DAYS);

    let Some(last_period) = periods.iter().max().copied() else {
        return Some(midpoint);
    };

    if midpoint <= last_period {
        return Some(add_days(last_period, LUTEAL_PHASE_DAYS));
    }
    Some(midpoint)
}
