//! Cycle-length statistics shared by engine components.

use crate::model::daily_log::DailyLog;
use chrono::{Duration, NaiveDate};

/// Typical luteal phase length used to place ovulation, in days.
pub const LUTEAL_PHASE_DAYS: i64 = 14;
/// Lower bound reported for an estimated luteal length, in days.
const MIN_LUTEAL_ESTIMATE_DAYS: i64 = 8;

/// Rounds half values toward positive infinity (`-1.5 -> -1`, `2.5 -> 3`).
///
/// `NaN` maps to 0; infinities and out-of-range values saturate.
pub fn round_half_up(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    (value + 0.5).floor() as i64
}

/// Signed whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Shifts `date` by a signed number of days.
///
/// Saturates at the calendar bounds instead of panicking.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Consecutive cycle lengths over `dates` sorted ascending.
pub fn cycle_lengths(dates: &[NaiveDate]) -> Vec<i64> {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable();
    sorted
        .windows(2)
        .map(|pair| days_between(pair[0], pair[1]))
        .collect()
}

/// Rounded mean cycle length, or `None` with fewer than two dates.
pub fn average_cycle_length(dates: &[NaiveDate]) -> Option<i64> {
    let cycles = cycle_lengths(dates);
    mean(&cycles).map(round_half_up)
}

/// Estimated luteal length: `max(8, round(mean cycle - 14))`.
pub fn luteal_average(dates: &[NaiveDate]) -> Option<i64> {
    let cycles = cycle_lengths(dates);
    mean(&cycles)
        .map(|avg| round_half_up(avg - LUTEAL_PHASE_DAYS as f64).max(MIN_LUTEAL_ESTIMATE_DAYS))
}

/// Median of `values`; an even count averages the two middle values.
pub fn median(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) as f64 / 2.0)
    } else {
        Some(sorted[mid] as f64)
    }
}

/// Signed days from `today` until `predicted_ovulation` (negative: already past).
pub fn days_until_ovulation(predicted_ovulation: NaiveDate, today: NaiveDate) -> i64 {
    days_between(today, predicted_ovulation)
}

/// Returns whether the user should be nudged to log today.
///
/// True when there are no logs or the newest one is at least
/// `after_days` old.
pub fn needs_checkin_prompt(logs: &[DailyLog], today: NaiveDate, after_days: i64) -> bool {
    match logs.iter().map(|log| log.date).max() {
        Some(latest) => days_between(latest, today) >= after_days,
        None => true,
    }
}

fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
}
