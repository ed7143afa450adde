//! Log-driven confidence and window adjustment.
//!
//! # Responsibility
//! - Layer recent-log quality signals on top of the base forecast confidence.
//! - Widen or narrow the forecast window by the resulting shift.
//!
//! # Invariants
//! - Adjustment rules run in the fixed order of `ADJUSTMENT_RULES`; each may
//!   fire independently.
//! - Confidence is clamped to `[MIN_CONFIDENCE, MAX_CONFIDENCE]` on entry and
//!   after every rule.
//! - The reported note is the first note produced, never a concatenation.
//! - An adjusted window never ends before it starts.

use crate::engine::stats::{add_days, days_between};
use crate::model::daily_log::{most_recent, DailyLog, SleepBand, Stress};
use crate::model::prediction::OvulationSignal;
use chrono::NaiveDate;

pub const MIN_CONFIDENCE: f64 = 0.5;
pub const MAX_CONFIDENCE: f64 = 0.99;
/// Confidence floor once ovulation is confirmed by logs.
pub const OVULATION_CONFIRMED_CONFIDENCE: f64 = 0.97;
/// Logs inspected for stress/sleep disruption.
const DISRUPTION_LOOKBACK: usize = 5;
/// Log count that counts as consistent logging.
const CONSISTENT_LOG_COUNT: usize = 5;

pub const NOTE_OVULATION_CONFIRMED: &str = "Ovulation confirmed from logs";
pub const NOTE_SLEEP_OR_STRESS: &str = "Sleep or stress may shift timing";
pub const NOTE_CONSISTENT_LOGGING: &str = "Consistent logging tightened window";

/// Result of `adjust_confidence`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceAdjustment {
    pub confidence: f64,
    /// Signed day shift; positive widens, negative narrows the window.
    pub window_shift: i64,
    pub note: Option<&'static str>,
}

/// Adjusted forecast window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionWindow {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

#[derive(Debug, Clone, Copy)]
struct LogSignals {
    ovulation_detected: bool,
    disrupted: bool,
    consistent: bool,
}

#[derive(Debug, Clone, Copy)]
enum ConfidenceEffect {
    AtLeast(f64),
    Delta(f64),
}

struct AdjustmentRule {
    fires: fn(&LogSignals) -> bool,
    effect: ConfidenceEffect,
    window_delta: i64,
    note: &'static str,
}

const ADJUSTMENT_RULES: &[AdjustmentRule] = &[
    AdjustmentRule {
        fires: ovulation_confirmed,
        effect: ConfidenceEffect::AtLeast(OVULATION_CONFIRMED_CONFIDENCE),
        window_delta: 0,
        note: NOTE_OVULATION_CONFIRMED,
    },
    AdjustmentRule {
        fires: sleep_or_stress_disrupted,
        effect: ConfidenceEffect::Delta(-0.03),
        window_delta: 1,
        note: NOTE_SLEEP_OR_STRESS,
    },
    AdjustmentRule {
        fires: logging_consistent,
        effect: ConfidenceEffect::Delta(0.02),
        window_delta: -1,
        note: NOTE_CONSISTENT_LOGGING,
    },
];

/// Combines the base confidence with recent-log signals.
pub fn adjust_confidence(
    base_confidence: f64,
    recent_logs: &[DailyLog],
    ovulation_signal: &OvulationSignal,
) -> ConfidenceAdjustment {
    let last_five = most_recent(recent_logs, DISRUPTION_LOOKBACK);
    let signals = LogSignals {
        ovulation_detected: ovulation_signal.ovulation_detected,
        disrupted: last_five.iter().any(|log| {
            log.stress == Some(Stress::High) || log.sleep_band == Some(SleepBand::Lt6)
        }),
        consistent: recent_logs.len() >= CONSISTENT_LOG_COUNT,
    };

    let mut confidence = clamp_confidence(base_confidence);
    let mut window_shift = 0;
    let mut note = None;

    for rule in ADJUSTMENT_RULES.iter().filter(|rule| (rule.fires)(&signals)) {
        confidence = clamp_confidence(match rule.effect {
            ConfidenceEffect::AtLeast(floor) => confidence.max(floor),
            ConfidenceEffect::Delta(delta) => confidence + delta,
        });
        window_shift += rule.window_delta;
        note = note.or(Some(rule.note));
    }

    ConfidenceAdjustment {
        confidence,
        window_shift,
        note,
    }
}

/// Widens (positive shift) or narrows (negative shift) a window on both ends.
///
/// A zero shift returns the inputs unchanged. When narrowing would invert
/// the window, it collapses to the single midpoint day of the original one.
pub fn adjust_window(earliest: NaiveDate, latest: NaiveDate, window_shift: i64) -> PredictionWindow {
    if window_shift == 0 {
        return PredictionWindow { earliest, latest };
    }

    let shifted_earliest = add_days(earliest, window_shift.saturating_neg());
    let shifted_latest = add_days(latest, window_shift);
    if shifted_earliest > shifted_latest {
        let midpoint = add_days(earliest, days_between(earliest, latest).div_euclid(2));
        return PredictionWindow {
            earliest: midpoint,
            latest: midpoint,
        };
    }

    PredictionWindow {
        earliest: shifted_earliest,
        latest: shifted_latest,
    }
}

fn ovulation_confirmed(signals: &LogSignals) -> bool {
    signals.ovulation_detected
}

fn sleep_or_stress_disrupted(signals: &LogSignals) -> bool {
    signals.disrupted
}

fn logging_consistent(signals: &LogSignals) -> bool {
    signals.consistent
}

fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_CONFIDENCE;
    }
    value.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}
