//! Engine tuning defaults.
//!
//! # Responsibility
//! - Name the fallback values the inference engine relies on.
//! - Let callers and tests override them without touching engine code.

use crate::model::phase::Phase;

/// Cycle length assumed when no usable average exists, in days.
pub const DEFAULT_FALLBACK_CYCLE_LENGTH: f64 = 28.0;
/// Averages at or below this value are ignored by the phase classifier.
pub const DEFAULT_MIN_CYCLE_LENGTH_FOR_AVERAGE: f64 = 10.0;
/// Number of recorded periods required before a forecast is requested.
pub const DEFAULT_MIN_PERIODS_FOR_PREDICTION: usize = 3;
/// Number of most recent daily logs considered by signal/feature passes.
pub const DEFAULT_RECENT_LOG_WINDOW: usize = 7;
/// Days without a log after which a check-in prompt is shown.
pub const DEFAULT_CHECKIN_PROMPT_AFTER_DAYS: i64 = 3;

/// Overridable engine defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub fallback_cycle_length: f64,
    pub min_cycle_length_for_average: f64,
    /// Phase returned when neither logs nor date anchors exist.
    pub fallback_phase: Phase,
    pub min_periods_for_prediction: usize,
    pub recent_log_window: usize,
    pub checkin_prompt_after_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_cycle_length: DEFAULT_FALLBACK_CYCLE_LENGTH,
            min_cycle_length_for_average: DEFAULT_MIN_CYCLE_LENGTH_FOR_AVERAGE,
            fallback_phase: Phase::Luteal,
            min_periods_for_prediction: DEFAULT_MIN_PERIODS_FOR_PREDICTION,
            recent_log_window: DEFAULT_RECENT_LOG_WINDOW,
            checkin_prompt_after_days: DEFAULT_CHECKIN_PROMPT_AFTER_DAYS,
        }
    }
}
