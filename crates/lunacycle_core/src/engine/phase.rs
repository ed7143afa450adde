//! Phase classification for a reference date.
//!
//! # Responsibility
//! - Map period/ovulation anchors plus today's log onto one `Phase`.
//!
//! # Invariants
//! - Classification is total: every input combination yields a phase.
//! - Direct symptom evidence (flow, then egg-white mucus) overrides all date
//!   arithmetic.
//! - An ovulation anchor (explicit prediction, then estimate from cycle
//!   length) takes precedence over raw day counting.

use crate::config::EngineConfig;
use crate::engine::stats::{add_days, days_between, round_half_up, LUTEAL_PHASE_DAYS};
use crate::model::daily_log::DailyLog;
use crate::model::phase::Phase;
use chrono::NaiveDate;

/// Last cycle day (1-based) still counted as menstrual.
const MENSTRUAL_LAST_DAY: i64 = 5;
/// Last cycle day counted as follicular when no ovulation anchor exists.
const FOLLICULAR_LAST_DAY: i64 = 13;
/// Last cycle day counted as ovulation when no ovulation anchor exists.
const OVULATION_LAST_DAY: i64 = 15;
/// Days on either side of the ovulation anchor still classified as ovulation.
const OVULATION_HALF_WIDTH_DAYS: i64 = 1;

/// Inputs for one phase classification.
#[derive(Debug, Clone, Copy)]
pub struct PhaseInput<'a> {
    pub last_period_date: Option<NaiveDate>,
    pub predicted_ovulation_date: Option<NaiveDate>,
    pub today_log: Option<&'a DailyLog>,
    pub reference_date: NaiveDate,
    /// Mean cycle length in days; ignored unless finite and above the
    /// configured minimum.
    pub average_cycle_length: Option<f64>,
}

impl<'a> PhaseInput<'a> {
    /// Creates an input with no anchors for `reference_date`.
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            last_period_date: None,
            predicted_ovulation_date: None,
            today_log: None,
            reference_date,
            average_cycle_length: None,
        }
    }

    pub fn with_last_period(mut self, date: NaiveDate) -> Self {
        self.last_period_date = Some(date);
        self
    }

    pub fn with_predicted_ovulation(mut self, date: NaiveDate) -> Self {
        self.predicted_ovulation_date = Some(date);
        self
    }

    pub fn with_today_log(mut self, log: &'a DailyLog) -> Self {
        self.today_log = Some(log);
        self
    }

    pub fn with_average_cycle_length(mut self, days: f64) -> Self {
        self.average_cycle_length = Some(days);
        self
    }

    /// Returns whether any anchor (period, ovulation prediction or log) exists.
    pub fn has_anchor(&self) -> bool {
        self.last_period_date.is_some()
            || self.predicted_ovulation_date.is_some()
            || self.today_log.is_some()
    }
}

/// Classifies the cycle phase of `input.reference_date`.
pub fn classify_phase(input: &PhaseInput<'_>, config: &EngineConfig) -> Phase {
    if let Some(log) = input.today_log {
        if log.has_flow() {
            return Phase::Menstrual;
        }
        if log.has_egg_white_mucus() {
            return Phase::Ovulation;
        }
    }

    let day_index = input
        .last_period_date
        .map(|last| days_between(last, input.reference_date) + 1);

    let cycle_length = input
        .average_cycle_length
        .filter(|days| days.is_finite() && *days > config.min_cycle_length_for_average)
        .unwrap_or(config.fallback_cycle_length);

    let estimated_ovulation = input.last_period_date.map(|last| {
        add_days(
            last,
            round_half_up(cycle_length - LUTEAL_PHASE_DAYS as f64),
        )
    });

    if let Some(ovulation) = input.predicted_ovulation_date.or(estimated_ovulation) {
        let diff = days_between(ovulation, input.reference_date);
        if diff.abs() <= OVULATION_HALF_WIDTH_DAYS {
            return Phase::Ovulation;
        }
        if diff < 0 {
            return match day_index {
                Some(day) if day <= MENSTRUAL_LAST_DAY => Phase::Menstrual,
                _ => Phase::Follicular,
            };
        }
        return Phase::Luteal;
    }

    match day_index {
        Some(day) if day <= MENSTRUAL_LAST_DAY => Phase::Menstrual,
        Some(day) if day <= FOLLICULAR_LAST_DAY => Phase::Follicular,
        Some(day) if day <= OVULATION_LAST_DAY => Phase::Ovulation,
        Some(_) => Phase::Luteal,
        None => config.fallback_phase,
    }
}
