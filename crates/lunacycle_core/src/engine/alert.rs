//! Personalized irregularity alerting.
//!
//! # Responsibility
//! - Derive an expected cycle-length band from history and profile context.
//! - Flag an out-of-band latest cycle, or unusually frequent entries.
//!
//! # Invariants
//! - At most one alert is produced; a range violation outranks frequency.
//! - Health-context boosts are additive constants, floored at
//!   `MIN_VARIATION_DAYS` in total.
//! - Profile bounds are read through `AlertProfile::sanitized()`.

use crate::engine::stats::{cycle_lengths, days_between, median, round_half_up};
use crate::model::profile::AlertProfile;
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Lower bound for the total variation allowance, in days.
pub const MIN_VARIATION_DAYS: i64 = 3;
/// Recent entries needed before the recent window replaces full history.
const MIN_RECENT_DATES_FOR_BASE: usize = 3;

const AGE_BOOST: i64 = 3;
const POSTPARTUM_UNDER_6_MONTHS_BOOST: i64 = 6;
const POSTPARTUM_UNDER_12_MONTHS_BOOST: i64 = 4;
const POSTPARTUM_LATER_BOOST: i64 = 2;
const POSTPARTUM_UNKNOWN_BOOST: i64 = 4;
const PCOS_BOOST: i64 = 4;
const THYROID_BOOST: i64 = 2;
const BIRTH_CONTROL_BOOST: i64 = 2;
const TRAVEL_BOOST: i64 = 2;
const SLEEP_BOOST: i64 = 2;
const POOR_SLEEP_HOURS: f64 = 6.0;
const EARLY_POSTPARTUM_MONTHS: i64 = 6;

/// Variation allowance with the boosts that also widen the upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariationAllowance {
    /// Total allowance around the median, in days.
    pub days: i64,
    pub pcos_boost: i64,
    pub postpartum_boost: i64,
}

/// Expected cycle-length band, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleBand {
    pub min: i64,
    pub max: i64,
}

impl CycleBand {
    pub fn contains(&self, length: i64) -> bool {
        (self.min..=self.max).contains(&length)
    }
}

/// Irregularity alert raised for the current history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleAlert {
    /// Latest cycle length falls outside the expected band.
    OutOfRange {
        latest_cycle: i64,
        expected_min: i64,
        expected_max: i64,
    },
    /// Unusually many period entries inside the recent window.
    FrequentEntries { count: usize, window_days: i64 },
}

impl Display for CycleAlert {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                latest_cycle,
                expected_min,
                expected_max,
            } => write!(
                f,
                "Your latest cycle was {latest_cycle} days. Based on your recent history, \
                 your expected range is {expected_min}–{expected_max} days."
            ),
            Self::FrequentEntries { count, window_days } => write!(
                f,
                "You logged {count} entries in the last {window_days} days. If this feels \
                 unusual, consider tracking symptoms or consulting a clinician."
            ),
        }
    }
}

/// Computes the dynamic variation allowance for `profile`.
pub fn compute_variation_allowance(profile: &AlertProfile) -> VariationAllowance {
    let profile = &profile.sanitized();
    let age_boost = if profile.age_group.is_transitional() {
        AGE_BOOST
    } else {
        0
    };
    let postpartum_boost = postpartum_boost(profile);
    let pcos_boost = if profile.pcos { PCOS_BOOST } else { 0 };
    let thyroid_boost = if profile.thyroid { THYROID_BOOST } else { 0 };
    let birth_control_boost = if profile.birth_control {
        BIRTH_CONTROL_BOOST
    } else {
        0
    };
    let travel_boost = if profile.travel_recent { TRAVEL_BOOST } else { 0 };
    let sleep_boost = match profile.sleep_hours {
        Some(hours) if hours < POOR_SLEEP_HOURS => SLEEP_BOOST,
        _ => 0,
    };

    let days = (profile.variation_days
        + age_boost
        + postpartum_boost
        + pcos_boost
        + thyroid_boost
        + birth_control_boost
        + travel_boost
        + sleep_boost)
        .max(MIN_VARIATION_DAYS);

    VariationAllowance {
        days,
        pcos_boost,
        postpartum_boost,
    }
}

/// Computes the expected band around `median_cycle` for `profile`.
///
/// When user-entered bounds would invert the band, the upper bound is raised
/// to the lower one.
pub fn expected_band(median_cycle: f64, profile: &AlertProfile) -> CycleBand {
    let profile = &profile.sanitized();
    let allowance = compute_variation_allowance(profile);
    let variation = allowance.days as f64;

    let mut min = profile
        .normal_min
        .max(round_half_up(median_cycle - variation));
    if let Some(shortest) = profile.shortest_cycle {
        min = min.max(shortest);
    }

    let mut max = (profile.normal_max + allowance.pcos_boost + allowance.postpartum_boost)
        .min(round_half_up(median_cycle + variation));
    if let Some(longest) = profile.longest_cycle {
        max = max.min(longest);
    }

    CycleBand {
        min,
        max: max.max(min),
    }
}

/// Evaluates irregularity alerts for `periods` as of `today`.
///
/// `periods` may be in any order.
pub fn compute_alert(
    periods: &[NaiveDate],
    profile: &AlertProfile,
    today: NaiveDate,
) -> Option<CycleAlert> {
    let profile = profile.sanitized();
    let min_cycles = usize::try_from(profile.min_cycles_for_alerts).unwrap_or(usize::MAX);
    if periods.len() < min_cycles {
        return None;
    }

    let mut sorted = periods.to_vec();
    sorted.sort_unstable();
    let recent_dates: Vec<NaiveDate> = sorted
        .iter()
        .copied()
        .filter(|date| days_between(*date, today) <= profile.recent_window_days)
        .collect();
    let base_dates = if recent_dates.len() >= MIN_RECENT_DATES_FOR_BASE {
        &recent_dates
    } else {
        &sorted
    };

    let cycles = cycle_lengths(base_dates);
    if cycles.len() < min_cycles - 1 {
        return None;
    }
    let latest_cycle = *cycles.last()?;
    let median_cycle = median(&cycles)?;

    let band = expected_band(median_cycle, &profile);
    if !band.contains(latest_cycle) {
        return Some(CycleAlert::OutOfRange {
            latest_cycle,
            expected_min: band.min,
            expected_max: band.max,
        });
    }

    let mut frequent_threshold = profile.frequent_count;
    if matches!(profile.known_postpartum_months(), Some(months) if months <= EARLY_POSTPARTUM_MONTHS)
    {
        frequent_threshold += 1;
    }
    if recent_dates.len() as i64 >= frequent_threshold {
        return Some(CycleAlert::FrequentEntries {
            count: recent_dates.len(),
            window_days: profile.recent_window_days,
        });
    }

    None
}

fn postpartum_boost(profile: &AlertProfile) -> i64 {
    if !profile.postpartum {
        return 0;
    }
    match profile.known_postpartum_months() {
        Some(months) if months <= 6 => POSTPARTUM_UNDER_6_MONTHS_BOOST,
        Some(months) if months <= 12 => POSTPARTUM_UNDER_12_MONTHS_BOOST,
        Some(_) => POSTPARTUM_LATER_BOOST,
        None => POSTPARTUM_UNKNOWN_BOOST,
    }
}
