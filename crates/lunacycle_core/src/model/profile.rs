//! Personalization profile for irregularity alerting.
//!
//! # Responsibility
//! - Hold user-editable alert bounds and health-context flags.
//! - Provide defensively clamped copies for engine consumption.
//!
//! # Invariants
//! - Every numeric bound is user-editable, so engine code must read bounds
//!   through `AlertProfile::sanitized()`.
//! - Missing JSON fields fall back to `AlertProfile::default()` values.

use serde::{Deserialize, Serialize};

/// Upper bound for every user-entered day or count field.
pub const MAX_PROFILE_DAYS: i64 = 365;

/// Age bracket used for variation boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "under18")]
    Under18,
    #[serde(rename = "18-24")]
    From18To24,
    #[serde(rename = "25-34")]
    From25To34,
    #[serde(rename = "35-44")]
    From35To44,
    #[serde(rename = "45plus")]
    From45Plus,
}

impl AgeGroup {
    /// Returns whether cycles in this bracket are commonly less regular.
    pub fn is_transitional(self) -> bool {
        matches!(self, Self::Under18 | Self::From45Plus)
    }
}

/// Personalization record driving irregularity alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertProfile {
    pub user_name: String,
    pub avatar: String,
    /// Lower bound of a normal cycle length, in days.
    pub normal_min: i64,
    /// Upper bound of a normal cycle length, in days.
    pub normal_max: i64,
    /// Base allowance around the median cycle length, in days.
    pub variation_days: i64,
    /// Look-back window for "recent" period entries, in days.
    pub recent_window_days: i64,
    /// Recent entry count that triggers the frequent-logging advisory.
    pub frequent_count: i64,
    /// Minimum recorded periods before any alert is produced.
    pub min_cycles_for_alerts: i64,
    pub age_group: AgeGroup,
    pub pcos: bool,
    pub thyroid: bool,
    pub postpartum: bool,
    pub postpartum_months: Option<i64>,
    pub birth_control: bool,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
    pub typical_period_length: Option<i64>,
    pub travel_recent: bool,
    pub sleep_hours: Option<f64>,
}

impl Default for AlertProfile {
    fn default() -> Self {
        Self {
            user_name: "Friend".to_string(),
            avatar: "🌸".to_string(),
            normal_min: 21,
            normal_max: 35,
            variation_days: 7,
            recent_window_days: 60,
            frequent_count: 3,
            min_cycles_for_alerts: 3,
            age_group: AgeGroup::From25To34,
            pcos: false,
            thyroid: false,
            postpartum: false,
            postpartum_months: None,
            birth_control: false,
            shortest_cycle: None,
            longest_cycle: None,
            typical_period_length: None,
            travel_recent: false,
            sleep_hours: None,
        }
    }
}

impl AlertProfile {
    /// Returns a copy with numeric bounds clamped into a usable domain.
    ///
    /// # Invariants
    /// - Counts and windows are never negative.
    /// - `min_cycles_for_alerts >= 2`, so at least one cycle length exists.
    /// - `normal_min <= normal_max` (swapped when entered reversed).
    /// - No day or count field exceeds `MAX_PROFILE_DAYS`, so derived sums
    ///   cannot overflow.
    pub fn sanitized(&self) -> Self {
        let mut profile = self.clone();
        profile.normal_min = clamp_days(profile.normal_min, 0);
        profile.normal_max = clamp_days(profile.normal_max, 0);
        if profile.normal_min > profile.normal_max {
            std::mem::swap(&mut profile.normal_min, &mut profile.normal_max);
        }
        profile.variation_days = clamp_days(profile.variation_days, 0);
        profile.recent_window_days = clamp_days(profile.recent_window_days, 0);
        profile.frequent_count = clamp_days(profile.frequent_count, 1);
        profile.min_cycles_for_alerts = clamp_days(profile.min_cycles_for_alerts, 2);
        profile.postpartum_months = positive_days(profile.postpartum_months);
        profile.shortest_cycle = positive_days(profile.shortest_cycle);
        profile.longest_cycle = positive_days(profile.longest_cycle);
        profile
    }

    /// Months since birth when postpartum with a known, positive month count.
    pub fn known_postpartum_months(&self) -> Option<i64> {
        if !self.postpartum {
            return None;
        }
        self.postpartum_months.filter(|months| *months > 0)
    }
}

fn clamp_days(value: i64, floor: i64) -> i64 {
    value.clamp(floor, MAX_PROFILE_DAYS)
}

fn positive_days(value: Option<i64>) -> Option<i64> {
    value
        .filter(|days| *days > 0)
        .map(|days| days.min(MAX_PROFILE_DAYS))
}

#[cfg(test)]
mod tests {
    use super::{AlertProfile, MAX_PROFILE_DAYS};

    #[test]
    fn sanitized_swaps_reversed_bounds_and_floors_counts() {
        let profile = AlertProfile {
            normal_min: 40,
            normal_max: 20,
            variation_days: -3,
            frequent_count: 0,
            min_cycles_for_alerts: 0,
            shortest_cycle: Some(0),
            ..AlertProfile::default()
        };

        let sanitized = profile.sanitized();
        assert_eq!(sanitized.normal_min, 20);
        assert_eq!(sanitized.normal_max, 40);
        assert_eq!(sanitized.variation_days, 0);
        assert_eq!(sanitized.frequent_count, 1);
        assert_eq!(sanitized.min_cycles_for_alerts, 2);
        assert_eq!(sanitized.shortest_cycle, None);
    }

    #[test]
    fn sanitized_caps_huge_values() {
        let profile = AlertProfile {
            normal_max: i64::MAX,
            variation_days: i64::MAX,
            frequent_count: i64::MAX,
            postpartum_months: Some(i64::MAX),
            longest_cycle: Some(i64::MAX),
            ..AlertProfile::default()
        };

        let sanitized = profile.sanitized();
        assert_eq!(sanitized.normal_max, MAX_PROFILE_DAYS);
        assert_eq!(sanitized.variation_days, MAX_PROFILE_DAYS);
        assert_eq!(sanitized.frequent_count, MAX_PROFILE_DAYS);
        assert_eq!(sanitized.postpartum_months, Some(MAX_PROFILE_DAYS));
        assert_eq!(sanitized.longest_cycle, Some(MAX_PROFILE_DAYS));
    }

    #[test]
    fn default_profile_is_already_sane() {
        let profile = AlertProfile::default();
        assert_eq!(profile.sanitized(), profile);
    }
}
