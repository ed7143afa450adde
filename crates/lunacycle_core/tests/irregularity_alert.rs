use chrono::NaiveDate;
use lunacycle_core::{
    compute_alert, compute_variation_allowance, expected_band, AgeGroup, AlertProfile,
    CycleAlert,
};

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn days(values: &[&str]) -> Vec<NaiveDate> {
    values.iter().map(|value| day(value)).collect()
}

#[test]
fn default_profile_allowance_is_base_variation() {
    let allowance = compute_variation_allowance(&AlertProfile::default());
    assert_eq!(allowance.days, 7);
    assert_eq!(allowance.pcos_boost, 0);
    assert_eq!(allowance.postpartum_boost, 0);
}

#[test]
fn health_context_boosts_accumulate() {
    let profile = AlertProfile {
        age_group: AgeGroup::From45Plus,
        pcos: true,
        postpartum: true,
        postpartum_months: Some(9),
        sleep_hours: Some(5.0),
        ..AlertProfile::default()
    };

    let allowance = compute_variation_allowance(&profile);
    assert_eq!(allowance.pcos_boost, 4);
    assert_eq!(allowance.postpartum_boost, 4);
    assert_eq!(allowance.days, 7 + 3 + 4 + 4 + 2);
}

#[test]
fn unknown_postpartum_months_use_middle_boost() {
    let profile = AlertProfile {
        postpartum: true,
        postpartum_months: None,
        ..AlertProfile::default()
    };
    assert_eq!(compute_variation_allowance(&profile).postpartum_boost, 4);
}

#[test]
fn allowance_never_drops_below_floor() {
    let profile = AlertProfile {
        variation_days: -20,
        ..AlertProfile::default()
    };
    assert_eq!(compute_variation_allowance(&profile).days, 3);
}

#[test]
fn expected_band_respects_normal_bounds() {
    let band = expected_band(28.0, &AlertProfile::default());
    assert_eq!((band.min, band.max), (21, 35));
}

#[test]
fn fewer_periods_than_required_yield_no_alert() {
    let periods = days(&["2025-09-01", "2025-12-16"]);
    assert_eq!(
        compute_alert(&periods, &AlertProfile::default(), day("2026-06-01")),
        None
    );
}

#[test]
fn long_latest_cycle_is_out_of_range() {
    let periods = days(&["2025-12-16", "2025-09-01", "2025-10-27", "2025-09-29"]);
    let alert = compute_alert(&periods, &AlertProfile::default(), day("2026-06-01"));

    assert_eq!(
        alert,
        Some(CycleAlert::OutOfRange {
            latest_cycle: 50,
            expected_min: 21,
            expected_max: 35,
        })
    );
    assert_eq!(
        alert.unwrap().to_string(),
        "Your latest cycle was 50 days. Based on your recent history, your expected range is 21–35 days."
    );
}

#[test]
fn regular_history_raises_nothing() {
    let periods = days(&["2025-09-01", "2025-09-29", "2025-10-27", "2025-11-24"]);
    assert_eq!(
        compute_alert(&periods, &AlertProfile::default(), day("2026-06-01")),
        None
    );
}

#[test]
fn many_recent_entries_raise_frequency_advisory() {
    let periods = days(&["2026-01-01", "2026-01-29", "2026-02-26"]);
    let alert = compute_alert(&periods, &AlertProfile::default(), day("2026-03-01"));

    assert_eq!(
        alert,
        Some(CycleAlert::FrequentEntries {
            count: 3,
            window_days: 60,
        })
    );
    assert!(alert.unwrap().to_string().starts_with("You logged 3 entries in the last 60 days."));
}

#[test]
fn early_postpartum_raises_frequency_threshold() {
    let periods = days(&["2026-01-01", "2026-01-29", "2026-02-26"]);
    let profile = AlertProfile {
        postpartum: true,
        postpartum_months: Some(4),
        ..AlertProfile::default()
    };
    assert_eq!(compute_alert(&periods, &profile, day("2026-03-01")), None);
}

#[test]
fn recent_entries_form_the_base_when_available() {
    let periods = days(&[
        "2025-01-01",
        "2025-03-15",
        "2026-01-01",
        "2026-01-29",
        "2026-02-26",
    ]);
    let profile = AlertProfile {
        frequent_count: 10,
        ..AlertProfile::default()
    };
    assert_eq!(compute_alert(&periods, &profile, day("2026-03-01")), None);
}

#[test]
fn longest_cycle_caps_the_band() {
    let periods = days(&["2025-01-01", "2025-01-31", "2025-03-02", "2025-04-01"]);
    let profile = AlertProfile {
        longest_cycle: Some(29),
        ..AlertProfile::default()
    };
    assert_eq!(
        compute_alert(&periods, &profile, day("2026-06-01")),
        Some(CycleAlert::OutOfRange {
            latest_cycle: 30,
            expected_min: 23,
            expected_max: 29,
        })
    );
}

#[test]
fn conflicting_cycle_bounds_collapse_to_single_day_band() {
    let periods = days(&["2025-01-01", "2025-01-31", "2025-03-02", "2025-04-01"]);
    let profile = AlertProfile {
        shortest_cycle: Some(33),
        longest_cycle: Some(25),
        ..AlertProfile::default()
    };
    assert_eq!(
        compute_alert(&periods, &profile, day("2026-06-01")),
        Some(CycleAlert::OutOfRange {
            latest_cycle: 30,
            expected_min: 33,
            expected_max: 33,
        })
    );
}

#[test]
fn nonsensical_profile_values_do_not_panic() {
    let periods = days(&["2025-01-01", "2025-01-31", "2025-03-02"]);
    let profile = AlertProfile {
        normal_min: 50,
        normal_max: -4,
        min_cycles_for_alerts: -1,
        recent_window_days: -10,
        frequent_count: -3,
        ..AlertProfile::default()
    };
    let _ = compute_alert(&periods, &profile, day("2025-03-03"));
}

#[test]
fn huge_profile_values_are_capped_before_summing() {
    let periods = days(&["2025-12-05", "2026-01-05", "2026-02-01"]);
    let profile = AlertProfile {
        variation_days: i64::MAX,
        normal_max: i64::MAX,
        frequent_count: i64::MAX,
        pcos: true,
        postpartum: true,
        postpartum_months: Some(i64::MAX),
        ..AlertProfile::default()
    };

    assert_eq!(compute_variation_allowance(&profile).days, 365 + 4 + 2);
    let band = expected_band(29.0, &profile);
    assert!(band.min <= band.max);
    assert_eq!(compute_alert(&periods, &profile, day("2026-02-10")), None);
}
