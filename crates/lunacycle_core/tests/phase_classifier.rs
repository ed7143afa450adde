use chrono::NaiveDate;
use lunacycle_core::{
    classify_phase, DailyLog, EngineConfig, Flow, Mucus, Phase, PhaseInput,
};

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn classify(input: PhaseInput<'_>) -> Phase {
    classify_phase(&input, &EngineConfig::default())
}

#[test]
fn flow_on_reference_date_overrides_ovulation_proximity() {
    let mut log = DailyLog::new(day("2026-02-15"));
    log.flow = Some(Flow::Medium);
    log.mucus = Some(Mucus::EggWhite);

    let input = PhaseInput::new(day("2026-02-15"))
        .with_last_period(day("2026-02-01"))
        .with_predicted_ovulation(day("2026-02-15"))
        .with_today_log(&log);
    assert_eq!(classify(input), Phase::Menstrual);
}

#[test]
fn explicit_no_flow_falls_through_to_mucus_evidence() {
    let mut log = DailyLog::new(day("2026-02-25"));
    log.flow = Some(Flow::None);
    log.mucus = Some(Mucus::EggWhite);

    let input = PhaseInput::new(day("2026-02-25"))
        .with_last_period(day("2026-02-01"))
        .with_today_log(&log);
    assert_eq!(classify(input), Phase::Ovulation);
}

#[test]
fn ovulation_window_is_symmetric_around_anchor() {
    for reference in ["2026-02-14", "2026-02-15", "2026-02-16"] {
        let input = PhaseInput::new(day(reference))
            .with_last_period(day("2026-02-01"))
            .with_predicted_ovulation(day("2026-02-15"));
        assert_eq!(classify(input), Phase::Ovulation, "reference {reference}");
    }

    let before = PhaseInput::new(day("2026-02-13")).with_predicted_ovulation(day("2026-02-15"));
    let after = PhaseInput::new(day("2026-02-17")).with_predicted_ovulation(day("2026-02-15"));
    assert_eq!(classify(before), Phase::Follicular);
    assert_eq!(classify(after), Phase::Luteal);
}

#[test]
fn early_cycle_days_before_ovulation_are_menstrual() {
    let base = PhaseInput::new(day("2026-02-05"))
        .with_last_period(day("2026-02-01"))
        .with_predicted_ovulation(day("2026-02-15"));
    assert_eq!(classify(base), Phase::Menstrual);

    let later = PhaseInput {
        reference_date: day("2026-02-06"),
        ..base
    };
    assert_eq!(classify(later), Phase::Follicular);
}

#[test]
fn estimated_ovulation_uses_average_cycle_length() {
    let on_estimate = PhaseInput::new(day("2026-02-19"))
        .with_last_period(day("2026-02-01"))
        .with_average_cycle_length(32.0);
    assert_eq!(classify(on_estimate), Phase::Ovulation);

    let before_estimate = PhaseInput {
        reference_date: day("2026-02-15"),
        ..on_estimate
    };
    assert_eq!(classify(before_estimate), Phase::Follicular);
}

#[test]
fn implausible_average_falls_back_to_default_cycle_length() {
    let input = PhaseInput::new(day("2026-02-15"))
        .with_last_period(day("2026-02-01"))
        .with_average_cycle_length(9.0);
    assert_eq!(classify(input), Phase::Ovulation);
}

#[test]
fn missing_anchors_use_configured_fallback_phase() {
    let input = PhaseInput::new(day("2026-02-15"));
    assert!(!input.has_anchor());
    assert_eq!(classify(input), Phase::Luteal);

    let config = EngineConfig {
        fallback_phase: Phase::Follicular,
        ..EngineConfig::default()
    };
    assert_eq!(classify_phase(&input, &config), Phase::Follicular);
}

#[test]
fn classification_is_total_over_anchor_combinations() {
    let mut flow_log = DailyLog::new(day("2026-03-01"));
    flow_log.flow = Some(Flow::Light);
    let empty_log = DailyLog::new(day("2026-03-01"));
    let logs = [None, Some(&empty_log), Some(&flow_log)];
    let periods = [None, Some(day("2026-02-01")), Some(day("2026-03-05"))];
    let ovulations = [None, Some(day("2026-02-15")), Some(day("2026-03-20"))];
    let averages = [None, Some(5.0), Some(30.0)];

    for log in logs {
        for period in periods {
            for ovulation in ovulations {
                for average in averages {
                    let input = PhaseInput {
                        last_period_date: period,
                        predicted_ovulation_date: ovulation,
                        today_log: log,
                        reference_date: day("2026-03-01"),
                        average_cycle_length: average,
                    };
                    let phase = classify(input);
                    assert!(matches!(
                        phase,
                        Phase::Menstrual | Phase::Follicular | Phase::Ovulation | Phase::Luteal
                    ));
                }
            }
        }
    }
}

#[test]
fn non_finite_average_falls_back_to_default_cycle() {
    for average in [f64::INFINITY, f64::NAN] {
        let input = PhaseInput::new(day("2026-02-10"))
            .with_last_period(day("2026-02-01"))
            .with_average_cycle_length(average);
        assert_eq!(classify(input), Phase::Follicular);
    }
}

#[test]
fn enormous_average_does_not_overflow_calendar() {
    let input = PhaseInput::new(day("2026-02-10"))
        .with_last_period(day("2026-02-01"))
        .with_average_cycle_length(1e300);
    assert_eq!(classify(input), Phase::Follicular);

    let late = PhaseInput::new(day("2026-02-03"))
        .with_last_period(day("2026-02-01"))
        .with_average_cycle_length(f64::MAX);
    assert_eq!(classify(late), Phase::Menstrual);
}
