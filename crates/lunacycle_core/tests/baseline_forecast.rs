use chrono::NaiveDate;
use lunacycle_core::{BaselineForecaster, ForecastError, Forecaster};

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn days(values: &[&str]) -> Vec<NaiveDate> {
    values.iter().map(|value| day(value)).collect()
}

#[test]
fn varying_history_spans_one_standard_deviation() {
    let forecast = BaselineForecaster::new()
        .forecast(&days(&["2026-02-01", "2026-01-05", "2025-12-05"]))
        .unwrap();

    assert_eq!(forecast.earliest, day("2026-02-27"));
    assert_eq!(forecast.latest, day("2026-03-03"));
    assert!((forecast.confidence - 0.95).abs() < 1e-9);
}

#[test]
fn flat_history_uses_fixed_spread() {
    let forecast = BaselineForecaster::new()
        .forecast(&days(&["2026-01-01", "2026-01-29", "2026-02-26"]))
        .unwrap();

    assert_eq!(forecast.earliest, day("2026-03-24"));
    assert_eq!(forecast.latest, day("2026-03-28"));
    assert!((forecast.confidence - 0.95).abs() < 1e-9);
}

#[test]
fn input_order_does_not_matter() {
    let forecaster = BaselineForecaster::new();
    let ascending = forecaster
        .forecast(&days(&["2025-12-05", "2026-01-05", "2026-02-01"]))
        .unwrap();
    let descending = forecaster
        .forecast(&days(&["2026-02-01", "2026-01-05", "2025-12-05"]))
        .unwrap();
    assert_eq!(ascending, descending);
}

#[test]
fn erratic_history_lowers_confidence() {
    let forecast = BaselineForecaster::new()
        .forecast(&days(&["2025-10-01", "2025-10-22", "2025-12-01"]))
        .unwrap();
    assert!(forecast.confidence < 0.95);
    assert!(forecast.confidence >= 0.5);
}

#[test]
fn single_period_is_insufficient_history() {
    let err = BaselineForecaster::new()
        .forecast(&days(&["2026-02-01"]))
        .unwrap_err();
    assert!(matches!(
        err,
        ForecastError::InsufficientHistory {
            required: 2,
            actual: 1
        }
    ));
}
