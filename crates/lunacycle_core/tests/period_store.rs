use chrono::{NaiveDate, TimeZone, Utc};
use lunacycle_core::db::open_db_in_memory;
use lunacycle_core::{
    DailyLog, DailyLogRepository, Flow, Mucus, Pain, PeriodRepository, RepoError,
    SqliteDailyLogRepository, SqlitePeriodRepository, Stress,
};

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

#[test]
fn periods_are_listed_most_recent_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::new(&conn);

    let january = repo.add_period(day("2026-01-05")).unwrap();
    let december = repo.add_period(day("2025-12-05")).unwrap();
    let february = repo.add_period(day("2026-02-01")).unwrap();

    let listed = repo.list_periods().unwrap();
    let ids: Vec<_> = listed.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![february, january, december]);
    assert_eq!(listed[0].start_date, day("2026-02-01"));
}

#[test]
fn adding_same_start_date_twice_is_duplicate() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::new(&conn);

    repo.add_period(day("2026-01-05")).unwrap();
    let err = repo.add_period(day("2026-01-05")).unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(date) if date == day("2026-01-05")));
    assert_eq!(repo.list_periods().unwrap().len(), 1);
}

#[test]
fn deleting_removes_only_that_period() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::new(&conn);

    let first = repo.add_period(day("2026-01-05")).unwrap();
    repo.add_period(day("2026-02-01")).unwrap();
    repo.delete_period(first).unwrap();

    let listed = repo.list_periods().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].start_date, day("2026-02-01"));
}

#[test]
fn deleting_unknown_period_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::new(&conn);

    let err = repo.delete_period(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn corrupt_start_date_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO periods (start_date) VALUES ('05/01/2026');", [])
        .unwrap();

    let err = SqlitePeriodRepository::new(&conn).list_periods().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn daily_log_round_trips_explicit_none_and_unlogged_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDailyLogRepository::new(&conn);

    let mut log = DailyLog::new(day("2026-02-14"));
    log.flow = Some(Flow::None);
    log.pain = Some(Pain::None);
    log.mucus = Some(Mucus::EggWhite);
    repo.upsert_daily_log(&log).unwrap();

    let stored = repo.get_daily_log(day("2026-02-14")).unwrap().unwrap();
    assert_eq!(stored.flow, Some(Flow::None));
    assert_eq!(stored.pain, Some(Pain::None));
    assert_eq!(stored.mucus, Some(Mucus::EggWhite));
    assert_eq!(stored.mood, None);
    assert_eq!(stored.stress, None);
    assert!(!stored.has_flow());
}

#[test]
fn upsert_replaces_fields_but_keeps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDailyLogRepository::new(&conn);
    let created_at = Utc.with_ymd_and_hms(2026, 2, 14, 8, 30, 0).unwrap();

    let mut first = DailyLog::with_created_at(day("2026-02-14"), created_at);
    first.stress = Some(Stress::High);
    first.flow = Some(Flow::Light);
    repo.upsert_daily_log(&first).unwrap();

    let mut second = DailyLog::new(day("2026-02-14"));
    second.stress = Some(Stress::Low);
    repo.upsert_daily_log(&second).unwrap();

    let stored = repo.get_daily_log(day("2026-02-14")).unwrap().unwrap();
    assert_eq!(stored.stress, Some(Stress::Low));
    assert_eq!(stored.flow, None);
    assert_eq!(stored.created_at, created_at);
    assert_eq!(repo.list_daily_logs().unwrap().len(), 1);
}

#[test]
fn missing_daily_log_is_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDailyLogRepository::new(&conn);
    assert!(repo.get_daily_log(day("2026-02-14")).unwrap().is_none());
}

#[test]
fn daily_logs_are_listed_most_recent_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDailyLogRepository::new(&conn);

    for date in ["2026-02-12", "2026-02-14", "2026-02-13"] {
        repo.upsert_daily_log(&DailyLog::new(day(date))).unwrap();
    }

    let dates: Vec<_> = repo
        .list_daily_logs()
        .unwrap()
        .into_iter()
        .map(|log| log.date)
        .collect();
    assert_eq!(
        dates,
        vec![day("2026-02-14"), day("2026-02-13"), day("2026-02-12")]
    );
}

#[test]
fn unknown_persisted_category_is_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO daily_logs (date, mucus, created_at)
         VALUES ('2026-02-14', 'watery', '2026-02-14T08:30:00+00:00');",
        [],
    )
    .unwrap();

    let err = SqliteDailyLogRepository::new(&conn)
        .get_daily_log(day("2026-02-14"))
        .unwrap_err();
    match err {
        RepoError::InvalidData(message) => assert!(message.contains("watery")),
        other => panic!("unexpected error: {other}"),
    }
}
