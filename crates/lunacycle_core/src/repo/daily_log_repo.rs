//! Daily log repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide upsert/get/list APIs over `daily_logs` storage.
//!
//! # Invariants
//! - `date` is the unique key; upserting an existing date replaces every
//!   categorical field but keeps the original `created_at`.
//! - Unlogged fields persist as SQL `NULL`; explicit `none` persists as text.
//! - Lists are ordered by date, most recent first.

use super::period_repo::{format_date, parse_date, RepoError, RepoResult};
use crate::model::daily_log::{DailyLog, Energy, Flow, Mood, Mucus, Pain, SleepBand, Stress};
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use rusqlite::{params, Connection, Row};

const DAILY_LOG_SELECT_SQL: &str = "SELECT
    date,
    mood,
    energy,
    pain,
    mucus,
    sleep_band,
    stress,
    flow,
    created_at
FROM daily_logs";

/// Repository interface for daily symptom logs.
pub trait DailyLogRepository {
    fn upsert_daily_log(&self, log: &DailyLog) -> RepoResult<()>;
    fn get_daily_log(&self, date: NaiveDate) -> RepoResult<Option<DailyLog>>;
    fn list_daily_logs(&self) -> RepoResult<Vec<DailyLog>>;
}

/// SQLite-backed daily log repository.
pub struct SqliteDailyLogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDailyLogRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DailyLogRepository for SqliteDailyLogRepository<'_> {
    fn upsert_daily_log(&self, log: &DailyLog) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO daily_logs (
                date,
                mood,
                energy,
                pain,
                mucus,
                sleep_band,
                stress,
                flow,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(date) DO UPDATE SET
                mood = excluded.mood,
                energy = excluded.energy,
                pain = excluded.pain,
                mucus = excluded.mucus,
                sleep_band = excluded.sleep_band,
                stress = excluded.stress,
                flow = excluded.flow,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                format_date(log.date),
                log.mood.map(Mood::as_str),
                log.energy.map(Energy::as_str),
                log.pain.map(Pain::as_str),
                log.mucus.map(Mucus::as_str),
                log.sleep_band.map(SleepBand::as_str),
                log.stress.map(Stress::as_str),
                log.flow.map(Flow::as_str),
                log.created_at.to_rfc3339(),
            ],
        )?;

        debug!(
            "event=daily_log_upsert module=repo status=ok date={}",
            log.date
        );
        Ok(())
    }

    fn get_daily_log(&self, date: NaiveDate) -> RepoResult<Option<DailyLog>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DAILY_LOG_SELECT_SQL} WHERE date = ?1;"))?;
        let mut rows = stmt.query(params![format_date(date)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_daily_log_row(row)?));
        }

        Ok(None)
    }

    fn list_daily_logs(&self) -> RepoResult<Vec<DailyLog>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DAILY_LOG_SELECT_SQL} ORDER BY date DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut logs = Vec::new();

        while let Some(row) = rows.next()? {
            logs.push(parse_daily_log_row(row)?);
        }

        Ok(logs)
    }
}

fn parse_daily_log_row(row: &Row<'_>) -> RepoResult<DailyLog> {
    let date_text: String = row.get("date")?;
    let created_text: String = row.get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_text)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid timestamp `{created_text}` in daily_logs.created_at"
            ))
        })?;

    let mut log = DailyLog::with_created_at(parse_date(&date_text, "daily_logs.date")?, created_at);
    log.mood = parse_column(row, "mood", Mood::from_wire)?;
    log.energy = parse_column(row, "energy", Energy::from_wire)?;
    log.pain = parse_column(row, "pain", Pain::from_wire)?;
    log.mucus = parse_column(row, "mucus", Mucus::from_wire)?;
    log.sleep_band = parse_column(row, "sleep_band", SleepBand::from_wire)?;
    log.stress = parse_column(row, "stress", Stress::from_wire)?;
    log.flow = parse_column(row, "flow", Flow::from_wire)?;
    Ok(log)
}

fn parse_column<T>(
    row: &Row<'_>,
    column: &str,
    parse: fn(&str) -> Option<T>,
) -> RepoResult<Option<T>> {
    match row.get::<_, Option<String>>(column)? {
        Some(value) => parse(&value).map(Some).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid value `{value}` in daily_logs.{column}"))
        }),
        None => Ok(None),
    }
}
