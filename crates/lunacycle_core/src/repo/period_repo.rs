//! Period record repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide add/delete/list APIs over `periods` storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Start dates are unique; re-adding an existing date is a `Duplicate`.
//! - Lists are ordered by start date, most recent first.
//! - Read paths reject unparsable persisted dates instead of masking them.

use crate::db::DbError;
use crate::model::period::{PeriodId, PeriodRecord};
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for period and daily-log persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(PeriodId),
    Duplicate(NaiveDate),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "period not found: {id}"),
            Self::Duplicate(date) => write!(f, "period already recorded for {date}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Duplicate(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for period start records.
pub trait PeriodRepository {
    fn add_period(&self, start_date: NaiveDate) -> RepoResult<PeriodId>;
    fn delete_period(&self, id: PeriodId) -> RepoResult<()>;
    fn list_periods(&self) -> RepoResult<Vec<PeriodRecord>>;
}

/// SQLite-backed period repository.
pub struct SqlitePeriodRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePeriodRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PeriodRepository for SqlitePeriodRepository<'_> {
    fn add_period(&self, start_date: NaiveDate) -> RepoResult<PeriodId> {
        let inserted = self.conn.execute(
            "INSERT INTO periods (start_date) VALUES (?1);",
            params![format_date(start_date)],
        );

        match inserted {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                info!("event=period_add module=repo status=ok period_id={id}");
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::Duplicate(start_date))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn delete_period(&self, id: PeriodId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM periods WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!("event=period_delete module=repo status=ok period_id={id}");
        Ok(())
    }

    fn list_periods(&self) -> RepoResult<Vec<PeriodRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, start_date FROM periods ORDER BY start_date DESC, id DESC;")?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_period_row(row)?);
        }

        Ok(records)
    }
}

fn parse_period_row(row: &Row<'_>) -> RepoResult<PeriodRecord> {
    let start_text: String = row.get("start_date")?;
    Ok(PeriodRecord {
        id: row.get("id")?,
        start_date: parse_date(&start_text, "periods.start_date")?,
    })
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}
