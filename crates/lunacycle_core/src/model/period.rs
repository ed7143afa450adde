//! Period start record model.
//!
//! # Invariants
//! - `id` is assigned by persistence on create and never reused.
//! - Start dates are unique within one history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage-assigned identifier of a period record.
pub type PeriodId = i64;

/// One recorded period start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub id: PeriodId,
    pub start_date: NaiveDate,
}

/// Projects records onto their start dates, most recent first.
pub fn start_dates_descending(records: &[PeriodRecord]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = records.iter().map(|record| record.start_date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates
}
