//! Daily symptom log model.
//!
//! # Responsibility
//! - Define the per-day check-in record and its categorical fields.
//! - Keep "not logged" distinct from an explicitly logged neutral value.
//!
//! # Invariants
//! - `date` is the unique key of a log within one user's history.
//! - Every categorical field is `Option<T>`: `None` means unlogged, while
//!   `Some(Flow::None)` / `Some(Pain::None)` record an explicit "none".

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Self-reported mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    VeryLow,
    Low,
    Neutral,
    Good,
    Great,
}

/// Self-reported energy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Energy {
    Low,
    Medium,
    High,
}

/// Cramp/pain intensity. `None` is an explicit "no pain" entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pain {
    None,
    Mild,
    High,
}

/// Cervical mucus observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mucus {
    Dry,
    Sticky,
    Creamy,
    /// Fertile-quality mucus, treated as direct evidence of ovulation.
    EggWhite,
}

/// Sleep duration band for the previous night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepBand {
    /// Less than 6 hours.
    #[serde(rename = "lt6")]
    Lt6,
    /// Between 6 and 8 hours.
    #[serde(rename = "btw6_8")]
    Btw6And8,
    /// More than 8 hours.
    #[serde(rename = "gt8")]
    Gt8,
}

/// Self-reported stress level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stress {
    Low,
    Normal,
    High,
}

/// Menstrual flow. `None` is an explicit non-period marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    None,
    Light,
    Medium,
    Heavy,
}

/// Generates stable wire-name conversions shared by storage and CLI parsing.
macro_rules! wire_names {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Stable wire name, identical to the serde representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Parses a wire name; returns `None` for unknown values.
            pub fn from_wire(value: &str) -> Option<Self> {
                match value {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

wire_names!(Mood {
    VeryLow => "very_low",
    Low => "low",
    Neutral => "neutral",
    Good => "good",
    Great => "great",
});
wire_names!(Energy { Low => "low", Medium => "medium", High => "high" });
wire_names!(Pain { None => "none", Mild => "mild", High => "high" });
wire_names!(Mucus {
    Dry => "dry",
    Sticky => "sticky",
    Creamy => "creamy",
    EggWhite => "egg_white",
});
wire_names!(SleepBand { Lt6 => "lt6", Btw6And8 => "btw6_8", Gt8 => "gt8" });
wire_names!(Stress { Low => "low", Normal => "normal", High => "high" });
wire_names!(Flow {
    None => "none",
    Light => "light",
    Medium => "medium",
    Heavy => "heavy",
});

/// One day of symptom tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    /// Calendar day this log describes.
    pub date: NaiveDate,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub energy: Option<Energy>,
    #[serde(default)]
    pub pain: Option<Pain>,
    #[serde(default)]
    pub mucus: Option<Mucus>,
    #[serde(default)]
    pub sleep_band: Option<SleepBand>,
    #[serde(default)]
    pub stress: Option<Stress>,
    #[serde(default)]
    pub flow: Option<Flow>,
    /// Wall-clock time the log was first written.
    pub created_at: DateTime<Utc>,
}

impl DailyLog {
    /// Creates an empty log (every field unlogged) for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self::with_created_at(date, Utc::now())
    }

    /// Creates an empty log with a caller-provided creation timestamp.
    ///
    /// Used by persistence read paths and deterministic tests.
    pub fn with_created_at(date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            date,
            mood: None,
            energy: None,
            pain: None,
            mucus: None,
            sleep_band: None,
            stress: None,
            flow: None,
            created_at,
        }
    }

    /// Returns whether this log records an actual bleed (logged and not `none`).
    pub fn has_flow(&self) -> bool {
        matches!(self.flow, Some(flow) if flow != Flow::None)
    }

    /// Returns whether this log records pain (logged and not `none`).
    pub fn has_pain(&self) -> bool {
        matches!(self.pain, Some(pain) if pain != Pain::None)
    }

    /// Returns whether this log records egg-white cervical mucus.
    pub fn has_egg_white_mucus(&self) -> bool {
        self.mucus == Some(Mucus::EggWhite)
    }
}

/// Returns a copy of `logs` sorted ascending by date.
///
/// Input order is irrelevant; the slice itself is never reordered.
pub fn sorted_by_date(logs: &[DailyLog]) -> Vec<&DailyLog> {
    let mut sorted: Vec<&DailyLog> = logs.iter().collect();
    sorted.sort_by_key(|log| log.date);
    sorted
}

/// Returns the `count` most recent logs, oldest first.
pub fn most_recent(logs: &[DailyLog], count: usize) -> Vec<&DailyLog> {
    let sorted = sorted_by_date(logs);
    let skip = sorted.len().saturating_sub(count);
    sorted.into_iter().skip(skip).collect()
}

#[cfg(test)]
mod tests {
    use super::{most_recent, DailyLog, Flow, Mucus, Pain, SleepBand};
    use chrono::NaiveDate;

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn explicit_none_is_not_flow_or_pain() {
        let mut log = DailyLog::new(day("2026-02-01"));
        assert!(!log.has_flow());
        log.flow = Some(Flow::None);
        log.pain = Some(Pain::None);
        assert!(!log.has_flow());
        assert!(!log.has_pain());
        log.flow = Some(Flow::Light);
        assert!(log.has_flow());
    }

    #[test]
    fn wire_names_match_serde_representation() {
        assert_eq!(Mucus::EggWhite.as_str(), "egg_white");
        assert_eq!(SleepBand::from_wire("btw6_8"), Some(SleepBand::Btw6And8));
        assert_eq!(Flow::from_wire("spotting"), None);
        assert_eq!(
            serde_json::to_value(SleepBand::Btw6And8).unwrap(),
            serde_json::json!(SleepBand::Btw6And8.as_str())
        );
    }

    #[test]
    fn most_recent_keeps_latest_dates_in_ascending_order() {
        let logs = vec![
            DailyLog::new(day("2026-02-03")),
            DailyLog::new(day("2026-02-01")),
            DailyLog::new(day("2026-02-02")),
        ];
        let recent = most_recent(&logs, 2);
        let dates: Vec<_> = recent.iter().map(|log| log.date).collect();
        assert_eq!(dates, vec![day("2026-02-02"), day("2026-02-03")]);
    }
}
