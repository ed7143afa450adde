//! Forecast and prediction value types.
//!
//! # Responsibility
//! - Describe the forecast collaborator's base window.
//! - Describe the log-enhanced prediction produced by the service layer.
//!
//! # Invariants
//! - `confidence` values are in `[0, 1]`.
//! - Enhanced predictions keep the original confidence in `base_confidence`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Next-period window returned by a forecaster, before log enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseForecast {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
    pub confidence: f64,
}

/// Which symptom produced an ovulation signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvulationReason {
    Mucus,
    Pain,
}

/// Direct symptom-log evidence of ovulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvulationSignal {
    pub ovulation_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovulation_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<OvulationReason>,
}

impl OvulationSignal {
    /// Signal with no evidence found.
    pub fn not_detected() -> Self {
        Self::default()
    }

    /// Signal confirmed on `date` by `reason`.
    pub fn detected(date: NaiveDate, reason: OvulationReason) -> Self {
        Self {
            ovulation_detected: true,
            ovulation_date: Some(date),
            reason: Some(reason),
        }
    }
}

/// Final prediction surfaced to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRange {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_ovulation_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovulation_signal: Option<OvulationSignal>,
}

impl From<BaseForecast> for PredictionRange {
    fn from(base: BaseForecast) -> Self {
        Self {
            earliest: base.earliest,
            latest: base.latest,
            confidence: base.confidence,
            base_confidence: None,
            adjustment_note: None,
            predicted_ovulation_date: None,
            ovulation_signal: None,
        }
    }
}
