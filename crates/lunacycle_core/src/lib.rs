//! Core domain logic for Lunacycle.
//! This crate owns the cycle inference engine and its persistence plumbing.

pub mod config;
pub mod db;
pub mod engine;
pub mod forecast;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::EngineConfig;
pub use engine::alert::{
    compute_alert, compute_variation_allowance, expected_band, CycleAlert, CycleBand,
    VariationAllowance,
};
pub use engine::confidence::{
    adjust_confidence, adjust_window, ConfidenceAdjustment, PredictionWindow,
};
pub use engine::features::{extract_features, extract_features_in_window, LogFeatures};
pub use engine::ovulation::{detect_ovulation, estimate_ovulation_date};
pub use engine::phase::{classify_phase, PhaseInput};
pub use forecast::{BaselineForecaster, ForecastError, ForecastResult, Forecaster};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::daily_log::{DailyLog, Energy, Flow, Mood, Mucus, Pain, SleepBand, Stress};
pub use model::period::{PeriodId, PeriodRecord};
pub use model::phase::Phase;
pub use model::prediction::{BaseForecast, OvulationReason, OvulationSignal, PredictionRange};
pub use model::profile::{AgeGroup, AlertProfile};
pub use repo::daily_log_repo::{DailyLogRepository, SqliteDailyLogRepository};
pub use repo::period_repo::{PeriodRepository, RepoError, RepoResult, SqlitePeriodRepository};
pub use service::cycle_service::{CycleService, CycleSnapshot, ServiceError, ServiceResult};
pub use service::prediction_service::enhance_prediction;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
