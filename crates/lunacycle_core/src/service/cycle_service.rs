//! Cycle tracking use-case service.
//!
//! # Responsibility
//! - Read period/log snapshots from repositories and feed them to the engine.
//! - Call the forecast collaborator and enhance its result with logs.
//!
//! # Invariants
//! - The engine only ever sees one consistent snapshot per call.
//! - A forecast failure yields "no prediction"; it is logged, not raised.
//! - Repository failures are returned unchanged as `ServiceError::Repo`.

use crate::config::EngineConfig;
use crate::engine::alert::{compute_alert, CycleAlert};
use crate::engine::features::{extract_features_in_window, LogFeatures};
use crate::engine::phase::{classify_phase, PhaseInput};
use crate::engine::stats::{
    average_cycle_length, days_until_ovulation, luteal_average, needs_checkin_prompt,
};
use crate::forecast::Forecaster;
use crate::model::daily_log::DailyLog;
use crate::model::period::{start_dates_descending, PeriodId, PeriodRecord};
use crate::model::phase::Phase;
use crate::model::prediction::PredictionRange;
use crate::model::profile::AlertProfile;
use crate::repo::daily_log_repo::DailyLogRepository;
use crate::repo::period_repo::{PeriodRepository, RepoError};
use crate::service::prediction_service::enhance_prediction;
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for cycle tracking use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Everything a dashboard needs, derived from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSnapshot {
    pub prediction: Option<PredictionRange>,
    /// `None` when there is no period, prediction or log for today.
    pub phase: Option<Phase>,
    pub alert: Option<CycleAlert>,
    pub features: LogFeatures,
    pub average_cycle_length: Option<i64>,
    pub luteal_average: Option<i64>,
    /// Signed days from today to the predicted ovulation date.
    pub days_until_ovulation: Option<i64>,
    pub needs_checkin: bool,
    pub period_count: usize,
}

/// Use-case facade over period/log repositories and a forecaster.
pub struct CycleService<P: PeriodRepository, L: DailyLogRepository, F: Forecaster> {
    periods: P,
    logs: L,
    forecaster: F,
    config: EngineConfig,
}

impl<P: PeriodRepository, L: DailyLogRepository, F: Forecaster> CycleService<P, L, F> {
    /// Creates a service with default engine configuration.
    pub fn new(periods: P, logs: L, forecaster: F) -> Self {
        Self::with_config(periods, logs, forecaster, EngineConfig::default())
    }

    pub fn with_config(periods: P, logs: L, forecaster: F, config: EngineConfig) -> Self {
        Self {
            periods,
            logs,
            forecaster,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Records a new period start and returns its storage id.
    pub fn add_period(&self, start_date: NaiveDate) -> ServiceResult<PeriodId> {
        Ok(self.periods.add_period(start_date)?)
    }

    pub fn delete_period(&self, id: PeriodId) -> ServiceResult<()> {
        Ok(self.periods.delete_period(id)?)
    }

    /// Lists period records, most recent first.
    pub fn list_periods(&self) -> ServiceResult<Vec<PeriodRecord>> {
        Ok(self.periods.list_periods()?)
    }

    pub fn upsert_daily_log(&self, log: &DailyLog) -> ServiceResult<()> {
        Ok(self.logs.upsert_daily_log(log)?)
    }

    /// Lists daily logs, most recent first.
    pub fn list_daily_logs(&self) -> ServiceResult<Vec<DailyLog>> {
        Ok(self.logs.list_daily_logs()?)
    }

    /// Forecasts the next period and enhances it with recent logs.
    ///
    /// Returns `None` with too little history or when the forecaster fails.
    pub fn predict(&self) -> ServiceResult<Option<PredictionRange>> {
        let periods = start_dates_descending(&self.periods.list_periods()?);
        let logs = self.logs.list_daily_logs()?;
        Ok(self.predict_from(&periods, &logs))
    }

    /// Classifies today's phase; `None` when no anchor exists at all.
    pub fn current_phase(&self, today: NaiveDate) -> ServiceResult<Option<Phase>> {
        let periods = start_dates_descending(&self.periods.list_periods()?);
        let logs = self.logs.list_daily_logs()?;
        let prediction = self.predict_from(&periods, &logs);
        Ok(self.phase_from(&periods, &logs, prediction.as_ref(), today))
    }

    /// Evaluates irregularity alerts for the stored history.
    pub fn cycle_alert(
        &self,
        profile: &AlertProfile,
        today: NaiveDate,
    ) -> ServiceResult<Option<CycleAlert>> {
        let periods = start_dates_descending(&self.periods.list_periods()?);
        Ok(compute_alert(&periods, profile, today))
    }

    /// Summarizes recent logs against the predicted ovulation date.
    pub fn log_features(&self) -> ServiceResult<LogFeatures> {
        let periods = start_dates_descending(&self.periods.list_periods()?);
        let logs = self.logs.list_daily_logs()?;
        let prediction = self.predict_from(&periods, &logs);
        Ok(self.features_from(&logs, prediction.as_ref()))
    }

    /// Derives prediction, phase, alert and features from one snapshot.
    pub fn snapshot(&self, profile: &AlertProfile, today: NaiveDate) -> ServiceResult<CycleSnapshot> {
        let periods = start_dates_descending(&self.periods.list_periods()?);
        let logs = self.logs.list_daily_logs()?;
        let prediction = self.predict_from(&periods, &logs);

        let snapshot = CycleSnapshot {
            phase: self.phase_from(&periods, &logs, prediction.as_ref(), today),
            alert: compute_alert(&periods, profile, today),
            features: self.features_from(&logs, prediction.as_ref()),
            average_cycle_length: average_cycle_length(&periods),
            luteal_average: luteal_average(&periods),
            days_until_ovulation: prediction
                .as_ref()
                .and_then(|range| range.predicted_ovulation_date)
                .map(|ovulation| days_until_ovulation(ovulation, today)),
            needs_checkin: needs_checkin_prompt(
                &logs,
                today,
                self.config.checkin_prompt_after_days,
            ),
            period_count: periods.len(),
            prediction,
        };

        info!(
            "event=snapshot module=service status=ok periods={} logs={} has_prediction={} has_alert={}",
            snapshot.period_count,
            logs.len(),
            snapshot.prediction.is_some(),
            snapshot.alert.is_some()
        );
        Ok(snapshot)
    }

    fn predict_from(&self, periods: &[NaiveDate], logs: &[DailyLog]) -> Option<PredictionRange> {
        if periods.len() < self.config.min_periods_for_prediction {
            return None;
        }

        match self.forecaster.forecast(periods) {
            Ok(base) => Some(enhance_prediction(&base, logs, periods, &self.config)),
            Err(err) => {
                warn!(
                    "event=forecast module=service status=error periods={} error={err}",
                    periods.len()
                );
                None
            }
        }
    }

    fn phase_from(
        &self,
        periods: &[NaiveDate],
        logs: &[DailyLog],
        prediction: Option<&PredictionRange>,
        today: NaiveDate,
    ) -> Option<Phase> {
        let mut input = PhaseInput::new(today);
        input.last_period_date = periods.iter().max().copied();
        input.predicted_ovulation_date = prediction.and_then(|range| range.predicted_ovulation_date);
        input.today_log = logs.iter().find(|log| log.date == today);
        input.average_cycle_length = average_cycle_length(periods).map(|days| days as f64);

        if !input.has_anchor() {
            return None;
        }
        Some(classify_phase(&input, &self.config))
    }

    fn features_from(&self, logs: &[DailyLog], prediction: Option<&PredictionRange>) -> LogFeatures {
        extract_features_in_window(
            logs,
            prediction.and_then(|range| range.predicted_ovulation_date),
            self.config.recent_log_window,
        )
    }
}
