//! Command-line front end for the cycle inference engine.
//!
//! # Responsibility
//! - Map subcommands onto `CycleService` use-cases over a SQLite file.
//! - Keep stdout for results only; diagnostics go to the rolling log files.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::error;
use lunacycle_core::db::{open_db, DbError};
use lunacycle_core::{
    init_logging, AlertProfile, BaselineForecaster, CycleService, DailyLog, Energy, Flow,
    LogLevel, LoggingError, Mood, Mucus, Pain, PeriodId, ServiceError, SleepBand,
    SqliteDailyLogRepository, SqlitePeriodRepository, Stress,
};
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type Service<'conn> = CycleService<
    SqlitePeriodRepository<'conn>,
    SqliteDailyLogRepository<'conn>,
    BaselineForecaster,
>;

#[derive(Debug, Parser)]
#[command(name = "lunacycle", version, about = "Offline menstrual cycle tracker")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, env = "LUNACYCLE_DB", default_value = "lunacycle.db")]
    db: PathBuf,

    /// Directory for rolling log files; logging stays off when omitted.
    #[arg(long, global = true, env = "LUNACYCLE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "LUNACYCLE_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Record a period start date (YYYY-MM-DD).
    Add { date: NaiveDate },
    /// Delete a period record by id.
    Delete { id: PeriodId },
    /// List recorded periods, most recent first.
    History {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Create or replace the symptom log for a day.
    Log(LogArgs),
    /// Predict the next period window.
    Predict,
    /// Classify the cycle phase of a day.
    Phase {
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Check the history for irregular cycles.
    Alert {
        /// JSON personalization profile; missing fields use defaults.
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// Summarize recent logs.
    Features,
    /// Print the full dashboard snapshot as JSON.
    Status {
        #[arg(long)]
        profile: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct LogArgs {
    date: NaiveDate,
    #[arg(long, value_parser = |value: &str| wire("mood", value, Mood::from_wire))]
    mood: Option<Mood>,
    #[arg(long, value_parser = |value: &str| wire("energy", value, Energy::from_wire))]
    energy: Option<Energy>,
    #[arg(long, value_parser = |value: &str| wire("pain", value, Pain::from_wire))]
    pain: Option<Pain>,
    #[arg(long, value_parser = |value: &str| wire("mucus", value, Mucus::from_wire))]
    mucus: Option<Mucus>,
    #[arg(long, value_parser = |value: &str| wire("sleep", value, SleepBand::from_wire))]
    sleep: Option<SleepBand>,
    #[arg(long, value_parser = |value: &str| wire("stress", value, Stress::from_wire))]
    stress: Option<Stress>,
    #[arg(long, value_parser = |value: &str| wire("flow", value, Flow::from_wire))]
    flow: Option<Flow>,
}

impl LogArgs {
    fn into_daily_log(self) -> DailyLog {
        let mut log = DailyLog::new(self.date);
        log.mood = self.mood;
        log.energy = self.energy;
        log.pain = self.pain;
        log.mucus = self.mucus;
        log.sleep_band = self.sleep;
        log.stress = self.stress;
        log.flow = self.flow;
        log
    }
}

fn wire<T>(field: &str, value: &str, parse: fn(&str) -> Option<T>) -> Result<T, String> {
    parse(value).ok_or_else(|| format!("unknown {field} value `{value}`"))
}

#[derive(Debug)]
enum CliError {
    Logging(LoggingError),
    Db(DbError),
    Service(ServiceError),
    Profile { path: PathBuf, message: String },
    Output(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Profile { path, message } => {
                write!(f, "cannot load profile `{}`: {message}", path.display())
            }
            Self::Output(err) => write!(f, "cannot render output: {err}"),
        }
    }
}

impl Error for CliError {}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(log_dir) = &cli.log_dir {
        let level = match cli.log_level.as_deref() {
            Some(level) => level.to_string(),
            None => LogLevel::build_default().as_str().to_string(),
        };
        init_logging(&level, &absolute(log_dir).to_string_lossy())?;
    }

    let conn = open_db(&cli.db)?;
    let service: Service<'_> = CycleService::new(
        SqlitePeriodRepository::new(&conn),
        SqliteDailyLogRepository::new(&conn),
        BaselineForecaster::new(),
    );
    let today = Local::now().date_naive();

    match cli.command {
        Command::Add { date } => {
            let id = service.add_period(date)?;
            println!("added period {id} starting {date}");
        }
        Command::Delete { id } => {
            service.delete_period(id)?;
            println!("deleted period {id}");
        }
        Command::History { limit } => {
            let records = service.list_periods()?;
            let shown = limit.unwrap_or(records.len());
            for (index, record) in records.iter().take(shown).enumerate() {
                match records.get(index + 1) {
                    Some(previous) => println!(
                        "{}\t{}\t{} days",
                        record.id,
                        record.start_date,
                        (record.start_date - previous.start_date).num_days()
                    ),
                    None => println!("{}\t{}", record.id, record.start_date),
                }
            }
        }
        Command::Log(args) => {
            let log = args.into_daily_log();
            service.upsert_daily_log(&log)?;
            println!("saved log for {}", log.date);
        }
        Command::Predict => match service.predict()? {
            Some(range) => println!("{}", serde_json::to_string_pretty(&range)?),
            None => println!("not enough history to predict; record at least 3 periods"),
        },
        Command::Phase { date } => {
            let date = date.unwrap_or(today);
            match service.current_phase(date)? {
                Some(phase) => println!("{date}: {}", phase.label()),
                None => println!("{date}: no cycle data yet"),
            }
        }
        Command::Alert { profile } => {
            let profile = load_profile(profile.as_deref())?;
            match service.cycle_alert(&profile, today)? {
                Some(alert) => println!("{alert}"),
                None => println!("no irregularities detected"),
            }
        }
        Command::Features => {
            let features = service.log_features()?;
            println!("{}", serde_json::to_string_pretty(&features)?);
        }
        Command::Status { profile } => {
            let profile = load_profile(profile.as_deref())?;
            let snapshot = service.snapshot(&profile, today)?;
            let status = json!({
                "greeting": format!("{} {}", profile.avatar, profile.user_name),
                "today": today,
                "phase": snapshot.phase.map(|phase| phase.as_str()),
                "prediction": snapshot.prediction,
                "alert": snapshot.alert.map(|alert| alert.to_string()),
                "features": snapshot.features,
                "averageCycleLength": snapshot.average_cycle_length,
                "lutealAverage": snapshot.luteal_average,
                "daysUntilOvulation": snapshot.days_until_ovulation,
                "needsCheckin": snapshot.needs_checkin,
                "periodCount": snapshot.period_count,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}

fn load_profile(path: Option<&Path>) -> Result<AlertProfile, CliError> {
    let Some(path) = path else {
        return Ok(AlertProfile::default());
    };
    let text = std::fs::read_to_string(path).map_err(|err| CliError::Profile {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|err| CliError::Profile {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
