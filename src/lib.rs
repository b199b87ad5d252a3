mod builder;
mod config;
mod error;
mod intervals;
mod load;
mod logging;
mod models;
mod planner;

#[cfg(test)]
mod test_utils;

pub use builder::{build_workout, calendar_event, ramp_tss};
pub use config::{resolve_config_path, AppConfig, ConfigError, OperationalSettings, WorkoutSettings};
pub use error::{PlannerError, ProviderError, WriteError};
pub use intervals::{IntervalsClient, IntervalsConfig};
pub use load::{alb_ceiling_tss, compute_target_tss, plan_next_day, tsb_driven_tss};
pub use logging::{LogFormat, LoggingConfig};
pub use models::{
  CalendarEvent, DailyPlan, FitnessState, PlanConstraint, Step, StepKind, TrainingGoals, Workout,
  WorkoutShapeParams,
};
pub use planner::{run_cycle, CalendarWriter, CycleReport, FitnessProvider, WriteResult};

use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::info;

/// Options for one invocation of the daily planner
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
  /// Settings file; falls back to `AUTOPLAN_CONFIG`, then `config.json`
  pub config_path: Option<PathBuf>,
  /// Day whose end-of-day state is read. Defaults to the local date.
  pub today: Option<NaiveDate>,
  /// Overrides `operational_settings.live_mode` when set
  pub live: Option<bool>,
}

/// Load configuration, then run one cycle against Intervals.icu.
pub async fn run(options: RunOptions) -> Result<CycleReport, PlannerError> {
  let config_path = resolve_config_path(options.config_path);
  info!(path = %config_path.display(), "Loading configuration");
  let config = AppConfig::load(&config_path)?;
  let client = IntervalsClient::new(IntervalsConfig::from_env()?)?;

  let today = options.today.unwrap_or_else(|| Local::now().date_naive());
  let live = options.live.unwrap_or(config.operational_settings.live_mode);
  if live {
    info!("Live mode is on, workout will be uploaded");
  } else {
    info!("Dry run mode is on, no workout will be uploaded");
  }

  run_cycle(&client, &client, &config, today, !live).await
}
