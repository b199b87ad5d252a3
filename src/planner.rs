//! One daily planning cycle
//!
//! fetch state → compute target → build workout → write to calendar.
//! Runs sequentially, holds nothing between runs, never retries. A failed
//! run just skips the day; tomorrow's run starts again from the real
//! CTL/ATL.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::builder;
use crate::config::AppConfig;
use crate::error::{PlannerError, ProviderError, WriteError};
use crate::load;
use crate::models::{CalendarEvent, DailyPlan, FitnessState, Workout};

/// ---------------------------------------------------------------------------
/// Collaborators
/// ---------------------------------------------------------------------------

/// Source of the athlete's current CTL/ATL
#[allow(async_fn_in_trait)]
pub trait FitnessProvider {
  async fn get_current_state(&self, date: NaiveDate) -> Result<FitnessState, ProviderError>;
}

/// Destination for the planned workout
#[allow(async_fn_in_trait)]
pub trait CalendarWriter {
  /// Store `event` in the `date` slot. With `dry_run` nothing remote changes.
  async fn write_workout(
    &self,
    date: NaiveDate,
    event: &CalendarEvent,
    dry_run: bool,
  ) -> Result<WriteResult, WriteError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteResult {
  Created { event_id: Option<i64> },
  DryRun,
}

/// ---------------------------------------------------------------------------
/// Cycle
/// ---------------------------------------------------------------------------

/// Everything a successful run produced
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
  pub today: NaiveDate,
  pub plan_date: NaiveDate,
  pub state: FitnessState,
  pub plan: DailyPlan,
  pub workout: Workout,
  pub event: CalendarEvent,
  pub write: WriteResult,
}

/// Plan tomorrow from the state at the end of `today` and write it.
pub async fn run_cycle<P, W>(
  provider: &P,
  writer: &W,
  config: &AppConfig,
  today: NaiveDate,
  dry_run: bool,
) -> Result<CycleReport, PlannerError>
where
  P: FitnessProvider,
  W: CalendarWriter,
{
  let plan_date = today
    .succ_opt()
    .ok_or_else(|| PlannerError::Calculation(format!("no calendar day after {}", today)))?;

  info!(%today, "Fetching current state");
  let state = provider.get_current_state(today).await?;
  info!(
    ctl = %format!("{:.2}", state.ctl),
    atl = %format!("{:.2}", state.atl),
    tsb = %format!("{:.2}", state.tsb()),
    ctl_to_goal = %format!("{:.2}", config.training_goals.target_ctl - state.ctl),
    "Current state"
  );

  let plan = load::plan_next_day(&state, &config.training_goals);
  if !plan.target_tss.is_finite() {
    return Err(PlannerError::Calculation(format!(
      "non-finite target TSS from ctl={} atl={}",
      state.ctl, state.atl
    )));
  }
  info!(
    %plan_date,
    target_tss = %format!("{:.2}", plan.target_tss),
    tsb_driven = %format!("{:.2}", plan.tsb_driven_tss),
    alb_ceiling = %format!("{:.2}", plan.alb_ceiling_tss),
    constraint = %plan.constraint,
    "Calculated target TSS for tomorrow"
  );

  let settings = &config.workout_settings;
  let workout = builder::build_workout(plan.target_tss, &settings.shape);
  if let Some(step) = workout.steps.iter().find(|s| !(s.duration_min > 0.0)) {
    return Err(PlannerError::Calculation(format!(
      "non-positive step duration {} in generated workout",
      step.duration_min
    )));
  }

  let event = builder::calendar_event(
    &plan,
    &workout,
    plan_date,
    settings.start_time,
    &settings.name_prefix,
  );
  match serde_json::to_string_pretty(&event) {
    Ok(json) => info!(event = %json, "Generated workout"),
    Err(e) => warn!(error = %e, "Could not render workout for logging"),
  }

  let write = writer
    .write_workout(plan_date, &event, dry_run)
    .await
    .map_err(|source| PlannerError::Write {
      date: plan_date,
      source,
    })?;

  Ok(CycleReport {
    today,
    plan_date,
    state,
    plan,
    workout,
    event,
    write,
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
