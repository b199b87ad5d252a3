//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Mock data factories
//! - In-memory fakes for the fitness provider and calendar writer

use chrono::{NaiveDate, NaiveTime};
use std::sync::Mutex;

use crate::config::{AppConfig, OperationalSettings, WorkoutSettings};
use crate::error::{ProviderError, WriteError};
use crate::models::{
  CalendarEvent, DailyPlan, FitnessState, PlanConstraint, Step, TrainingGoals, Workout,
  WorkoutShapeParams,
};
use crate::planner::{CalendarWriter, FitnessProvider, WriteResult};

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_goals() -> TrainingGoals {
  TrainingGoals {
    target_ctl: 80.0,
    target_tsb: -10.0,
    alb_lower_bound: -20.0,
  }
}

/// 10 minute ramp from 40% into a 65% FTP main set
pub fn mock_shape() -> WorkoutShapeParams {
  WorkoutShapeParams {
    power_target_pct: 0.65,
    ramp_duration_min: 10,
    ramp_start_pct: 0.40,
  }
}

pub fn mock_config() -> AppConfig {
  AppConfig {
    training_goals: mock_goals(),
    workout_settings: WorkoutSettings {
      shape: mock_shape(),
      name_prefix: "Auto-Plan:".to_string(),
      start_time: NaiveTime::from_hms_opt(7, 0, 0).expect("valid time"),
    },
    operational_settings: OperationalSettings::default(),
  }
}

/// Plan with the given target bound by the TSB goal
pub fn mock_plan(target_tss: f64) -> DailyPlan {
  let today = FitnessState::new(70.0, 75.0);
  DailyPlan {
    target_tss,
    tsb_driven_tss: target_tss,
    alb_ceiling_tss: target_tss + 50.0,
    constraint: PlanConstraint::TsbGoal,
    projected: today.project(target_tss),
  }
}

/// 50 TSS ride for 2026-10-19 at 07:00
pub fn mock_event() -> CalendarEvent {
  let start = NaiveDate::from_ymd_opt(2026, 10, 19)
    .and_then(|d| d.and_hms_opt(7, 0, 0))
    .expect("valid datetime");
  let workout = Workout::from_steps(vec![Step::ramp(3.0, 0.40, 0.65), Step::steady(69.0, 0.65)]);
  CalendarEvent::ride("Auto-Plan:", start, 50, &workout)
}

/// ---------------------------------------------------------------------------
/// Collaborator Fakes
/// ---------------------------------------------------------------------------

/// Provider returning a fixed state, or `MissingLoad` when built with `missing()`
pub struct FakeProvider {
  state: Option<FitnessState>,
  requested: Mutex<Vec<NaiveDate>>,
}

impl FakeProvider {
  pub fn with_state(ctl: f64, atl: f64) -> Self {
    Self {
      state: Some(FitnessState::new(ctl, atl)),
      requested: Mutex::new(Vec::new()),
    }
  }

  pub fn missing() -> Self {
    Self {
      state: None,
      requested: Mutex::new(Vec::new()),
    }
  }

  pub fn requested_dates(&self) -> Vec<NaiveDate> {
    self.requested.lock().expect("lock").clone()
  }
}

impl FitnessProvider for FakeProvider {
  async fn get_current_state(&self, date: NaiveDate) -> Result<FitnessState, ProviderError> {
    self.requested.lock().expect("lock").push(date);
    self.state.ok_or(ProviderError::MissingLoad(date))
  }
}

/// Writer that records every call and either accepts or rejects it
pub struct RecordingWriter {
  reject: bool,
  calls: Mutex<Vec<(NaiveDate, CalendarEvent, bool)>>,
}

impl RecordingWriter {
  pub fn accepting() -> Self {
    Self {
      reject: false,
      calls: Mutex::new(Vec::new()),
    }
  }

  pub fn rejecting() -> Self {
    Self {
      reject: true,
      calls: Mutex::new(Vec::new()),
    }
  }

  pub fn calls(&self) -> Vec<(NaiveDate, CalendarEvent, bool)> {
    self.calls.lock().expect("lock").clone()
  }
}

impl CalendarWriter for RecordingWriter {
  async fn write_workout(
    &self,
    date: NaiveDate,
    event: &CalendarEvent,
    dry_run: bool,
  ) -> Result<WriteResult, WriteError> {
    let mut calls = self.calls.lock().expect("lock");
    calls.push((date, event.clone(), dry_run));

    if self.reject {
      return Err(WriteError::Rejected {
        status: 422,
        body: "rejected by test writer".to_string(),
      });
    }

    if dry_run {
      Ok(WriteResult::DryRun)
    } else {
      Ok(WriteResult::Created {
        event_id: Some(calls.len() as i64),
      })
    }
  }
}
