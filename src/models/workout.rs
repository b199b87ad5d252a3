use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Intervals.icu calendar category for planned workouts
pub const EVENT_CATEGORY: &str = "WORKOUT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
  /// Linear power ramp from `start_pct` to `power_pct`
  Ramp,
  /// Constant power at `power_pct`
  Steady,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
  pub kind: StepKind,
  pub duration_min: f64,
  pub start_pct: f64,
  pub power_pct: f64,
}

impl Step {
  pub fn ramp(duration_min: f64, start_pct: f64, end_pct: f64) -> Self {
    Self {
      kind: StepKind::Ramp,
      duration_min,
      start_pct,
      power_pct: end_pct,
    }
  }

  pub fn steady(duration_min: f64, power_pct: f64) -> Self {
    Self {
      kind: StepKind::Steady,
      duration_min,
      start_pct: power_pct,
      power_pct,
    }
  }

  /// Intensity factor used for the stress estimate.
  /// Ramps use the mean of their start and end power.
  pub fn effective_if(&self) -> f64 {
    match self.kind {
      StepKind::Ramp => (self.start_pct + self.power_pct) / 2.0,
      StepKind::Steady => self.power_pct,
    }
  }

  /// TSS ≈ hours × IF² × 100
  pub fn planned_tss(&self) -> f64 {
    let intensity = self.effective_if();
    (self.duration_min / 60.0) * intensity * intensity * 100.0
  }

  /// One line of Intervals.icu workout text, e.g. `- 10m ramp 40%-65% FTP`
  pub fn description_line(&self) -> String {
    match self.kind {
      StepKind::Ramp => format!(
        "- {:.0}m ramp {}-{} FTP",
        self.duration_min,
        format_pct(self.start_pct),
        format_pct(self.power_pct)
      ),
      StepKind::Steady => format!(
        "- {:.0}m {} FTP",
        self.duration_min,
        format_pct(self.power_pct)
      ),
    }
  }
}

fn format_pct(fraction: f64) -> String {
  format!("{:.0}%", fraction * 100.0)
}

/// Structured workout: ordered steps, ramp first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
  pub total_duration_min: u32,
  pub steps: Vec<Step>,
}

impl Workout {
  pub fn from_steps(steps: Vec<Step>) -> Self {
    let total: f64 = steps.iter().map(|s| s.duration_min).sum();
    Self {
      total_duration_min: total.round() as u32,
      steps,
    }
  }

  pub fn planned_tss(&self) -> f64 {
    self.steps.iter().map(Step::planned_tss).sum()
  }

  pub fn steady_duration_min(&self) -> f64 {
    self
      .steps
      .iter()
      .filter(|s| s.kind == StepKind::Steady)
      .map(|s| s.duration_min)
      .sum()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  pub fn description(&self) -> String {
    self
      .steps
      .iter()
      .map(Step::description_line)
      .collect::<Vec<_>>()
      .join("\n")
  }
}

/// Event payload accepted by the Intervals.icu `events` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
  pub category: String,
  #[serde(rename = "type")]
  pub event_type: String,
  pub name: String,
  pub start_date_local: NaiveDateTime,
  pub description: String,
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub load: Option<i64>,
}

impl CalendarEvent {
  pub fn rest(name_prefix: &str, start: NaiveDateTime) -> Self {
    Self {
      category: EVENT_CATEGORY.to_string(),
      event_type: "Rest".to_string(),
      name: format!("{} Rest Day", name_prefix),
      start_date_local: start,
      description: "Rest Day".to_string(),
      load: None,
    }
  }

  pub fn ride(name_prefix: &str, start: NaiveDateTime, load: i64, workout: &Workout) -> Self {
    Self {
      category: EVENT_CATEGORY.to_string(),
      event_type: "Ride".to_string(),
      name: format!("{} {} TSS", name_prefix, load),
      start_date_local: start,
      description: workout.description(),
      load: Some(load),
    }
  }

  pub fn is_rest(&self) -> bool {
    self.event_type == "Rest"
  }
}
