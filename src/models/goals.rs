use serde::{Deserialize, Serialize};

/// Long-term load goals, loaded once per run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingGoals {
  /// Fitness the athlete is building toward. Reported, not used in the target math.
  pub target_ctl: f64,
  /// Form (CTL - ATL) to steer tomorrow toward
  pub target_tsb: f64,
  /// Floor on ATL minus tomorrow's TSS. More negative permits bigger single-day jumps.
  pub alb_lower_bound: f64,
}

/// Shape of the generated workout: a linear warm-up ramp into one steady block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutShapeParams {
  /// Main-set power as a fraction of FTP, in (0, 1]
  pub power_target_pct: f64,
  pub ramp_duration_min: u32,
  /// Ramp starting power as a fraction of FTP, in (0, 1]
  pub ramp_start_pct: f64,
}
