use serde::{Deserialize, Serialize};

/// Time constant (days) of the chronic load average.
pub const CTL_DAYS: f64 = 42.0;
/// Time constant (days) of the acute load average.
pub const ATL_DAYS: f64 = 7.0;

/// Fitness/fatigue snapshot as of the end of a day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessState {
  pub ctl: f64,
  pub atl: f64,
}

impl FitnessState {
  pub fn new(ctl: f64, atl: f64) -> Self {
    Self { ctl, atl }
  }

  /// Training stress balance (form)
  pub fn tsb(&self) -> f64 {
    self.ctl - self.atl
  }

  /// State after one more day with `tss` of training stress
  pub fn project(&self, tss: f64) -> Self {
    Self {
      ctl: self.ctl + (tss - self.ctl) / CTL_DAYS,
      atl: self.atl + (tss - self.atl) / ATL_DAYS,
    }
  }
}

/// Which constraint decided the final target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanConstraint {
  /// The TSB goal was reachable without tripping the ALB ceiling
  TsbGoal,
  /// The ALB ceiling capped the TSB-driven target
  AlbCeiling,
  /// Both candidates were negative, clamped to a rest day
  Rest,
}

impl std::fmt::Display for PlanConstraint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::TsbGoal => write!(f, "tsb_goal"),
      Self::AlbCeiling => write!(f, "alb_ceiling"),
      Self::Rest => write!(f, "rest"),
    }
  }
}

/// Tomorrow's load target together with the values it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
  pub target_tss: f64,
  pub tsb_driven_tss: f64,
  pub alb_ceiling_tss: f64,
  pub constraint: PlanConstraint,
  /// Expected state at the end of tomorrow if the target is ridden
  pub projected: FitnessState,
}

/// Whole TSS as written to the calendar. Halves go to the even neighbour,
/// so 2.5 becomes 2 and 3.5 becomes 4.
pub fn whole_tss(tss: f64) -> f64 {
  tss.round_ties_even()
}

impl DailyPlan {
  /// Target as posted in the event name and `load` field
  pub fn whole_target_tss(&self) -> f64 {
    whole_tss(self.target_tss)
  }

  /// True when the target rounds to 0 TSS
  pub fn is_rest_day(&self) -> bool {
    self.whole_target_tss() <= 0.0
  }
}
