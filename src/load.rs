//! Load target calculation
//!
//! Derives tomorrow's TSS from today's CTL/ATL and the athlete's goals.
//! Two candidates are computed and the smaller one wins:
//! - the TSS that lands tomorrow's TSB exactly on `target_tsb`
//! - the ALB ceiling, which caps single-day jumps relative to ATL
//!
//! Everything here is pure: same inputs, same output.

use crate::models::{whole_tss, DailyPlan, FitnessState, PlanConstraint, TrainingGoals};

/// ---------------------------------------------------------------------------
/// TSB-driven target
/// ---------------------------------------------------------------------------

/// TSS that makes tomorrow's projected TSB equal `target_tsb`.
///
/// With CTL' = ctl + (x - ctl)/42 and ATL' = atl + (x - atl)/7,
/// solving CTL' - ATL' = target for x gives
/// x = (41·ctl - 36·atl - 42·target) / 5.
pub fn tsb_driven_tss(ctl: f64, atl: f64, target_tsb: f64) -> f64 {
  (41.0 * ctl - 36.0 * atl - 42.0 * target_tsb) / 5.0
}

/// ---------------------------------------------------------------------------
/// ALB guard-rail
/// ---------------------------------------------------------------------------

/// Largest TSS that keeps ALB (today's ATL minus tomorrow's TSS) at or
/// above `alb_lower_bound`.
///
/// Sign convention: the bound is normally negative, and a MORE negative
/// bound raises this ceiling, allowing a harder day relative to ATL.
/// atl - x >= bound  <=>  x <= atl - bound.
pub fn alb_ceiling_tss(atl: f64, alb_lower_bound: f64) -> f64 {
  atl - alb_lower_bound
}

/// ---------------------------------------------------------------------------
/// Combined target
/// ---------------------------------------------------------------------------

/// Tomorrow's TSS target, never negative.
///
/// The ALB ceiling only caps the TSB-driven value; it never raises it.
pub fn compute_target_tss(ctl: f64, atl: f64, goals: &TrainingGoals) -> f64 {
  let tsb_driven = tsb_driven_tss(ctl, atl, goals.target_tsb);
  let ceiling = alb_ceiling_tss(atl, goals.alb_lower_bound);
  tsb_driven.min(ceiling).max(0.0)
}

/// Same computation as [`compute_target_tss`], keeping the intermediate
/// values and the projected next-day state.
pub fn plan_next_day(state: &FitnessState, goals: &TrainingGoals) -> DailyPlan {
  let tsb_driven = tsb_driven_tss(state.ctl, state.atl, goals.target_tsb);
  let ceiling = alb_ceiling_tss(state.atl, goals.alb_lower_bound);
  let target_tss = compute_target_tss(state.ctl, state.atl, goals);

  // Rest exactly when the calendar gets a rest entry
  let constraint = if whole_tss(target_tss) <= 0.0 {
    PlanConstraint::Rest
  } else if ceiling < tsb_driven {
    PlanConstraint::AlbCeiling
  } else {
    PlanConstraint::TsbGoal
  };

  DailyPlan {
    target_tss,
    tsb_driven_tss: tsb_driven,
    alb_ceiling_tss: ceiling,
    constraint,
    projected: state.project(target_tss),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::mock_goals;

  fn goals(target_tsb: f64, alb_lower_bound: f64) -> TrainingGoals {
    TrainingGoals {
      target_ctl: 100.0,
      target_tsb,
      alb_lower_bound,
    }
  }

  #[test]
  fn test_tsb_driven_reference_case() {
    // (41·100 - 36·100 + 42·25) / 5 = 1550 / 5
    let tss = tsb_driven_tss(100.0, 100.0, -25.0);
    assert!((tss - 310.0).abs() < 1e-9, "expected 310, got {}", tss);
  }

  #[test]
  fn test_tsb_driven_hits_target_tsb() {
    let state = FitnessState::new(72.5, 91.0);
    let tss = tsb_driven_tss(state.ctl, state.atl, -12.0);
    let projected = state.project(tss);
    assert!((projected.tsb() - -12.0).abs() < 1e-9);
  }

  #[test]
  fn test_alb_ceiling_caps_reference_case() {
    // TSB goal wants 310, but ATL 100 with a -40 floor only allows 140
    let g = goals(-25.0, -40.0);
    let target = compute_target_tss(100.0, 100.0, &g);
    assert!((target - 140.0).abs() < 1e-9, "expected 140, got {}", target);

    // ALB for the capped value sits exactly on the floor
    assert!((100.0 - target - g.alb_lower_bound).abs() < 1e-9);
  }

  #[test]
  fn test_more_negative_bound_allows_bigger_day() {
    let strict = compute_target_tss(100.0, 100.0, &goals(-25.0, -20.0));
    let loose = compute_target_tss(100.0, 100.0, &goals(-25.0, -60.0));
    assert!(loose > strict);
    assert!((strict - 120.0).abs() < 1e-9);
    assert!((loose - 160.0).abs() < 1e-9);
  }

  #[test]
  fn test_ceiling_never_raises_target() {
    // Fatigued athlete: the TSB goal already asks for an easy day (30 TSS)
    let g = goals(-5.0, -40.0);
    let tsb_driven = tsb_driven_tss(60.0, 70.0, -5.0);
    let target = compute_target_tss(60.0, 70.0, &g);
    assert!(tsb_driven < alb_ceiling_tss(70.0, -40.0));
    assert!((target - tsb_driven).abs() < 1e-9);
    assert!((target - 30.0).abs() < 1e-9);
  }

  #[test]
  fn test_negative_target_clamped_to_zero() {
    // Very fatigued: reaching +20 TSB would need negative TSS
    let g = goals(20.0, -30.0);
    assert!(tsb_driven_tss(40.0, 90.0, 20.0) < 0.0);
    assert_eq!(compute_target_tss(40.0, 90.0, &g), 0.0);
  }

  #[test]
  fn test_target_nonnegative_over_grid() {
    let g = mock_goals();
    for ctl in (0..=200).step_by(10) {
      for atl in (0..=300).step_by(15) {
        let target = compute_target_tss(ctl as f64, atl as f64, &g);
        assert!(target >= 0.0, "negative target for ctl={} atl={}", ctl, atl);
      }
    }
  }

  #[test]
  fn test_monotonic_in_ctl() {
    let g = mock_goals();
    let atl = 80.0;
    let mut previous = tsb_driven_tss(0.0, atl, g.target_tsb);
    let mut previous_target = compute_target_tss(0.0, atl, &g);
    for ctl in 1..=150 {
      let ctl = ctl as f64;
      let current = tsb_driven_tss(ctl, atl, g.target_tsb);
      let current_target = compute_target_tss(ctl, atl, &g);
      assert!(current >= previous);
      assert!(current_target >= previous_target);
      previous = current;
      previous_target = current_target;
    }
  }

  #[test]
  fn test_idempotent() {
    let g = mock_goals();
    let first = compute_target_tss(63.4, 71.9, &g);
    let second = compute_target_tss(63.4, 71.9, &g);
    assert_eq!(first.to_bits(), second.to_bits());
  }

  #[test]
  fn test_plan_reports_alb_constraint() {
    let plan = plan_next_day(&FitnessState::new(100.0, 100.0), &goals(-25.0, -40.0));
    assert_eq!(plan.constraint, PlanConstraint::AlbCeiling);
    assert!((plan.tsb_driven_tss - 310.0).abs() < 1e-9);
    assert!((plan.alb_ceiling_tss - 140.0).abs() < 1e-9);
    assert!((plan.target_tss - 140.0).abs() < 1e-9);
    // CTL' = 100 + 40/42, ATL' = 100 + 40/7
    assert!((plan.projected.ctl - (100.0 + 40.0 / 42.0)).abs() < 1e-9);
    assert!((plan.projected.atl - (100.0 + 40.0 / 7.0)).abs() < 1e-9);
  }

  #[test]
  fn test_plan_reports_tsb_constraint() {
    let state = FitnessState::new(60.0, 70.0);
    let plan = plan_next_day(&state, &goals(-5.0, -30.0));
    assert_eq!(plan.constraint, PlanConstraint::TsbGoal);
    assert!((plan.projected.tsb() - -5.0).abs() < 1e-9);
    assert!(!plan.is_rest_day());
  }

  #[test]
  fn test_plan_reports_rest() {
    let plan = plan_next_day(&FitnessState::new(40.0, 90.0), &goals(20.0, -30.0));
    assert_eq!(plan.constraint, PlanConstraint::Rest);
    assert_eq!(plan.target_tss, 0.0);
    assert!(plan.is_rest_day());
  }

  #[test]
  fn test_plan_reports_rest_when_target_rounds_to_zero() {
    // TSB-driven is (41·50 - 36·0.3)/5 = 407.84, the ceiling 0.3 wins
    let plan = plan_next_day(&FitnessState::new(50.0, 0.3), &goals(0.0, 0.0));
    assert!(plan.target_tss > 0.0 && plan.target_tss < 0.5);
    assert_eq!(plan.constraint, PlanConstraint::Rest);
    assert!(plan.is_rest_day());
  }

  #[test]
  fn test_plan_keeps_ride_when_target_rounds_up() {
    let plan = plan_next_day(&FitnessState::new(50.0, 3.0), &goals(0.0, 0.0));
    assert!((plan.target_tss - 3.0).abs() < 1e-9);
    assert_eq!(plan.constraint, PlanConstraint::AlbCeiling);
    assert!(!plan.is_rest_day());
  }
}
