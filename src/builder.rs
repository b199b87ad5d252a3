//! Workout builder
//!
//! Turns a TSS target into a ramp + steady-state ride, then renders it as an
//! Intervals.icu calendar event.
//!
//! Stress model: TSS ≈ hours × IF² × 100. The warm-up ramp is costed at the
//! average of its start and end intensity.

use chrono::{NaiveDate, NaiveTime};

use crate::models::{CalendarEvent, DailyPlan, Step, Workout, WorkoutShapeParams};

/// Main-set durations are scheduled in whole minutes.
const MIN_MAIN_SET_MINUTES: f64 = 1.0;

/// TSS accrued over the warm-up ramp
pub fn ramp_tss(shape: &WorkoutShapeParams) -> f64 {
  Step::ramp(
    shape.ramp_duration_min as f64,
    shape.ramp_start_pct,
    shape.power_target_pct,
  )
  .planned_tss()
}

/// Minutes at `power_pct` needed to accrue `tss`, before rounding
fn minutes_for_tss(tss: f64, power_pct: f64) -> f64 {
  let hours = tss / (power_pct * power_pct * 100.0);
  hours * 60.0
}

/// Build the workout for `target_tss`.
///
/// The ramp is always kept whole. When it alone covers the target the
/// steady block is dropped and the ride overshoots by at most the ramp's
/// own TSS. Otherwise the steady block is rounded to the nearest minute,
/// never shorter than one minute.
pub fn build_workout(target_tss: f64, shape: &WorkoutShapeParams) -> Workout {
  let mut steps = Vec::with_capacity(2);

  if shape.ramp_duration_min > 0 {
    steps.push(Step::ramp(
      shape.ramp_duration_min as f64,
      shape.ramp_start_pct,
      shape.power_target_pct,
    ));
  }

  let remaining = (target_tss - ramp_tss(shape)).max(0.0);
  if remaining > 0.0 {
    let minutes = minutes_for_tss(remaining, shape.power_target_pct)
      .round_ties_even()
      .max(MIN_MAIN_SET_MINUTES);
    steps.push(Step::steady(minutes, shape.power_target_pct));
  }

  Workout::from_steps(steps)
}

/// Render the plan as the event posted to the calendar.
///
/// A target that rounds to 0 TSS (or a workout with no steps) becomes a
/// rest-day entry instead of a ride.
pub fn calendar_event(
  plan: &DailyPlan,
  workout: &Workout,
  date: NaiveDate,
  start_time: NaiveTime,
  name_prefix: &str,
) -> CalendarEvent {
  let start = date.and_time(start_time);

  if plan.is_rest_day() || workout.is_empty() {
    return CalendarEvent::rest(name_prefix, start);
  }

  CalendarEvent::ride(name_prefix, start, plan.whole_target_tss() as i64, workout)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
