pub mod fitness;
pub mod goals;
pub mod workout;

pub use fitness::{whole_tss, DailyPlan, FitnessState, PlanConstraint};
pub use goals::{TrainingGoals, WorkoutShapeParams};
pub use workout::{CalendarEvent, Step, StepKind, Workout};
