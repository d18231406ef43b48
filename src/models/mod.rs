pub mod metadata;
pub mod workout;

pub use metadata::{OneRepMax, WorkoutMetadata};
pub use workout::{HevyExercise, HevySet, HevyWorkout, WorkoutPage};
