//! Workout note codec
//!
//! Turns a Hevy workout into the canonical markdown note: a metadata block
//! (`hevy_id`, `date`, `exercises`, one `1rm-<slug>` per exercise) followed by
//! a heading per exercise and one line per set.

use crate::models::{HevyExercise, HevyWorkout, WorkoutMetadata};
use crate::units::{
  convert_weight, estimate_one_rep_max, exercise_slug, format_weight, join_path, sanitize_file_name,
  utc_date, WeightUnit,
};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
  #[error("Workout {id} has an unreadable start time: {start_time}")]
  InvalidStartTime { id: String, start_time: String },
}

/// A workout rendered as a note, not yet written anywhere
#[derive(Debug, Clone)]
pub struct WorkoutNote {
  pub path: String,
  pub metadata: WorkoutMetadata,
  pub body: String,
}

impl WorkoutNote {
  /// Full file content for a newly created note
  pub fn content(&self) -> String {
    let mut content = self.metadata.to_frontmatter().render();
    content.push('\n');
    content.push_str(&self.body);
    content
  }
}

/// `<folder>/<YYYY-MM-DD> - <sanitized title>.md`, dated by the UTC start day.
///
/// Two workouts on the same day with the same sanitized title share a path.
pub fn note_path(folder: &str, workout_id: &str, title: &str, start_time: &str) -> Result<String, CodecError> {
  let date = utc_date(start_time).ok_or_else(|| CodecError::InvalidStartTime {
    id: workout_id.to_string(),
    start_time: start_time.to_string(),
  })?;
  let file_name = format!("{} - {}.md", date.format("%Y-%m-%d"), sanitize_file_name(title));
  Ok(join_path(folder, &file_name))
}

pub fn workout_note_path(folder: &str, workout: &HevyWorkout) -> Result<String, CodecError> {
  note_path(folder, &workout.id, &workout.title, &workout.start_time)
}

/// Best estimated 1RM (kg) over sets with both weight and reps; 0 when none qualify
pub fn best_one_rep_max(exercise: &HevyExercise) -> f64 {
  exercise
    .sets
    .iter()
    .filter(|s| s.is_loaded())
    .map(|s| estimate_one_rep_max(s.weight_kg, s.reps))
    .fold(0.0, f64::max)
}

pub fn encode_metadata(workout: &HevyWorkout, unit: WeightUnit) -> WorkoutMetadata {
  let mut metadata = WorkoutMetadata {
    hevy_id: workout.id.clone(),
    date: workout.start_time.clone(),
    exercises: workout.exercises.iter().map(|e| e.title.clone()).collect(),
    one_rep_max: Vec::new(),
  };

  for exercise in &workout.exercises {
    let best = convert_weight(Some(best_one_rep_max(exercise)), unit);
    metadata.set_one_rep_max(&exercise_slug(&exercise.title), best);
  }

  metadata
}

pub fn render_body(workout: &HevyWorkout, unit: WeightUnit) -> String {
  let mut body = format!("# {}\n\n", workout.title);

  for exercise in &workout.exercises {
    body.push_str(&format!("## {}\n", exercise.title));
    for (i, set) in exercise.sets.iter().enumerate() {
      let reps = set.reps.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());
      body.push_str(&format!(
        "- Set {}: **{}** x {}\n",
        i + 1,
        format_weight(Some(set.weight_kg.unwrap_or(0.0)), unit),
        reps
      ));
    }
    body.push('\n');
  }

  body
}

pub fn encode_workout_note(folder: &str, workout: &HevyWorkout, unit: WeightUnit) -> Result<WorkoutNote, CodecError> {
  Ok(WorkoutNote {
    path: workout_note_path(folder, workout)?,
    metadata: encode_metadata(workout, unit),
    body: render_body(workout, unit),
  })
}
