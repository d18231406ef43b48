use serde::{Deserialize, Serialize};

/// Workout as returned by the Hevy API. `id` is the stable sync key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HevyWorkout {
  pub id: String,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  pub start_time: String,
  #[serde(default)]
  pub end_time: Option<String>,
  #[serde(default)]
  pub exercises: Vec<HevyExercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HevyExercise {
  pub title: String,
  #[serde(default)]
  pub sets: Vec<HevySet>,
}

/// A logged set. Weight and reps are absent for bodyweight or unfinished sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HevySet {
  #[serde(default)]
  pub weight_kg: Option<f64>,
  #[serde(default)]
  pub reps: Option<u32>,
  /// "normal", "warmup", "dropset", "failure"
  #[serde(rename = "type", default)]
  pub set_type: String,
  #[serde(default)]
  pub rpe: Option<f64>,
}

impl HevySet {
  /// Both weight and reps were recorded
  pub fn is_loaded(&self) -> bool {
    self.weight_kg.is_some() && self.reps.is_some()
  }
}

/// One page of `GET /v1/workouts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPage {
  #[serde(default)]
  pub workouts: Vec<HevyWorkout>,
  #[serde(default)]
  pub page: u32,
  #[serde(default)]
  pub page_count: u32,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_deserialize_workout_with_missing_fields() {
    let json = r#"{
      "id": "b459cba5-cd6d-463c-abd6-54f8eafcadcb",
      "title": "Morning Workout",
      "description": null,
      "start_time": "2024-08-14T12:00:00Z",
      "end_time": "2024-08-14T12:30:00Z",
      "exercises": [
        {
          "index": 0,
          "title": "Bench Press (Barbell)",
          "sets": [
            { "index": 0, "type": "warmup", "weight_kg": 60, "reps": 10, "rpe": null },
            { "index": 1, "type": "normal", "weight_kg": null, "reps": null }
          ]
        }
      ]
    }"#;

    let workout: HevyWorkout = serde_json::from_str(json).unwrap();
    assert_eq!(workout.title, "Morning Workout");
    assert!(workout.description.is_none());
    let sets = &workout.exercises[0].sets;
    assert_eq!(sets[0].weight_kg, Some(60.0));
    assert_eq!(sets[0].set_type, "warmup");
    assert!(sets[0].is_loaded());
    assert!(!sets[1].is_loaded());
    assert!(sets[1].rpe.is_none());
  }

  #[test]
  fn test_deserialize_page() {
    let json = r#"{"page": 1, "page_count": 12, "workouts": []}"#;
    let page: WorkoutPage = serde_json::from_str(json).unwrap();
    assert_eq!(page.page_count, 12);
    assert!(page.workouts.is_empty());
  }
}
