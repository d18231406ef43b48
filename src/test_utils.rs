//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Temporary vaults
//! - Mock data factories
//! - A scripted workout source
//! - Helper assertions

use crate::hevy::WorkoutSource;
use crate::models::{HevyExercise, HevySet, HevyWorkout, WorkoutPage};
use crate::settings::Settings;
use crate::store::{DocumentStore, Vault};
use async_trait::async_trait;
use std::sync::Mutex;
use tempfile::TempDir;

/// ---------------------------------------------------------------------------
/// Vault Test Utilities
/// ---------------------------------------------------------------------------

/// Create an empty vault in a temporary directory.
/// Keep the `TempDir` alive for as long as the vault is used.
pub fn temp_vault() -> (TempDir, Vault) {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");
  let vault = Vault::new(dir.path());
  (dir, vault)
}

/// Write a file into a vault, failing the test on error
pub async fn seed_note(vault: &Vault, path: &str, content: &str) {
  vault
    .create(path, content)
    .await
    .unwrap_or_else(|e| panic!("Failed to seed {}: {}", path, e));
}

/// Minimal workout note carrying only metadata
pub fn metadata_note(hevy_id: &str, date: &str, one_rep_maxes: &[(&str, &str)]) -> String {
  let mut content = format!("---\nhevy_id: {}\ndate: {}\n", hevy_id, date);
  for (slug, value) in one_rep_maxes {
    content.push_str(&format!("1rm-{}: {}\n", slug, value));
  }
  content.push_str("---\n\n# Workout\n");
  content
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_settings() -> Settings {
  Settings {
    api_key: "test-key".to_string(),
    ..Settings::default()
  }
}

pub fn mock_set(weight_kg: Option<f64>, reps: Option<u32>) -> HevySet {
  HevySet {
    weight_kg,
    reps,
    set_type: "normal".to_string(),
    rpe: None,
  }
}

pub fn mock_exercise(title: &str, sets: Vec<HevySet>) -> HevyExercise {
  HevyExercise {
    title: title.to_string(),
    sets,
  }
}

pub fn mock_workout(id: &str, title: &str, start_time: &str, exercises: Vec<HevyExercise>) -> HevyWorkout {
  HevyWorkout {
    id: id.to_string(),
    title: title.to_string(),
    description: None,
    start_time: start_time.to_string(),
    end_time: None,
    exercises,
  }
}

/// Bench Press 60x10 and 100x5, then bodyweight pull ups with one unfinished set
pub fn mock_push_workout() -> HevyWorkout {
  mock_workout(
    "w-push",
    "Push Day",
    "2024-03-12T17:02:11+00:00",
    vec![
      mock_exercise(
        "Bench Press",
        vec![mock_set(Some(60.0), Some(10)), mock_set(Some(100.0), Some(5))],
      ),
      mock_exercise("Pull Up", vec![mock_set(None, Some(8)), mock_set(None, None)]),
    ],
  )
}

/// Squat 100x5 and 120x3 two days after the push workout
pub fn mock_leg_workout() -> HevyWorkout {
  mock_workout(
    "w-legs",
    "Leg Day",
    "2024-03-14T08:00:00Z",
    vec![mock_exercise(
      "Squat",
      vec![mock_set(Some(100.0), Some(5)), mock_set(Some(120.0), Some(3))],
    )],
  )
}

/// ---------------------------------------------------------------------------
/// Scripted Workout Source
/// ---------------------------------------------------------------------------

/// In-memory stand-in for the Hevy API that records detail lookups
pub struct FakeSource {
  workouts: Vec<HevyWorkout>,
  fail_list: bool,
  fail_details: Vec<String>,
  detail_calls: Mutex<Vec<String>>,
}

impl FakeSource {
  pub fn new(workouts: Vec<HevyWorkout>) -> Self {
    Self {
      workouts,
      fail_list: false,
      fail_details: Vec::new(),
      detail_calls: Mutex::new(Vec::new()),
    }
  }

  pub fn failing_list(mut self) -> Self {
    self.fail_list = true;
    self
  }

  pub fn failing_detail(mut self, id: &str) -> Self {
    self.fail_details.push(id.to_string());
    self
  }

  pub fn detail_calls(&self) -> Vec<String> {
    self.detail_calls.lock().unwrap().clone()
  }
}

#[async_trait]
impl WorkoutSource for FakeSource {
  async fn workouts(&self, limit: u32) -> Option<WorkoutPage> {
    if self.fail_list {
      return None;
    }
    Some(WorkoutPage {
      workouts: self.workouts.iter().take(limit as usize).cloned().collect(),
      page: 1,
      page_count: 1,
    })
  }

  async fn workout(&self, id: &str) -> Option<HevyWorkout> {
    self.detail_calls.lock().unwrap().push(id.to_string());
    if self.fail_details.iter().any(|f| f == id) {
      return None;
    }
    self.workouts.iter().find(|w| w.id == id).cloned()
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_fake_source_limits_and_records() {
    let source = FakeSource::new(vec![mock_push_workout(), mock_leg_workout()]).failing_detail("w-legs");

    let page = source.workouts(1).await.unwrap();
    assert_eq!(page.workouts.len(), 1);

    assert!(source.workout("w-push").await.is_some());
    assert!(source.workout("w-legs").await.is_none());
    assert!(source.workout("nope").await.is_none());
    assert_eq!(source.detail_calls(), vec!["w-push", "w-legs", "nope"]);
  }

  #[tokio::test]
  async fn test_seed_note_and_metadata_note() {
    let (_dir, vault) = temp_vault();
    let content = metadata_note("a", "2024-03-01T10:00:00Z", &[("squat", "100.0")]);
    seed_note(&vault, "HevyWorkouts/2024-03-01 - A.md", &content).await;

    let fm = vault.read_frontmatter("HevyWorkouts/2024-03-01 - A.md").await.unwrap();
    assert_eq!(fm.get_str("1rm-squat"), Some("100.0"));
  }
}
