use super::AppState;
use crate::models::HevyWorkout;
use crate::sync::{self, NoteWrite, SyncError};
use chrono::{DateTime, Local};
use serde::Serialize;

/// ---------------------------------------------------------------------------
/// Sync Recent Workouts
/// ---------------------------------------------------------------------------

/// Create notes for recent workouts that do not have one yet.
/// `limit` overrides the configured default.
pub async fn sync_workouts(state: &AppState, limit: Option<u32>) -> Result<String, String> {
  state.require_api_key()?;
  let limit = limit.unwrap_or(state.settings.default_limit);

  log::info!("Fetching from Hevy.");
  let summary = sync::sync_all(state.source.as_ref(), state.store.as_ref(), &state.settings, limit)
    .await
    .map_err(|e| match e {
      SyncError::NoData => SyncError::NoData.to_string(),
      other => format!("Sync failed: {}", other),
    })?;

  Ok(format!(
    "Sync complete. {} new, {} already present, {} failed.",
    summary.created, summary.existing, summary.failed
  ))
}

/// ---------------------------------------------------------------------------
/// Convert One Workout
/// ---------------------------------------------------------------------------

/// Write (or refresh the metadata of) the note for one workout id
pub async fn convert_workout(state: &AppState, workout_id: &str) -> Result<String, String> {
  state.require_api_key()?;

  let result = sync::sync_one(state.source.as_ref(), state.store.as_ref(), &state.settings, workout_id)
    .await
    .map_err(|e| format!("Failed to convert workout {}: {}", workout_id, e))?;

  match result {
    Some(NoteWrite::Created(path)) => Ok(format!("Created {}", path)),
    Some(NoteWrite::Updated(path)) => Ok(format!("Updated metadata of {}", path)),
    None => Err(format!("Could not fetch workout {}. Check API key.", workout_id)),
  }
}

/// ---------------------------------------------------------------------------
/// List Remote Workouts
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutListing {
  pub id: String,
  /// Start date in the local timezone
  pub date: String,
  pub title: String,
}

impl WorkoutListing {
  fn from_workout(workout: &HevyWorkout) -> Self {
    let date = DateTime::parse_from_rfc3339(&workout.start_time)
      .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
      .unwrap_or_else(|_| workout.start_time.clone());
    Self {
      id: workout.id.clone(),
      date,
      title: workout.title.clone(),
    }
  }
}

/// Most recent workouts, so one can be picked for `convert_workout`
pub async fn list_workouts(state: &AppState) -> Result<Vec<WorkoutListing>, String> {
  state.require_api_key()?;
  let page = state
    .source
    .workouts(state.settings.default_limit)
    .await
    .ok_or_else(|| SyncError::NoData.to_string())?;
  Ok(page.workouts.iter().map(WorkoutListing::from_workout).collect())
}

pub fn render_listing(listings: &[WorkoutListing]) -> String {
  if listings.is_empty() {
    return "No workouts found.".to_string();
  }
  listings
    .iter()
    .map(|l| format!("{}  {}  {}", l.id, l.date, l.title))
    .collect::<Vec<_>>()
    .join("\n")
}
