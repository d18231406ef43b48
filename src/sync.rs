//! Sync orchestration
//!
//! Bulk sync walks the recent-workout list and creates a note for every
//! workout whose derived path is still free. Single-workout sync fetches one
//! workout and either creates its note or refreshes the metadata of the
//! existing one. Calls are strictly sequential.

use crate::codec::{encode_workout_note, workout_note_path, CodecError};
use crate::hevy::WorkoutSource;
use crate::models::HevyWorkout;
use crate::settings::Settings;
use crate::store::{DocumentStore, Frontmatter, StoreError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
  #[error("No workout data found. Check API key.")]
  NoData,

  #[error("Store error: {0}")]
  Store(#[from] StoreError),

  #[error(transparent)]
  Codec(#[from] CodecError),
}

/// What happened to a workout's note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NoteWrite {
  Created(String),
  /// Note already existed; only its metadata was refreshed
  Updated(String),
}

impl NoteWrite {
  pub fn path(&self) -> &str {
    match self {
      NoteWrite::Created(p) | NoteWrite::Updated(p) => p,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
  pub fetched: usize,
  pub created: usize,
  pub updated: usize,
  /// Skipped because a note already sits at the derived path
  pub existing: usize,
  /// Detail fetch failed or start time unreadable
  pub failed: usize,
}

/// Write a fetched workout to the store: create the note, or merge metadata into the existing one
pub async fn write_workout_note(
  store: &dyn DocumentStore,
  settings: &Settings,
  workout: &HevyWorkout,
) -> Result<NoteWrite, SyncError> {
  let folder = settings.base_folder();
  store.ensure_folder(&folder).await?;

  let note = encode_workout_note(&folder, workout, settings.weight_unit)?;

  if store.exists(&note.path).await? {
    let metadata = &note.metadata;
    store
      .process_frontmatter(&note.path, &mut |fm: &mut Frontmatter| metadata.apply_to(fm))
      .await?;
    log::debug!("Refreshed metadata of {}", note.path);
    Ok(NoteWrite::Updated(note.path))
  } else {
    store.create(&note.path, &note.content()).await?;
    log::debug!("Created {}", note.path);
    Ok(NoteWrite::Created(note.path))
  }
}

/// Fetch one workout by id and write its note. `Ok(None)` when the fetch failed.
pub async fn sync_one(
  source: &dyn WorkoutSource,
  store: &dyn DocumentStore,
  settings: &Settings,
  workout_id: &str,
) -> Result<Option<NoteWrite>, SyncError> {
  let Some(workout) = source.workout(workout_id).await else {
    return Ok(None);
  };
  write_workout_note(store, settings, &workout).await.map(Some)
}

/// Sync up to `limit` recent workouts.
///
/// Existence is decided by derived path, not by `hevy_id`: a workout renamed
/// upstream gets a second note.
pub async fn sync_all(
  source: &dyn WorkoutSource,
  store: &dyn DocumentStore,
  settings: &Settings,
  limit: u32,
) -> Result<SyncSummary, SyncError> {
  let page = source.workouts(limit).await.ok_or(SyncError::NoData)?;

  let folder = settings.base_folder();
  store.ensure_folder(&folder).await?;

  let mut summary = SyncSummary {
    fetched: page.workouts.len(),
    ..SyncSummary::default()
  };

  for workout in &page.workouts {
    let path = match workout_note_path(&folder, workout) {
      Ok(path) => path,
      Err(e) => {
        log::warn!("Skipping workout: {}", e);
        summary.failed += 1;
        continue;
      }
    };

    if store.exists(&path).await? {
      log::debug!("Note already exists, skipping {}", path);
      summary.existing += 1;
      continue;
    }

    match sync_one(source, store, settings, &workout.id).await {
      Ok(Some(NoteWrite::Created(_))) => summary.created += 1,
      Ok(Some(NoteWrite::Updated(_))) => summary.updated += 1,
      Ok(None) => summary.failed += 1,
      Err(SyncError::Codec(e)) => {
        log::warn!("Skipping workout: {}", e);
        summary.failed += 1;
      }
      Err(e) => return Err(e),
    }
  }

  log::info!(
    "Sync complete: {} fetched, {} created, {} updated, {} existing, {} failed",
    summary.fetched,
    summary.created,
    summary.updated,
    summary.existing,
    summary.failed
  );

  Ok(summary)
}
