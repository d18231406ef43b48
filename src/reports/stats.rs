//! Per-exercise views: the catalogue of exercise names, the stats page that
//! hosts a chart, and the 1RM series behind that chart.

use super::{file_date, is_report_file, ReportError, EXERCISE_STATS_FOLDER};
use crate::models::metadata::DATE_KEY;
use crate::models::WorkoutMetadata;
use crate::settings::Settings;
use crate::store::DocumentStore;
use crate::units::{join_path, one_rep_max_key, sanitize_file_name, utc_date};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsPage {
  pub path: String,
  /// False when the page was already there and left alone
  pub created: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
  pub date: NaiveDate,
  pub value: f64,
  /// Path of the note the value came from
  pub note: String,
}

/// Sorted, de-duplicated exercise names recorded in the workout notes
pub async fn list_exercises(store: &dyn DocumentStore, settings: &Settings) -> Result<Vec<String>, ReportError> {
  let base = settings.base_folder();
  if !store.folder_exists(&base).await? {
    return Ok(Vec::new());
  }

  let mut names = BTreeSet::new();
  for file in store.list_markdown(&base, false).await? {
    let fm = store.read_frontmatter(&file.path).await?;
    names.extend(WorkoutMetadata::from_frontmatter(&fm).exercises);
  }
  Ok(names.into_iter().collect())
}

pub fn stats_page_path(base_folder: &str, exercise: &str) -> String {
  join_path(
    &join_path(base_folder, EXERCISE_STATS_FOLDER),
    &format!("{}.md", sanitize_file_name(exercise)),
  )
}

pub fn render_stats_page(exercise: &str) -> String {
  format!("# Stats: {}\n\n## 1RM trend\n```hevy-chart\nexercise: {}\n```\n", exercise, exercise)
}

/// Create the stats page for an exercise unless one exists
pub async fn generate_exercise_stats_page(
  store: &dyn DocumentStore,
  settings: &Settings,
  exercise: &str,
) -> Result<StatsPage, ReportError> {
  let base = settings.base_folder();
  store.ensure_folder(&join_path(&base, EXERCISE_STATS_FOLDER)).await?;

  let path = stats_page_path(&base, exercise);
  if store.exists(&path).await? {
    log::debug!("Stats page {} exists", path);
    return Ok(StatsPage { path, created: false });
  }

  store.create(&path, &render_stats_page(exercise)).await?;
  log::info!("Created stats page {}", path);
  Ok(StatsPage { path, created: true })
}

/// Chronological 1RM series for one exercise across all notes under the base folder
pub async fn exercise_trend(
  store: &dyn DocumentStore,
  settings: &Settings,
  exercise: &str,
) -> Result<Vec<TrendPoint>, ReportError> {
  let base = settings.base_folder();
  if !store.folder_exists(&base).await? {
    return Ok(Vec::new());
  }

  let key = one_rep_max_key(exercise);
  let mut points = Vec::new();
  for file in store.list_markdown(&base, true).await? {
    if is_report_file(&base, &file) {
      continue;
    }
    let fm = store.read_frontmatter(&file.path).await?;
    let Some(value) = fm.get_str(&key).and_then(|v| v.trim().parse::<f64>().ok()) else {
      continue;
    };

    let date = fm
      .get_str(DATE_KEY)
      .and_then(utc_date)
      .or_else(|| file_date(&file));
    match date {
      Some(date) => points.push(TrendPoint {
        date,
        value,
        note: file.path,
      }),
      None => log::debug!("No usable date for {}, leaving it out of the trend", file.path),
    }
  }

  points.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.note.cmp(&b.note)));
  Ok(points)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sync::sync_all;
  use crate::test_utils::*;

  #[test]
  fn test_stats_page_path_is_sanitized() {
    assert_eq!(
      stats_page_path("HevyWorkouts", "Curl: EZ/Bar"),
      "HevyWorkouts/ExerciseStats/Curl- EZ-Bar.md"
    );
  }

  #[test]
  fn test_render_stats_page() {
    assert_eq!(
      render_stats_page("Bench Press"),
      "# Stats: Bench Press\n\n## 1RM trend\n```hevy-chart\nexercise: Bench Press\n```\n"
    );
  }

  #[tokio::test]
  async fn test_list_exercises_from_synced_notes() {
    let (_dir, vault) = temp_vault();
    let settings = mock_settings();
    let source = FakeSource::new(vec![mock_push_workout(), mock_leg_workout()]);
    sync_all(&source, &vault, &settings, 10).await.unwrap();
    seed_note(&vault, "HevyWorkouts/Scratch.md", "no metadata here").await;

    let names = list_exercises(&vault, &settings).await.unwrap();
    assert_eq!(names, vec!["Bench Press", "Pull Up", "Squat"]);
  }

  #[tokio::test]
  async fn test_list_exercises_without_folder() {
    let (_dir, vault) = temp_vault();
    assert!(list_exercises(&vault, &mock_settings()).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_stats_page_created_once() {
    let (_dir, vault) = temp_vault();
    let settings = mock_settings();

    let first = generate_exercise_stats_page(&vault, &settings, "Squat").await.unwrap();
    assert!(first.created);
    assert_eq!(first.path, "HevyWorkouts/ExerciseStats/Squat.md");

    vault.delete(&first.path).await.unwrap();
    vault.create(&first.path, "my notes").await.unwrap();

    let second = generate_exercise_stats_page(&vault, &settings, "Squat").await.unwrap();
    assert!(!second.created);
    assert_eq!(vault.read(&first.path).await.unwrap(), "my notes");
  }

  #[tokio::test]
  async fn test_exercise_trend_sorted_with_fallback_dates() {
    let (_dir, vault) = temp_vault();
    let settings = mock_settings();
    seed_note(
      &vault,
      "HevyWorkouts/2024-03-20 - Legs.md",
      &metadata_note("b", "2024-03-20T09:00:00Z", &[("squat", "130.0")]),
    )
    .await;
    seed_note(
      &vault,
      "HevyWorkouts/2024/2024-02-01 - Legs.md",
      "---\nhevy_id: a\n1rm-squat: 120.0\n---\n",
    )
    .await;
    seed_note(&vault, "HevyWorkouts/Undated.md", "---\n1rm-squat: 999\n---\n").await;
    seed_note(
      &vault,
      "HevyWorkouts/ExerciseStats/2024-03-01 - Squat.md",
      &metadata_note("x", "2024-03-01T09:00:00Z", &[("squat", "500.0")]),
    )
    .await;
    seed_note(
      &vault,
      "HevyWorkouts/2024-03-22 - Push.md",
      &metadata_note("c", "2024-03-22T09:00:00Z", &[("bench-press", "100.0")]),
    )
    .await;

    let trend = exercise_trend(&vault, &settings, "Squat").await.unwrap();
    let values: Vec<f64> = trend.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![120.0, 130.0]);
    assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(trend[1].note, "HevyWorkouts/2024-03-20 - Legs.md");
  }
}
