//! Weekly training volume
//!
//! Notes are grouped by the ISO week of their file name date. Volume is the
//! sum of `weight * reps` over every set line in the note bodies, converted
//! into the display unit. Lines that do not match the set pattern add nothing.

use super::{file_date, session_links, ReportError, ReportSummary, WEEKLY_REPORTS_FOLDER};
use crate::settings::Settings;
use crate::store::{DocumentStore, NoteFile};
use crate::units::{convert_between, iso_week_label, join_path, WeightUnit};
use regex::Regex;
use std::collections::BTreeMap;
use std::ops::AddAssign;
use std::sync::LazyLock;

static SET_LINE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\*\*([\d.]+)\s*(kg|lbs)\*\*\s*x\s*(\d+)").unwrap());

/// Volume plus bookkeeping about which lines contributed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VolumeTally {
  pub volume: f64,
  pub matched_lines: usize,
  /// Lines that looked like a set but could not be read
  pub unparsed_lines: usize,
}

impl AddAssign for VolumeTally {
  fn add_assign(&mut self, other: Self) {
    self.volume += other.volume;
    self.matched_lines += other.matched_lines;
    self.unparsed_lines += other.unparsed_lines;
  }
}

fn looks_like_set(line: &str) -> bool {
  let trimmed = line.trim_start();
  let trimmed = trimmed.strip_prefix("- ").unwrap_or(trimmed);
  trimmed.starts_with("Set ")
}

fn parse_set_line(line: &str, unit: WeightUnit) -> Option<f64> {
  let caps = SET_LINE_RE.captures(line)?;
  let weight: f64 = caps[1].parse().ok()?;
  let line_unit: WeightUnit = caps[2].parse().ok()?;
  let reps: u64 = caps[3].parse().ok()?;
  Some(convert_between(weight, line_unit, unit) * reps as f64)
}

/// Training volume recorded in one note's content
pub fn note_volume(content: &str, unit: WeightUnit) -> VolumeTally {
  let mut tally = VolumeTally::default();
  for line in content.lines() {
    match parse_set_line(line, unit) {
      Some(volume) => {
        tally.volume += volume;
        tally.matched_lines += 1;
      }
      None if looks_like_set(line) => tally.unparsed_lines += 1,
      None => {}
    }
  }
  tally
}

/// Group dated notes by ISO week label. Undated files are ignored.
pub fn group_by_week(files: Vec<NoteFile>) -> BTreeMap<String, Vec<NoteFile>> {
  let mut weeks: BTreeMap<String, Vec<NoteFile>> = BTreeMap::new();
  for file in files {
    if let Some(date) = file_date(&file) {
      weeks.entry(iso_week_label(date)).or_default().push(file);
    }
  }
  weeks
}

pub fn weekly_report_path(base_folder: &str, week: &str) -> String {
  join_path(
    &join_path(base_folder, WEEKLY_REPORTS_FOLDER),
    &format!("Report-{}.md", week),
  )
}

pub fn render_weekly_report(week: &str, files: &[NoteFile], volume: f64, unit: WeightUnit) -> String {
  format!(
    "# Weekly Report: {}\n- Workouts: {}\n- Volume: {:.1} {}\n\n## Workouts\n{}\n",
    week,
    files.len(),
    volume,
    unit,
    session_links(files)
  )
}

/// Write a report for every week that has workout notes but no report yet
pub async fn generate_weekly_reports(
  store: &dyn DocumentStore,
  settings: &Settings,
) -> Result<ReportSummary, ReportError> {
  let base = settings.base_folder();
  let mut summary = ReportSummary::default();

  if !store.folder_exists(&base).await? {
    log::info!("Workout folder {} does not exist, nothing to report", base);
    return Ok(summary);
  }

  let weeks = group_by_week(store.list_markdown(&base, false).await?);
  store.ensure_folder(&join_path(&base, WEEKLY_REPORTS_FOLDER)).await?;

  for (week, files) in weeks {
    let path = weekly_report_path(&base, &week);
    if store.exists(&path).await? {
      log::debug!("Weekly report for {} exists, skipping", week);
      summary.skipped.push(path);
      continue;
    }

    let mut tally = VolumeTally::default();
    for file in &files {
      let content = store.read(&file.path).await?;
      tally += note_volume(&content, settings.weight_unit);
    }
    if tally.unparsed_lines > 0 {
      log::warn!("{}: {} set lines could not be read", week, tally.unparsed_lines);
    }

    store
      .create(&path, &render_weekly_report(&week, &files, tally.volume, settings.weight_unit))
      .await?;
    summary.written.push(path);
  }

  log::info!(
    "Weekly reports: {} written, {} already present",
    summary.written.len(),
    summary.skipped.len()
  );
  Ok(summary)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::test_utils::*;
  use crate::sync::sync_all;

  #[test]
  fn test_note_volume_converts_to_display_unit() {
    let tally = note_volume("- Set 1: **100.0 kg** x 5", WeightUnit::Lbs);
    assert_approx_eq!(tally.volume, 1102.31131, 1e-4);
    assert_eq!(tally.matched_lines, 1);

    let tally = note_volume("- Set 1: **220.5 lbs** x 2", WeightUnit::Kg);
    assert_approx_eq!(tally.volume, 200.034, 1e-3);
  }

  #[test]
  fn test_note_volume_skips_unreadable_lines() {
    let content = "# Push\n\n## Bench\n- Set 1: **100.0 kg** x 5\n- Set 2: **0.0 kg** x -\n- Set 3: **1.2.3 kg** x 4\nrandom **text**\n";
    let tally = note_volume(content, WeightUnit::Kg);
    assert_approx_eq!(tally.volume, 500.0, 1e-9);
    assert_eq!(tally.matched_lines, 1);
    assert_eq!(tally.unparsed_lines, 2);
  }

  #[test]
  fn test_group_by_week_uses_iso_year() {
    let files = vec![
      NoteFile::new("W/2021-01-01 - New Year.md"),
      NoteFile::new("W/2021-01-04 - Monday.md"),
      NoteFile::new("W/2021-01-05 - Tuesday.md"),
      NoteFile::new("W/Notes.md"),
    ];
    let weeks = group_by_week(files);
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks["2020-W53"].len(), 1);
    assert_eq!(weeks["2021-W1"].len(), 2);
  }

  #[test]
  fn test_render_weekly_report() {
    let files = vec![NoteFile::new("W/2024-03-12 - Push Day.md")];
    let report = render_weekly_report("2024-W11", &files, 1102.311, WeightUnit::Lbs);
    assert_eq!(
      report,
      "# Weekly Report: 2024-W11\n- Workouts: 1\n- Volume: 1102.3 lbs\n\n## Workouts\n- [[2024-03-12 - Push Day]]\n"
    );
  }

  #[tokio::test]
  async fn test_generate_weekly_reports_from_synced_notes() {
    let (_dir, vault) = temp_vault();
    let settings = mock_settings();
    let source = FakeSource::new(vec![mock_push_workout(), mock_leg_workout()]);
    sync_all(&source, &vault, &settings, 10).await.unwrap();

    let summary = generate_weekly_reports(&vault, &settings).await.unwrap();
    assert_eq!(summary.written, vec!["HevyWorkouts/WeeklyReports/Report-2024-W11.md"]);

    let report = vault.read("HevyWorkouts/WeeklyReports/Report-2024-W11.md").await.unwrap();
    assert!(report.contains("- Workouts: 2"));
    // Bench 60x10 + 100x5, squat 100x5 + 120x3; bodyweight sets add 0
    assert!(report.contains("- Volume: 1960.0 kg"));
    assert!(report.contains("- [[2024-03-12 - Push Day]]"));
    assert!(report.contains("- [[2024-03-14 - Leg Day]]"));
  }

  #[tokio::test]
  async fn test_existing_weekly_report_is_not_recomputed() {
    let (_dir, vault) = temp_vault();
    let settings = mock_settings();
    seed_note(&vault, "HevyWorkouts/2024-03-12 - Push.md", "- Set 1: **100.0 kg** x 5\n").await;
    seed_note(&vault, "HevyWorkouts/WeeklyReports/Report-2024-W11.md", "stale").await;
    seed_note(&vault, "HevyWorkouts/2024-03-19 - Push.md", "- Set 1: **50.0 kg** x 2\n").await;

    let summary = generate_weekly_reports(&vault, &settings).await.unwrap();
    assert_eq!(summary.skipped, vec!["HevyWorkouts/WeeklyReports/Report-2024-W11.md"]);
    assert_eq!(summary.written, vec!["HevyWorkouts/WeeklyReports/Report-2024-W12.md"]);
    assert_eq!(
      vault.read("HevyWorkouts/WeeklyReports/Report-2024-W11.md").await.unwrap(),
      "stale"
    );
  }

  #[tokio::test]
  async fn test_weekly_reports_without_folder() {
    let (_dir, vault) = temp_vault();
    let summary = generate_weekly_reports(&vault, &mock_settings()).await.unwrap();
    assert!(summary.written.is_empty());
    assert!(!vault.exists("HevyWorkouts").await.unwrap());
  }
}
