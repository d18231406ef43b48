//! Monthly fitness review
//!
//! Notes are grouped by the `YYYY-MM` prefix of their file name. For every
//! month the highest `1rm-*` value per exercise is reported, alphabetically.
//! A month's review is deleted and rewritten on every run.

use super::{file_month, is_report_file, session_links, ReportError, ReportSummary, MONTHLY_REPORTS_FOLDER};
use crate::models::WorkoutMetadata;
use crate::settings::Settings;
use crate::store::{DocumentStore, Frontmatter, NoteFile};
use crate::units::{join_path, WeightUnit};
use std::collections::BTreeMap;

/// Peak 1RM per exercise name across a set of notes
pub fn collect_peaks<'a>(notes: impl IntoIterator<Item = &'a Frontmatter>) -> BTreeMap<String, f64> {
  let mut peaks: BTreeMap<String, f64> = BTreeMap::new();
  for fm in notes {
    for entry in WorkoutMetadata::from_frontmatter(fm).one_rep_max {
      peaks
        .entry(entry.display_name())
        .and_modify(|peak| *peak = peak.max(entry.value))
        .or_insert(entry.value);
    }
  }
  peaks
}

/// Group dated notes by month label
pub fn group_by_month(files: Vec<NoteFile>) -> BTreeMap<String, Vec<NoteFile>> {
  let mut months: BTreeMap<String, Vec<NoteFile>> = BTreeMap::new();
  for file in files {
    if let Some(month) = file_month(&file).map(str::to_string) {
      months.entry(month).or_default().push(file);
    }
  }
  months
}

pub fn monthly_report_path(base_folder: &str, month: &str) -> String {
  join_path(&join_path(base_folder, MONTHLY_REPORTS_FOLDER), &format!("{}.md", month))
}

pub fn render_monthly_report(
  month: &str,
  peaks: &BTreeMap<String, f64>,
  files: &[NoteFile],
  unit: WeightUnit,
) -> String {
  let mut content = format!(
    "# Fitness Review: {}\n\n## 🏆 Personal records this month\n| Exercise | Peak 1RM ({}) |\n| --- | --- |\n",
    month, unit
  );
  for (name, value) in peaks {
    content.push_str(&format!("| **{}** | {:.1} |\n", name.to_uppercase(), value));
  }
  content.push_str(&format!("\n## 📅 Sessions\n{}\n", session_links(files)));
  content
}

/// Regenerate the review of every month that has workout notes
pub async fn generate_monthly_reports(
  store: &dyn DocumentStore,
  settings: &Settings,
) -> Result<ReportSummary, ReportError> {
  let base = settings.base_folder();
  let reports_folder = join_path(&base, MONTHLY_REPORTS_FOLDER);
  store.ensure_folder(&reports_folder).await?;

  let files: Vec<NoteFile> = store
    .list_markdown(&base, true)
    .await?
    .into_iter()
    .filter(|f| !is_report_file(&base, f))
    .collect();

  let mut summary = ReportSummary::default();
  for (month, files) in group_by_month(files) {
    let mut notes = Vec::with_capacity(files.len());
    for file in &files {
      notes.push(store.read_frontmatter(&file.path).await?);
    }
    let peaks = collect_peaks(&notes);

    let path = monthly_report_path(&base, &month);
    if store.exists(&path).await? {
      store.delete(&path).await?;
    }
    store
      .create(&path, &render_monthly_report(&month, &peaks, &files, settings.weight_unit))
      .await?;
    summary.written.push(path);
  }

  log::info!("Monthly reviews written: {}", summary.written.len());
  Ok(summary)
}
