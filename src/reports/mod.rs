//! Periodic reports built from previously synced workout notes
//!
//! Reports are derived artifacts: they own no data and are recomputed from
//! the note corpus. Weekly reports are written once per ISO week and never
//! recomputed; monthly reviews are regenerated on every run.

pub mod monthly;
pub mod stats;
pub mod weekly;

use crate::store::{NoteFile, StoreError};
use crate::units::join_path;
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const WEEKLY_REPORTS_FOLDER: &str = "WeeklyReports";
pub const MONTHLY_REPORTS_FOLDER: &str = "MonthlyReports";
pub const EXERCISE_STATS_FOLDER: &str = "ExerciseStats";

static DAY_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());
static MONTH_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
  #[error("Store error: {0}")]
  Store(#[from] StoreError),
}

/// Report paths touched by one pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
  pub written: Vec<String>,
  /// Periods that already had a report
  pub skipped: Vec<String>,
}

/// Date from a `YYYY-MM-DD` file name prefix
pub fn file_date(file: &NoteFile) -> Option<NaiveDate> {
  let prefix = DAY_PREFIX_RE.find(file.name())?;
  NaiveDate::parse_from_str(prefix.as_str(), "%Y-%m-%d").ok()
}

/// `YYYY-MM` file name prefix
pub fn file_month(file: &NoteFile) -> Option<&str> {
  MONTH_PREFIX_RE.find(file.basename()).map(|m| m.as_str())
}

/// True for files inside one of the folders reports are written to
pub fn is_report_file(base_folder: &str, file: &NoteFile) -> bool {
  [WEEKLY_REPORTS_FOLDER, MONTHLY_REPORTS_FOLDER, EXERCISE_STATS_FOLDER]
    .iter()
    .any(|folder| file.path.starts_with(&format!("{}/", join_path(base_folder, folder))))
}

/// Markdown bullet list of wikilinks
fn session_links(files: &[NoteFile]) -> String {
  files
    .iter()
    .map(|f| format!("- {}", f.wikilink()))
    .collect::<Vec<_>>()
    .join("\n")
}
