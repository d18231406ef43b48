//! Weight units, strength metrics and naming helpers
//!
//! Everything here is pure: no I/O, no clock. The note codec and the report
//! passes both lean on these so that a value written into a note and a value
//! read back from one go through the same conversions.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// ---------------------------------------------------------------------------
/// Constants
/// ---------------------------------------------------------------------------

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462262;

/// Characters that cannot appear in a note file name
const FORBIDDEN_FILE_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SLASH_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\\/]+").unwrap());

/// ---------------------------------------------------------------------------
/// Weight Unit
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
  #[default]
  Kg,
  Lbs,
}

impl WeightUnit {
  pub fn as_str(&self) -> &'static str {
    match self {
      WeightUnit::Kg => "kg",
      WeightUnit::Lbs => "lbs",
    }
  }
}

impl std::fmt::Display for WeightUnit {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for WeightUnit {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "kg" => Ok(Self::Kg),
      "lbs" | "lb" => Ok(Self::Lbs),
      other => Err(format!("Unknown weight unit: {}", other)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Conversion and Formatting
/// ---------------------------------------------------------------------------

/// Convert a kilogram value into the display unit. Missing weight counts as 0.
pub fn convert_weight(weight_kg: Option<f64>, unit: WeightUnit) -> f64 {
  let Some(kg) = weight_kg else {
    return 0.0;
  };
  match unit {
    WeightUnit::Kg => kg,
    WeightUnit::Lbs => kg * LBS_PER_KG,
  }
}

/// Convert a value expressed in `from` into `to`
pub fn convert_between(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
  match (from, to) {
    (WeightUnit::Kg, WeightUnit::Lbs) => value * LBS_PER_KG,
    (WeightUnit::Lbs, WeightUnit::Kg) => value / LBS_PER_KG,
    _ => value,
  }
}

/// Converted weight with one decimal and the unit label, e.g. `"102.3 kg"`
pub fn format_weight(weight_kg: Option<f64>, unit: WeightUnit) -> String {
  format!("{} {}", one_decimal(convert_weight(weight_kg, unit)), unit)
}

pub fn one_decimal(value: f64) -> String {
  format!("{:.1}", value)
}

/// Estimated one-rep max using the Epley formula: `weight * (1 + reps / 30)`.
///
/// This is an estimate derived from a working set, not a measured maximum.
/// Returns 0 when either input is missing or zero.
pub fn estimate_one_rep_max(weight_kg: Option<f64>, reps: Option<u32>) -> f64 {
  match (weight_kg, reps) {
    (Some(w), Some(r)) if w != 0.0 && r != 0 => w * (1.0 + r as f64 / 30.0),
    _ => 0.0,
  }
}

/// ---------------------------------------------------------------------------
/// Naming
/// ---------------------------------------------------------------------------

/// Replace characters that are illegal in file names with `-`.
/// Length is not truncated and collisions are not detected.
pub fn sanitize_file_name(name: &str) -> String {
  name
    .chars()
    .map(|c| if FORBIDDEN_FILE_CHARS.contains(&c) { '-' } else { c })
    .collect()
}

/// Lowercase, hyphenated form of an exercise title ("Bench Press" -> "bench-press")
pub fn exercise_slug(title: &str) -> String {
  let lowered = sanitize_file_name(title).to_lowercase();
  WHITESPACE_RE.replace_all(&lowered, "-").into_owned()
}

/// Metadata key carrying an exercise's estimated 1RM
pub fn one_rep_max_key(title: &str) -> String {
  format!("{}{}", crate::models::metadata::ONE_REP_MAX_PREFIX, exercise_slug(title))
}

/// Collapse separators and trim so vault paths compare equal
pub fn normalize_path(path: &str) -> String {
  let collapsed = SLASH_RUN_RE.replace_all(path.trim(), "/");
  collapsed.trim_matches('/').to_string()
}

/// Join a folder and a child name into a normalised vault path
pub fn join_path(folder: &str, name: &str) -> String {
  normalize_path(&format!("{}/{}", folder, name))
}

/// ---------------------------------------------------------------------------
/// Dates
/// ---------------------------------------------------------------------------

/// Calendar date (UTC) of a timestamp string.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps
/// (taken as UTC) and bare `YYYY-MM-DD` dates.
pub fn utc_date(timestamp: &str) -> Option<NaiveDate> {
  let raw = timestamp.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc).date_naive());
  }
  if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
    return Some(naive.date());
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// ISO-8601 week label `YYYY-Www`.
///
/// The year is the one owning the week's Thursday, so early January can land
/// in the previous year's last week and late December in next year's week 1.
/// The week number is not zero-padded.
pub fn iso_week_label(date: NaiveDate) -> String {
  let week = date.iso_week();
  format!("{}-W{}", week.year(), week.week())
}

/// Calendar month label `YYYY-MM`
pub fn month_label(date: NaiveDate) -> String {
  date.format("%Y-%m").to_string()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
