//! Typed view of a workout note's metadata block

use crate::store::Frontmatter;
use crate::units::one_decimal;

pub const HEVY_ID_KEY: &str = "hevy_id";
pub const DATE_KEY: &str = "date";
pub const EXERCISES_KEY: &str = "exercises";
pub const ONE_REP_MAX_PREFIX: &str = "1rm-";

/// Estimated 1RM for one exercise, already in the display unit
#[derive(Debug, Clone, PartialEq)]
pub struct OneRepMax {
  pub slug: String,
  pub value: f64,
}

impl OneRepMax {
  pub fn key(&self) -> String {
    format!("{}{}", ONE_REP_MAX_PREFIX, self.slug)
  }

  /// Exercise name recovered from the slug ("bench-press" -> "bench press")
  pub fn display_name(&self) -> String {
    self.slug.replace('-', " ")
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutMetadata {
  pub hevy_id: String,
  /// Raw start time as reported by the API
  pub date: String,
  pub exercises: Vec<String>,
  /// One entry per distinct slug, in exercise order
  pub one_rep_max: Vec<OneRepMax>,
}

impl WorkoutMetadata {
  /// Record a 1RM. A later exercise with the same slug replaces the earlier value.
  pub fn set_one_rep_max(&mut self, slug: &str, value: f64) {
    match self.one_rep_max.iter_mut().find(|e| e.slug == slug) {
      Some(entry) => entry.value = value,
      None => self.one_rep_max.push(OneRepMax {
        slug: slug.to_string(),
        value,
      }),
    }
  }

  pub fn one_rep_max_for(&self, slug: &str) -> Option<f64> {
    self.one_rep_max.iter().find(|e| e.slug == slug).map(|e| e.value)
  }

  /// Merge into a metadata block by key. Keys this struct does not own are left alone.
  pub fn apply_to(&self, fm: &mut Frontmatter) {
    fm.set_scalar(HEVY_ID_KEY, self.hevy_id.as_str());
    fm.set_scalar(DATE_KEY, self.date.as_str());
    fm.set_list(EXERCISES_KEY, self.exercises.clone());
    for entry in &self.one_rep_max {
      fm.set_scalar(&entry.key(), one_decimal(entry.value));
    }
  }

  pub fn to_frontmatter(&self) -> Frontmatter {
    let mut fm = Frontmatter::new();
    self.apply_to(&mut fm);
    fm
  }

  /// Lenient read-back: missing keys become empty, non-numeric 1RM values are dropped
  pub fn from_frontmatter(fm: &Frontmatter) -> Self {
    let mut metadata = WorkoutMetadata {
      hevy_id: fm.get_str(HEVY_ID_KEY).unwrap_or_default().to_string(),
      date: fm.get_str(DATE_KEY).unwrap_or_default().to_string(),
      exercises: fm.get_list(EXERCISES_KEY).map(<[String]>::to_vec).unwrap_or_default(),
      one_rep_max: Vec::new(),
    };

    for (key, value) in fm.iter() {
      let Some(slug) = key.strip_prefix(ONE_REP_MAX_PREFIX) else {
        continue;
      };
      let parsed = value.as_scalar().and_then(|v| v.trim().parse::<f64>().ok());
      if let Some(v) = parsed.filter(|v| v.is_finite()) {
        metadata.set_one_rep_max(slug, v);
      }
    }

    metadata
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> WorkoutMetadata {
    let mut metadata = WorkoutMetadata {
      hevy_id: "w-1".into(),
      date: "2024-03-12T17:02:11+00:00".into(),
      exercises: vec!["Bench Press".into(), "Squat".into()],
      one_rep_max: Vec::new(),
    };
    metadata.set_one_rep_max("bench-press", 105.5);
    metadata.set_one_rep_max("squat", 140.0);
    metadata
  }

  #[test]
  fn test_apply_to_renders_owned_keys() {
    let rendered = sample().to_frontmatter().render();
    assert_eq!(
      rendered,
      "---\nhevy_id: w-1\ndate: 2024-03-12T17:02:11+00:00\nexercises: [\"Bench Press\",\"Squat\"]\n1rm-bench-press: 105.5\n1rm-squat: 140.0\n---\n"
    );
  }

  #[test]
  fn test_apply_to_keeps_foreign_keys() {
    let mut fm = Frontmatter::new();
    fm.set_scalar("mood", "tired");
    fm.set_scalar("1rm-bench-press", "90.0");
    sample().apply_to(&mut fm);
    assert_eq!(fm.get_str("mood"), Some("tired"));
    assert_eq!(fm.get_str("1rm-bench-press"), Some("105.5"));
  }

  #[test]
  fn test_from_frontmatter_round_trip() {
    let original = sample();
    let back = WorkoutMetadata::from_frontmatter(&original.to_frontmatter());
    assert_eq!(back, original);
  }

  #[test]
  fn test_from_frontmatter_skips_bad_values() {
    let mut fm = Frontmatter::new();
    fm.set_scalar("1rm-squat", "heavy");
    fm.set_list("1rm-deadlift", vec!["1".into()]);
    fm.set_scalar("1rm-row", "80");
    let metadata = WorkoutMetadata::from_frontmatter(&fm);
    assert_eq!(metadata.one_rep_max.len(), 1);
    assert_eq!(metadata.one_rep_max_for("row"), Some(80.0));
    assert!(metadata.hevy_id.is_empty());
  }

  #[test]
  fn test_display_name() {
    let entry = OneRepMax {
      slug: "bench-press".into(),
      value: 1.0,
    };
    assert_eq!(entry.display_name(), "bench press");
    assert_eq!(entry.key(), "1rm-bench-press");
  }
}
