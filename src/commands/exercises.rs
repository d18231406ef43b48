use super::AppState;
use crate::reports::stats::{self, TrendPoint};
use crate::units::{one_rep_max_key, WeightUnit};

/// Exercise names found in the workout notes, one per line
pub async fn list_exercises(state: &AppState) -> Result<String, String> {
  let names = stats::list_exercises(state.store.as_ref(), &state.settings)
    .await
    .map_err(|e| format!("Failed to list exercises: {}", e))?;

  if names.is_empty() {
    return Ok(format!("No exercises found in {}.", state.settings.base_folder()));
  }
  Ok(names.join("\n"))
}

pub async fn generate_exercise_stats(state: &AppState, exercise: &str) -> Result<String, String> {
  let page = stats::generate_exercise_stats_page(state.store.as_ref(), &state.settings, exercise)
    .await
    .map_err(|e| format!("Failed to create stats page for {}: {}", exercise, e))?;

  if page.created {
    Ok(format!("Created stats page {}", page.path))
  } else {
    Ok(format!("Stats page already exists: {}", page.path))
  }
}

/// 1RM series for an exercise with the latest value on top
pub async fn exercise_trend(state: &AppState, exercise: &str) -> Result<String, String> {
  let points = stats::exercise_trend(state.store.as_ref(), &state.settings, exercise)
    .await
    .map_err(|e| format!("Failed to read trend for {}: {}", exercise, e))?;

  Ok(render_trend(exercise, &points, state.settings.weight_unit))
}

pub fn render_trend(exercise: &str, points: &[TrendPoint], unit: WeightUnit) -> String {
  let Some(latest) = points.last() else {
    return format!(
      "No local data found for \"{}\". Check frontmatter for '{}'.",
      exercise,
      one_rep_max_key(exercise)
    );
  };

  let mut out = format!("Latest Est. 1RM: {:.1} {}\n", latest.value, unit);
  for point in points {
    out.push_str(&format!("{}  {:.1}\n", point.date, point.value));
  }
  out
}
