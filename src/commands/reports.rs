use super::AppState;
use crate::reports::{monthly, weekly};

/// ---------------------------------------------------------------------------
/// Weekly Reports
/// ---------------------------------------------------------------------------

pub async fn generate_weekly_reports(state: &AppState) -> Result<String, String> {
  let summary = weekly::generate_weekly_reports(state.store.as_ref(), &state.settings)
    .await
    .map_err(|e| format!("Failed to generate weekly reports: {}", e))?;

  Ok(format!(
    "Weekly reports updated. {} written, {} already present.",
    summary.written.len(),
    summary.skipped.len()
  ))
}

/// ---------------------------------------------------------------------------
/// Monthly Review
/// ---------------------------------------------------------------------------

pub async fn generate_monthly_review(state: &AppState) -> Result<String, String> {
  log::info!("Archiving monthly reviews...");
  let summary = monthly::generate_monthly_reports(state.store.as_ref(), &state.settings)
    .await
    .map_err(|e| format!("Failed to generate monthly reviews: {}", e))?;

  Ok(format!("Monthly reports archived. {} written.", summary.written.len()))
}
