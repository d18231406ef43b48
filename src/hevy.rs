//! Hevy API client
//!
//! Two read-only endpoints: the recent-workout list and a single workout's
//! detail. Every failure (network, non-success status, malformed payload)
//! surfaces to the engine as "no data".

use crate::models::{HevyWorkout, WorkoutPage};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const HEVY_API_BASE: &str = "https://api.hevyapp.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum HevyError {
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Hevy API returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("Failed to parse Hevy response: {0}")]
  Parse(String),

  #[error("Invalid API URL: {0}")]
  Url(String),
}

/// ---------------------------------------------------------------------------
/// Workout Source
/// ---------------------------------------------------------------------------

/// Where workouts come from. `None` means the data could not be fetched.
#[async_trait]
pub trait WorkoutSource: Send + Sync {
  /// Up to `limit` most recent workouts
  async fn workouts(&self, limit: u32) -> Option<WorkoutPage>;

  async fn workout(&self, id: &str) -> Option<HevyWorkout>;
}

/// ---------------------------------------------------------------------------
/// HTTP Client
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HevyClient {
  client: Client,
  api_base: Url,
  api_key: String,
}

impl HevyClient {
  pub fn new(api_key: &str, api_base: &str) -> Result<Self, HevyError> {
    let api_base = Url::parse(api_base).map_err(|e| HevyError::Url(e.to_string()))?;
    if api_base.cannot_be_a_base() {
      return Err(HevyError::Url(api_base.to_string()));
    }

    let client = Client::builder()
      .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
      .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
      .build()?;

    Ok(Self {
      client,
      api_base,
      api_key: api_key.to_string(),
    })
  }

  /// `{base}/v1/workouts[/<id>]`
  fn workouts_url(&self, id: Option<&str>) -> Result<Url, HevyError> {
    let mut url = self.api_base.clone();
    {
      let mut segments = url
        .path_segments_mut()
        .map_err(|_| HevyError::Url(self.api_base.to_string()))?;
      segments.pop_if_empty().extend(["v1", "workouts"]);
      if let Some(id) = id {
        segments.push(id);
      }
    }
    Ok(url)
  }

  async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, HevyError> {
    let response = self
      .client
      .get(url)
      .header("api-key", &self.api_key)
      .header("Content-Type", "application/json")
      .send()
      .await?;

    if !response.status().is_success() {
      let status = response.status().as_u16();
      let body = response.text().await.unwrap_or_default();
      return Err(HevyError::Status { status, body });
    }

    let response_text = response.text().await?;
    serde_json::from_str(&response_text).map_err(|e| {
      log::debug!(
        "Raw Hevy response (first 500 chars): {}",
        response_text.chars().take(500).collect::<String>()
      );
      HevyError::Parse(e.to_string())
    })
  }

  /// `GET /v1/workouts?page=1&pageSize=<limit>`
  pub async fn fetch_workouts(&self, limit: u32) -> Result<WorkoutPage, HevyError> {
    let mut url = self.workouts_url(None)?;
    url
      .query_pairs_mut()
      .append_pair("page", "1")
      .append_pair("pageSize", &limit.to_string());
    self.get_json(url).await
  }

  /// `GET /v1/workouts/<id>`
  pub async fn fetch_workout_details(&self, workout_id: &str) -> Result<HevyWorkout, HevyError> {
    let url = self.workouts_url(Some(workout_id))?;
    self.get_json(url).await
  }
}

#[async_trait]
impl WorkoutSource for HevyClient {
  async fn workouts(&self, limit: u32) -> Option<WorkoutPage> {
    match self.fetch_workouts(limit).await {
      Ok(page) => Some(page),
      Err(e) => {
        log::warn!("Failed to fetch workout list: {}", e);
        None
      }
    }
  }

  async fn workout(&self, id: &str) -> Option<HevyWorkout> {
    match self.fetch_workout_details(id).await {
      Ok(workout) => Some(workout),
      Err(e) => {
        log::warn!("Failed to fetch workout {}: {}", id, e);
        None
      }
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
