//! Configuration
//!
//! Defaults, then an optional JSON settings file, then `HEVY_*` environment
//! variables. The resulting value is handed to every engine entry point.

use crate::hevy::HEVY_API_BASE;
use crate::units::{normalize_path, WeightUnit};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_FOLDER: &str = "HevyWorkouts";
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_SETTINGS_FILE: &str = "hevy-notes.json";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
  #[error("Failed to access settings file: {0}")]
  Io(#[from] std::io::Error),

  #[error("Failed to parse settings file: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("Invalid value for {key}: {value}")]
  Invalid { key: String, value: String },

  #[error("Hevy API key not configured (set HEVY_API_KEY)")]
  MissingApiKey,
}

/// ---------------------------------------------------------------------------
/// Settings
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
  pub api_key: String,
  /// Number of recent workouts fetched by a bulk sync
  pub default_limit: u32,
  pub weight_unit: WeightUnit,
  /// Vault folder holding workout notes and report folders
  pub folder_path: String,
  /// Filesystem root of the vault
  pub vault_dir: PathBuf,
  pub api_base: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      api_key: String::new(),
      default_limit: DEFAULT_LIMIT,
      weight_unit: WeightUnit::Kg,
      folder_path: DEFAULT_FOLDER.to_string(),
      vault_dir: PathBuf::from("."),
      api_base: HEVY_API_BASE.to_string(),
    }
  }
}

impl Settings {
  /// Defaults overlaid with the settings file (if present) and the environment
  pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
    let mut settings = match path {
      Some(p) => Self::from_file(p)?,
      None => Self::default(),
    };
    settings.apply_env()?;
    Ok(settings)
  }

  /// Read a JSON settings file. A missing file yields the defaults; missing keys keep theirs.
  pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
    match fs::read_to_string(path) {
      Ok(raw) => Ok(serde_json::from_str(&raw)?),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
      Err(e) => Err(e.into()),
    }
  }

  pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(self)?)?;
    Ok(())
  }

  pub fn apply_env(&mut self) -> Result<(), SettingsError> {
    if let Ok(key) = env::var("HEVY_API_KEY") {
      self.api_key = key;
    }
    if let Ok(limit) = env::var("HEVY_DEFAULT_LIMIT") {
      self.default_limit = limit.trim().parse().map_err(|_| SettingsError::Invalid {
        key: "HEVY_DEFAULT_LIMIT".into(),
        value: limit.clone(),
      })?;
    }
    if let Ok(unit) = env::var("HEVY_WEIGHT_UNIT") {
      self.weight_unit = unit.parse().map_err(|_| SettingsError::Invalid {
        key: "HEVY_WEIGHT_UNIT".into(),
        value: unit.clone(),
      })?;
    }
    if let Ok(folder) = env::var("HEVY_FOLDER_PATH") {
      self.folder_path = folder;
    }
    if let Ok(dir) = env::var("HEVY_VAULT_DIR") {
      self.vault_dir = PathBuf::from(dir);
    }
    if let Ok(base) = env::var("HEVY_API_BASE") {
      self.api_base = base;
    }
    Ok(())
  }

  /// Normalised workout folder, falling back to the default when blank
  pub fn base_folder(&self) -> String {
    let normalized = normalize_path(&self.folder_path);
    if normalized.is_empty() {
      DEFAULT_FOLDER.to_string()
    } else {
      normalized
    }
  }

  pub fn require_api_key(&self) -> Result<&str, SettingsError> {
    if self.api_key.trim().is_empty() {
      return Err(SettingsError::MissingApiKey);
    }
    Ok(&self.api_key)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
