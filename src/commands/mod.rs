pub mod exercises;
pub mod reports;
pub mod sync;

use crate::hevy::{HevyClient, WorkoutSource};
use crate::settings::Settings;
use crate::store::{DocumentStore, Vault};

/// Everything a command needs: configuration plus the two collaborators
pub struct AppState {
  pub settings: Settings,
  pub store: Box<dyn DocumentStore>,
  pub source: Box<dyn WorkoutSource>,
}

impl AppState {
  pub fn new(settings: Settings, store: Box<dyn DocumentStore>, source: Box<dyn WorkoutSource>) -> Self {
    Self {
      settings,
      store,
      source,
    }
  }

  /// Vault at `settings.vault_dir` and a Hevy client for `settings.api_base`
  pub fn open(settings: Settings) -> Result<Self, String> {
    let store = Vault::new(settings.vault_dir.clone());
    let source = HevyClient::new(&settings.api_key, &settings.api_base)
      .map_err(|e| format!("Failed to create Hevy client: {}", e))?;
    Ok(Self::new(settings, Box::new(store), Box::new(source)))
  }

  /// Commands that talk to Hevy refuse to run without a key
  fn require_api_key(&self) -> Result<(), String> {
    self
      .settings
      .require_api_key()
      .map(|_| ())
      .map_err(|e| e.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::*;

  #[test]
  fn test_require_api_key() {
    let (_dir, vault) = temp_vault();
    let state = AppState::new(Settings::default(), Box::new(vault), Box::new(FakeSource::new(vec![])));
    let err = state.require_api_key().unwrap_err();
    assert!(err.contains("HEVY_API_KEY"));
  }

  #[test]
  fn test_open_uses_vault_dir() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
      vault_dir: dir.path().to_path_buf(),
      ..mock_settings()
    };
    let state = AppState::open(settings.clone()).unwrap();
    assert_eq!(state.settings, settings);

    let bad = Settings {
      api_base: "not a url".into(),
      ..mock_settings()
    };
    assert!(AppState::open(bad).is_err());
  }
}
