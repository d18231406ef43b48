//! Command-line surface
//!
//! ```bash
//! # Create notes for the ten most recent workouts
//! hevy-notes sync
//!
//! # Convert one workout picked from `hevy-notes list`
//! hevy-notes convert 0b4e...
//!
//! # Reports
//! hevy-notes weekly
//! hevy-notes monthly
//! hevy-notes stats "Bench Press"
//! ```

use crate::commands::{exercises, reports, sync, AppState};
use crate::settings::{Settings, SettingsError, DEFAULT_SETTINGS_FILE};
use crate::units::WeightUnit;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
  name = "hevy-notes",
  about = "Sync Hevy workouts into markdown notes",
  long_about = "Turns Hevy workouts into markdown notes with estimated 1RM metadata, and builds weekly volume and monthly PR reports from them."
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,

  /// Settings file (JSON)
  #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
  pub config: PathBuf,

  /// Vault root directory override
  #[arg(long, global = true)]
  pub vault: Option<PathBuf>,

  /// Workout folder inside the vault override
  #[arg(long, global = true)]
  pub folder: Option<String>,

  /// Display unit override (kg or lbs)
  #[arg(long, global = true)]
  pub unit: Option<WeightUnit>,

  /// Enable debug logging
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Create notes for recent workouts that have none yet
  Sync {
    /// Number of recent workouts to fetch (defaults to the configured limit)
    #[arg(long)]
    limit: Option<u32>,
  },

  /// Create or refresh the note for one workout
  Convert {
    /// Hevy workout id
    id: String,
  },

  /// List recent workouts with their ids
  List,

  /// Write reports for weeks that have none
  Weekly,

  /// Regenerate the monthly PR reviews
  Monthly,

  /// List exercise names found in the notes
  Exercises,

  /// Create the stats page for an exercise
  Stats {
    /// Exercise name as it appears in the notes
    exercise: String,
  },

  /// Print the 1RM trend of an exercise
  Trend {
    /// Exercise name as it appears in the notes
    exercise: String,
  },

  /// Show the effective settings, optionally writing them to the settings file
  Config {
    #[arg(long)]
    save: bool,
  },
}

impl Cli {
  /// Settings file and environment, then command-line overrides
  pub fn settings(&self) -> Result<Settings, SettingsError> {
    let mut settings = Settings::load(Some(&self.config))?;
    if let Some(vault) = &self.vault {
      settings.vault_dir = vault.clone();
    }
    if let Some(folder) = &self.folder {
      settings.folder_path = folder.clone();
    }
    if let Some(unit) = self.unit {
      settings.weight_unit = unit;
    }
    Ok(settings)
  }
}

/// Run one command and return the notice to show the user
pub async fn dispatch(cli: &Cli, state: &AppState) -> Result<String, String> {
  match &cli.command {
    Command::Sync { limit } => sync::sync_workouts(state, *limit).await,
    Command::Convert { id } => sync::convert_workout(state, id).await,
    Command::List => sync::list_workouts(state).await.map(|l| sync::render_listing(&l)),
    Command::Weekly => reports::generate_weekly_reports(state).await,
    Command::Monthly => reports::generate_monthly_review(state).await,
    Command::Exercises => exercises::list_exercises(state).await,
    Command::Stats { exercise } => exercises::generate_exercise_stats(state, exercise).await,
    Command::Trend { exercise } => exercises::exercise_trend(state, exercise).await,
    Command::Config { save } => show_settings(cli, &state.settings, *save),
  }
}

fn show_settings(cli: &Cli, settings: &Settings, save: bool) -> Result<String, String> {
  let mut shown = settings.clone();
  if !shown.api_key.is_empty() {
    shown.api_key = "********".to_string();
  }
  let mut out = serde_json::to_string_pretty(&shown).map_err(|e| format!("Failed to render settings: {}", e))?;

  if save {
    settings
      .save(&cli.config)
      .map_err(|e| format!("Failed to save settings: {}", e))?;
    out.push_str(&format!("\nSaved to {}", cli.config.display()));
  }
  Ok(out)
}
