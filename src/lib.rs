pub mod cli;
pub mod codec;
pub mod commands;
pub mod hevy;
pub mod models;
pub mod reports;
pub mod settings;
pub mod store;
pub mod sync;
pub mod units;

#[cfg(test)]
mod test_utils;

use clap::Parser;
use cli::Cli;
use commands::AppState;
use std::process::ExitCode;

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

pub fn run() -> ExitCode {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let cli = Cli::parse();
  init_logging(cli.verbose);

  let settings = match cli.settings() {
    Ok(settings) => settings,
    Err(e) => {
      eprintln!("Failed to load settings: {}", e);
      return ExitCode::FAILURE;
    }
  };

  let state = match AppState::open(settings) {
    Ok(state) => state,
    Err(e) => {
      eprintln!("{}", e);
      return ExitCode::FAILURE;
    }
  };

  let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
    Ok(runtime) => runtime,
    Err(e) => {
      eprintln!("Failed to start async runtime: {}", e);
      return ExitCode::FAILURE;
    }
  };

  match runtime.block_on(cli::dispatch(&cli, &state)) {
    Ok(notice) => {
      println!("{}", notice);
      ExitCode::SUCCESS
    }
    Err(e) => {
      eprintln!("{}", e);
      ExitCode::FAILURE
    }
  }
}
