//! Thin interactive front end over the ledger core.

pub mod format;
pub mod output;
pub mod prompt;
pub mod shell;

use std::env;

use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::core::services::ServiceError;
use crate::core::{Store, SystemClock};
use crate::errors::LedgerError;
use crate::storage::{FlatFileStorage, LoadReport};

pub use prompt::{DialoguerPrompter, Prompter, ScriptPrompter};
pub use shell::Shell;

/// Set to `1` to read answers line by line from stdin instead of interactive prompts.
pub const SCRIPT_ENV: &str = "EXPENSE_LEDGER_CLI_SCRIPT";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Input(String),
    #[error("Exit requested")]
    ExitRequested,
}

/// Loads configuration and the ledger file, then runs the menu loop.
pub fn run_cli() -> Result<(), CliError> {
    let script_mode = env::var(SCRIPT_ENV)
        .map(|value| value == "1")
        .unwrap_or(false);

    let manager = ConfigManager::new()?;
    let first_run = !manager.config_path().exists();
    let config = match manager.load() {
        Ok(config) => config,
        Err(err) => {
            output::warning(format!(
                "Could not read {}: {err}. Using defaults.",
                manager.config_path().display()
            ));
            Config::default()
        }
    };
    if first_run {
        if let Err(err) = manager.save(&config) {
            tracing::warn!(
                path = %manager.config_path().display(),
                "could not write default config: {err}"
            );
        }
    }
    output::set_color(config.color && !script_mode);

    let storage = FlatFileStorage::new(manager.data_file(&config));
    let location = storage.path().display().to_string();
    let (store, outcome) = Store::open(Box::new(storage));
    report_load(&location, &store, outcome);

    let prompter: Box<dyn Prompter> = if script_mode {
        Box::new(ScriptPrompter::stdio())
    } else {
        Box::new(DialoguerPrompter::new())
    };
    Shell::new(store, prompter, Box::new(SystemClock), config).run()
}

fn report_load(location: &str, store: &Store, outcome: Result<LoadReport, LedgerError>) {
    match outcome {
        Ok(report) if report.fresh_start => {
            output::info("No existing data file found. Starting fresh.");
        }
        Ok(report) => {
            output::info(format!(
                "Loaded {} transactions from {location}",
                report.loaded
            ));
            for rejected in &report.rejected {
                output::warning(format!(
                    "Skipped line {}: {}",
                    rejected.line, rejected.reason
                ));
            }
        }
        Err(err) if err.is_io() => output::warning(format!(
            "Error reading {location}: {err}. Continuing with {} transactions.",
            store.len()
        )),
        Err(err) => output::warning(format!("Could not load {location}: {err}")),
    }
}
