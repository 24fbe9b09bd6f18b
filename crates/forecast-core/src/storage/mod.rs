pub mod collections;
mod config;
pub mod database;
mod migrations;

pub use collections::{
    load_snapshot, save_snapshot, EventStore, Identified, JsonCollection, PlanStore, CALENDAR_KEY,
    PLANS_KEY,
};
pub use config::{BattleConfig, Config, GenerationConfig};
pub use database::{Database, KeyValueStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Overrides the data directory entirely.
pub const HOME_ENV: &str = "FORECAST_HOME";
/// `dev` selects the development data directory.
pub const ENV_ENV: &str = "FORECAST_ENV";

/// Returns `$FORECAST_HOME`, or `~/.config/force-forecast[-dev]/` based on
/// FORECAST_ENV. The directory is created if missing.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var(ENV_ENV).unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("force-forecast-dev")
            } else {
                base_dir.join("force-forecast")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
