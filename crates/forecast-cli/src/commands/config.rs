use clap::Subcommand;
use forecast_core::generation::credentials;
use forecast_core::{Config, ConfigError};

use super::CliResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Dot-path key (e.g. "pomodoro.work_minutes")
        key: String,
    },
    /// Set a config value
    Set {
        /// Dot-path key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values as `key = value` lines
    List,
    /// Reset config to defaults
    Reset,
    /// Store the Gemini API key in the OS keyring
    ApiKey {
        /// The key (omit with --clear)
        #[arg(required_unless_present = "clear")]
        key: Option<String>,
        /// Remove the stored key
        #[arg(long)]
        clear: bool,
    },
}

pub fn run(action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for (key, value) in config.entries() {
                println!("{key} = {value}");
            }
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
        ConfigAction::ApiKey { key, clear } => {
            if clear {
                credentials::clear_api_key()?;
                println!("api key cleared");
            } else if let Some(key) = key {
                credentials::store_api_key(&key)?;
                println!("api key stored");
            }
        }
    }
    Ok(())
}
