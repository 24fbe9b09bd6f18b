//! Core error types for forecast-core.
//!
//! Every failure in the library degrades to one of these variants; none of
//! them is fatal to the host process.

use std::path::PathBuf;
use thiserror::Error;

use crate::battle::BattlePhase;

/// Core error type for forecast-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Content generation errors
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Battle simulator errors
    #[error("Battle error: {0}")]
    Battle(#[from] BattleError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable at {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A stored value exists but is not valid JSON for its collection
    #[error("Stored value under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the content-generation and chat collaborators.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No API key in the environment or keyring
    #[error("No Gemini API key configured (set FORECAST_GEMINI_API_KEY)")]
    MissingApiKey,

    /// Transport failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configured endpoint does not form a valid request URL
    #[error("Invalid Gemini endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },

    /// Non-success HTTP status
    #[error("Gemini API error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    /// Response carried no candidate text
    #[error("Gemini API returned no text")]
    EmptyResponse,

    /// Response text is not a valid plan
    #[error("Malformed generated content: {0}")]
    Malformed(String),

    /// A later request replaced this one before it resolved
    #[error("Request superseded by a newer generation request")]
    Superseded,
}

/// Errors from battle transitions invoked in the wrong phase.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("Operation '{operation}' is not allowed during the {phase:?} phase")]
    WrongPhase {
        operation: &'static str,
        phase: BattlePhase,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Nothing with this id exists
    #[error("No {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
