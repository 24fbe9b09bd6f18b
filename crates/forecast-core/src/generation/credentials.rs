//! Gemini API key lookup: environment first, then the OS keyring.

use tracing::warn;

use crate::error::GenerationError;

pub const API_KEY_ENV: &str = "FORECAST_GEMINI_API_KEY";
const SERVICE: &str = "force-forecast";
const API_KEY_ENTRY: &str = "gemini_api_key";

/// # Errors
/// `MissingApiKey` when neither source has a non-empty key. Keyring failures
/// are logged and treated as absent.
pub fn api_key() -> Result<String, GenerationError> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok(key);
        }
    }
    match keyring_get() {
        Ok(Some(key)) if !key.trim().is_empty() => Ok(key),
        Ok(_) => Err(GenerationError::MissingApiKey),
        Err(e) => {
            warn!(error = %e, "keyring lookup failed");
            Err(GenerationError::MissingApiKey)
        }
    }
}

pub fn store_api_key(key: &str) -> Result<(), keyring::Error> {
    let entry = keyring::Entry::new(SERVICE, API_KEY_ENTRY)?;
    entry.set_password(key)
}

pub fn clear_api_key() -> Result<(), keyring::Error> {
    let entry = keyring::Entry::new(SERVICE, API_KEY_ENTRY)?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e),
    }
}

fn keyring_get() -> Result<Option<String>, keyring::Error> {
    let entry = keyring::Entry::new(SERVICE, API_KEY_ENTRY)?;
    match entry.get_password() {
        Ok(pw) => Ok(Some(pw)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e),
    }
}
