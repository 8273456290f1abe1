//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path of the libSQL file holding persisted preferences.
    pub db_path: PathBuf,
    /// Upper bound on a single preference store call. `None` waits forever.
    pub store_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/lucid.db"),
            store_timeout: None,
        }
    }
}

impl AppConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// - `LUCID_DB_PATH`: preferences database file
    /// - `LUCID_STORE_TIMEOUT_MS`: per-call store timeout, `0` disables it
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let db_path = std::env::var("LUCID_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let store_timeout = match std::env::var("LUCID_STORE_TIMEOUT_MS") {
            Ok(raw) => parse_timeout_ms(&raw).unwrap_or_else(|e| {
                tracing::warn!("{}; running without a store timeout", e);
                None
            }),
            Err(_) => defaults.store_timeout,
        };

        Self {
            db_path,
            store_timeout,
        }
    }
}

/// Parse a millisecond timeout. `0` means no timeout.
pub fn parse_timeout_ms(raw: &str) -> Result<Option<Duration>, ConfigError> {
    let ms: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
        key: "LUCID_STORE_TIMEOUT_MS".to_string(),
        message: format!("{raw:?} is not a whole number of milliseconds ({e})"),
    })?;
    Ok((ms > 0).then(|| Duration::from_millis(ms)))
}
