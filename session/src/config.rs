//! Console configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::refresh::DEFAULT_REFRESH_INTERVAL;
use crate::store::DEFAULT_STORAGE_KEY;

pub const API_BASE_URL_VAR: &str = "CONSOLE_API_BASE_URL";
pub const REFRESH_INTERVAL_VAR: &str = "CONSOLE_REFRESH_INTERVAL_SECS";
pub const STORAGE_KEY_VAR: &str = "CONSOLE_STORAGE_KEY";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Prefix for every API path; empty means same origin.
    pub api_base_url: String,
    pub refresh_interval: Duration,
    /// Durable-storage key the session snapshot lives under.
    pub storage_key: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
        }
    }
}

impl ConsoleConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `CONSOLE_API_BASE_URL`: default empty (same origin)
    /// - `CONSOLE_REFRESH_INTERVAL_SECS`: default 300; zero or unparsable falls back
    /// - `CONSOLE_STORAGE_KEY`: default `auth-storage`
    #[must_use]
    pub fn from_env() -> Self {
        Self::default()
            .with_api_base_url(std::env::var(API_BASE_URL_VAR).ok().as_deref())
            .with_refresh_interval_secs(std::env::var(REFRESH_INTERVAL_VAR).ok().as_deref())
            .with_storage_key(std::env::var(STORAGE_KEY_VAR).ok().as_deref())
    }

    /// Override the base URL; `None` keeps the current value.
    #[must_use]
    pub fn with_api_base_url(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw {
            self.api_base_url = raw.trim().trim_end_matches('/').to_owned();
        }
        self
    }

    /// Override the interval from a seconds string; invalid values are ignored.
    #[must_use]
    pub fn with_refresh_interval_secs(mut self, raw: Option<&str>) -> Self {
        if let Some(secs) = raw.and_then(|v| v.trim().parse::<u64>().ok()).filter(|secs| *secs > 0) {
            self.refresh_interval = Duration::from_secs(secs);
        }
        self
    }

    #[must_use]
    pub fn with_storage_key(mut self, raw: Option<&str>) -> Self {
        if let Some(key) = raw.map(str::trim).filter(|k| !k.is_empty()) {
            self.storage_key = key.to_owned();
        }
        self
    }
}
