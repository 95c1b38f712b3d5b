//! Client configuration.
//!
//! Values come from defaults, an optional JSON file, then `FERROSCREEN_*`
//! environment variables, in that order of precedence (last wins).

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://scanner.tradingview.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 60;

const ENV_BASE_URL: &str = "FERROSCREEN_BASE_URL";
const ENV_TIMEOUT_MS: &str = "FERROSCREEN_TIMEOUT_MS";
const ENV_USER_AGENT: &str = "FERROSCREEN_USER_AGENT";
const ENV_MAX_RETRIES: &str = "FERROSCREEN_MAX_RETRIES";
const ENV_REQUESTS_PER_MINUTE: &str = "FERROSCREEN_REQUESTS_PER_MINUTE";

/// Settings for the default HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub requests_per_minute: u32,
    pub language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: format!("ferroscreen/{}", env!("CARGO_PKG_VERSION")),
            max_retries: DEFAULT_MAX_RETRIES,
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            language: String::from("en"),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env(|name| std::env::var(name).ok())
    }

    /// Reads a JSON file; missing fields keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_BASE_URL) {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidEnv {
                    name: ENV_BASE_URL,
                    value,
                });
            }
            self.base_url = value.trim().to_owned();
        }
        if let Some(value) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = parse_positive(ENV_TIMEOUT_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_USER_AGENT) {
            self.user_agent = value;
        }
        if let Some(value) = lookup(ENV_MAX_RETRIES) {
            self.max_retries = value
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_MAX_RETRIES,
                    value: value.clone(),
                })?;
        }
        if let Some(value) = lookup(ENV_REQUESTS_PER_MINUTE) {
            let parsed = parse_positive(ENV_REQUESTS_PER_MINUTE, &value)?;
            self.requests_per_minute =
                u32::try_from(parsed).map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_REQUESTS_PER_MINUTE,
                    value,
                })?;
        }
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_requests_per_minute(mut self, requests_per_minute: u32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

fn parse_positive(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: value.to_owned(),
        }),
    }
}
