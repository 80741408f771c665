//! Configuration loading for the Verdant client.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default bound on a single network attempt.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the dashboard API.
    pub base_url: String,
    /// Bound on a single network attempt, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or VERDANT_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl ClientConfig {
    /// Build a config directly, for callers that do not load from a file.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// The request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("VERDANT_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_base_url() {
        let config = ClientConfig::new("   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ClientConfig::new("http://localhost:8080").with_timeout_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn timeout_defaults_to_five_seconds() {
        let config = ClientConfig::new("http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_millis(5_000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_toml_with_defaulted_timeout() {
        let config: ClientConfig = toml::from_str(r#"base_url = "http://api.example""#).unwrap();
        assert_eq!(config.request_timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed: Result<ClientConfig, _> =
            toml::from_str("base_url = \"http://api.example\"\nunknown = 1\n");
        assert!(parsed.is_err());
    }
}
