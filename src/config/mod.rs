//! Configuration management
//!
//! Layered configuration: `config/default.toml`, then an environment file
//! selected by `ENV`, then `config/local.toml`, then environment variables
//! with the `SCANWATCH` prefix and `__` separator (for example
//! `SCANWATCH__BACKEND__BASE_URL`). `SCANWATCH_API_KEY` is accepted as a
//! plain override for the backend key.

pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use validation::{Validate, ValidationError};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub poll: PollConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

/// Dashboard proxy server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_docs: bool,
    pub request_timeout_seconds: u64,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            enable_docs: true,
            request_timeout_seconds: 30,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Scan backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the scan backend API
    pub base_url: String,
    /// Shared secret sent as `X-API-Key`
    pub api_key: String,
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8060".to_string(),
            api_key: "secret-api-key".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Polling cadence for live views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Interval between combined fetches when following one scan
    pub detail_interval_ms: u64,
    /// Interval between status sweeps over the tracked list
    pub overview_interval_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            detail_interval_ms: 1000,
            overview_interval_ms: 2000,
        }
    }
}

/// Tracked-scan history configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Explicit history file path; defaults to the platform data directory
    pub file: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Add local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SCANWATCH").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;

        // Accept a plain SCANWATCH_API_KEY override for the backend secret
        if let Ok(api_key) = std::env::var("SCANWATCH_API_KEY") {
            config.backend.api_key = api_key;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from an explicit file, still honoring environment
    /// variable overrides
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigLoadError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()))
            .add_source(config::Environment::with_prefix("SCANWATCH").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;

        if let Ok(api_key) = std::env::var("SCANWATCH_API_KEY") {
            config.backend.api_key = api_key;
        }

        config.validate()?;

        Ok(config)
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.backend.validate()?;
        self.poll.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.base_url, "http://localhost:8060");
        assert_eq!(config.poll.detail_interval_ms, 1000);
        assert_eq!(config.poll.overview_interval_ms, 2000);
    }

    #[test]
    fn rejects_backend_url_without_scheme() {
        let mut config = Config::default();
        config.backend.base_url = "localhost:8060".to_string();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::Backend { .. })
        ));
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let mut config = Config::default();
        config.poll.detail_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ValidationError::Poll { .. })));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "yaml".to_string();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::Logging { .. })
        ));
    }

    #[test]
    fn rejects_empty_api_key() {
        let mut config = Config::default();
        config.backend.api_key = String::new();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::Backend { .. })
        ));
    }
}
