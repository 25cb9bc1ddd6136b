//! Configuration validation module

use crate::config::{BackendConfig, LoggingConfig, PollConfig, ServerConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("Backend configuration error: {message}")]
    Backend { message: String },

    #[error("Poll configuration error: {message}")]
    Poll { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn poll(message: impl Into<String>) -> Self {
        Self::Poll {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // u16 cannot exceed 65535, so only 0 is out of range
        if self.port == 0 {
            return Err(ValidationError::server(format!(
                "Port must be in range 1-65535, got {}",
                self.port
            )));
        }

        if self.host.is_empty() {
            return Err(ValidationError::server("Host cannot be empty".to_string()));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "Request timeout must be greater than 0 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

impl Validate for BackendConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::backend(format!(
                "Base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if self.api_key.is_empty() {
            return Err(ValidationError::backend(
                "API key cannot be empty".to_string(),
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(ValidationError::backend(
                "Request timeout must be greater than 0 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

impl Validate for PollConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.detail_interval_ms == 0 {
            return Err(ValidationError::poll(
                "Detail poll interval must be greater than 0 ms".to_string(),
            ));
        }

        if self.overview_interval_ms == 0 {
            return Err(ValidationError::poll(
                "Overview poll interval must be greater than 0 ms".to_string(),
            ));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.level.is_empty() {
            return Err(ValidationError::logging(
                "Log level cannot be empty".to_string(),
            ));
        }

        match self.format.as_str() {
            "pretty" | "json" | "compact" => Ok(()),
            other => Err(ValidationError::logging(format!(
                "Unknown log format '{}', expected pretty, json, or compact",
                other
            ))),
        }
    }
}
