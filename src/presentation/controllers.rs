//! Dashboard proxy controllers

pub mod health;
pub mod scans;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;

/// Shared state for the proxy handlers
#[derive(Clone)]
pub struct ProxyState {
    /// Pooled client used to reach the scan backend
    pub http: reqwest::Client,
    pub config: Arc<Config>,
    pub startup_time: Instant,
}

impl ProxyState {
    /// Build state from configuration, creating the pooled backend client
    pub fn new(config: Arc<Config>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.backend.timeout_seconds))
            .user_agent(concat!("scanwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config,
            startup_time: Instant::now(),
        })
    }

    /// Absolute backend URL for `path`
    pub fn backend_url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.config.backend.base_url.trim_end_matches('/'),
            path
        )
    }
}
