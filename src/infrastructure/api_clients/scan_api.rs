//! Typed client for the scan backend REST API
//!
//! Every request carries the shared-secret `X-API-Key` header. Non-success
//! responses become [`BackendError::Api`] with the backend's own message
//! when it provides one; transport failures become [`BackendError::Network`].

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::application::errors::BackendError;
use crate::config::BackendConfig;
use crate::domain::scan::entities::{
    Finding, ScanResponse, ScanResult, ScanSummary, Severity,
};

/// Header carrying the shared secret expected by the backend
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Client for the scan backend REST API
pub struct ScanApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ScanApiClient {
    /// Create a new client against `base_url`
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("scanwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(BackendError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Create a client from the backend configuration section
    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Start a scan against `target`
    pub async fn start_scan(&self, target: &str) -> Result<ScanResponse, BackendError> {
        tracing::debug!(target = %target, "Starting scan");
        let response = self
            .client
            .post(self.url("/scans"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&serde_json::json!({ "target": target }))
            .send()
            .await
            .map_err(BackendError::Network)?;
        Self::read_response(response).await
    }

    /// Fetch the full state of a scan
    pub async fn get_scan(&self, scan_id: &str) -> Result<ScanResult, BackendError> {
        self.get(&format!("/scans/{scan_id}"), None).await
    }

    /// Fetch the log lines of a scan
    pub async fn get_logs(&self, scan_id: &str) -> Result<Vec<String>, BackendError> {
        self.get(&format!("/scans/{scan_id}/logs"), None).await
    }

    /// Fetch findings, optionally filtered by severity on the backend
    pub async fn get_findings(
        &self,
        scan_id: &str,
        severity: Option<Severity>,
    ) -> Result<Vec<Finding>, BackendError> {
        self.get(&format!("/scans/{scan_id}/findings"), severity).await
    }

    /// Fetch the per-severity finding counts of a scan
    pub async fn get_summary(&self, scan_id: &str) -> Result<ScanSummary, BackendError> {
        self.get(&format!("/scans/{scan_id}/summary"), None).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        severity: Option<Severity>,
    ) -> Result<T, BackendError> {
        let mut request = self
            .client
            .get(self.url(path))
            .header(API_KEY_HEADER, &self.api_key);
        if let Some(severity) = severity {
            request = request.query(&[("severity", severity.as_str())]);
        }
        let response = request.send().await.map_err(BackendError::Network)?;
        Self::read_response(response).await
    }

    async fn read_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        let body = response.text().await.map_err(BackendError::Network)?;

        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }

        serde_json::from_str(&body).map_err(BackendError::Decode)
    }
}

/// Extract the human-readable message from an error body.
///
/// Precedence: a non-empty `error` field, then a non-empty `detail` field,
/// then a generic message carrying the status code.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["error", "detail"] {
            if let Some(message) = value.get(field).and_then(|v| v.as_str()) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }
    format!("API Error: {status}")
}
