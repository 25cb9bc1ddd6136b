//! Request and response models for the dashboard proxy

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body to start a scan
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartScanRequest {
    /// Target URL to scan
    #[schema(example = "https://example.com")]
    pub target: String,
}

/// Error body produced when the proxy itself fails to reach the backend.
/// Backend-produced errors pass through with their original body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Cannot connect to backend at http://localhost:8060. Make sure the backend server is running.")]
    pub error: String,
}

/// Health report for the proxy process itself
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    pub uptime_seconds: u64,
}
