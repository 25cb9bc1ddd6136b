//! Test data fixtures for scanwatch

use std::sync::Arc;
use std::time::Duration;

use scanwatch::domain::scan::entities::{ScanStatus, TrackedScan};
use scanwatch::infrastructure::api_clients::ScanApiClient;

/// API key every fixture client sends and every mock expects
pub const TEST_API_KEY: &str = "test-key";

/// Create a client against a mock server URL
pub fn test_client(base_url: &str) -> Arc<ScanApiClient> {
    Arc::new(
        ScanApiClient::new(
            base_url.to_string(),
            TEST_API_KEY.to_string(),
            Duration::from_secs(5),
        )
        .expect("client builds"),
    )
}

/// Create a tracked scan with default values
pub fn tracked_scan(id: impl Into<String>, status: ScanStatus) -> TrackedScan {
    TrackedScan::new(id, "https://example.com", status)
}

/// Scan state body as the backend reports it
pub fn scan_result_body(scan_id: &str, status: &str) -> String {
    serde_json::json!({
        "scan_id": scan_id,
        "status": status,
        "target": "https://example.com",
        "summary": { "critical": 0, "high": 1, "medium": 0, "low": 0, "info": 2 },
        "vulnerabilities": [{
            "scanner": "xss",
            "name": "Reflected XSS",
            "severity": "high",
            "url": "https://example.com/search",
            "cwe": "CWE-79"
        }],
        "logs": ["scan queued", "crawler started"]
    })
    .to_string()
}

/// Log lines body
pub fn logs_body(lines: &[&str]) -> String {
    serde_json::to_string(lines).expect("serializes")
}

/// Per-severity counts body
pub fn summary_body() -> String {
    r#"{"critical": 0, "high": 1, "medium": 0, "low": 0, "info": 2}"#.to_string()
}
