//! Scan domain entities
//!
//! Wire schemas for the scan backend API plus the locally tracked scan
//! record. Backend responses are decoded into these types at the boundary;
//! unknown fields are ignored, optional fields default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status reported by the scan backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Started,
    Running,
    Completed,
    Failed,
}

impl ScanStatus {
    /// Terminal statuses never transition again; polling stops here
    pub fn is_terminal(self) -> bool {
        matches!(self, ScanStatus::Completed | ScanStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScanStatus::Started => "started",
            ScanStatus::Running => "running",
            ScanStatus::Completed => "completed",
            ScanStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finding severity, ordered most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single vulnerability finding reported by a scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Finding {
    /// Scanner module that produced the finding
    #[schema(example = "xss")]
    pub scanner: String,
    #[schema(example = "Reflected Cross-Site Scripting")]
    pub name: String,
    pub severity: Severity,
    /// URL where the issue was observed
    #[schema(example = "https://example.com/search?q=test")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// CWE identifier, e.g. "CWE-79"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvss: Option<f64>,
}

/// Per-severity finding counts for a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ScanSummary {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub info: u32,
}

impl ScanSummary {
    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low + self.info
    }
}

/// Full scan state as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScanResult {
    #[schema(example = "3f1c0a2e")]
    pub scan_id: String,
    pub status: ScanStatus,
    #[schema(example = "https://example.com")]
    pub target: String,
    #[serde(default)]
    pub summary: ScanSummary,
    #[serde(default)]
    pub vulnerabilities: Vec<Finding>,
    #[serde(default)]
    pub logs: Vec<String>,
}

/// Response returned when a scan is started
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScanResponse {
    #[schema(example = "3f1c0a2e")]
    pub scan_id: String,
    pub status: ScanStatus,
}

/// Locally tracked record of a started scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedScan {
    /// Backend-assigned scan id, treated as opaque
    pub id: String,
    /// Target URL as submitted
    pub target: String,
    /// When the scan was started locally
    pub started_at: DateTime<Utc>,
    /// Last status observed for this scan
    pub status: ScanStatus,
}

impl TrackedScan {
    pub fn new(id: impl Into<String>, target: impl Into<String>, status: ScanStatus) -> Self {
        Self {
            id: id.into(),
            target: target.into(),
            started_at: Utc::now(),
            status,
        }
    }

    /// Merge the fields present in `patch` into this record
    pub fn apply(&mut self, patch: &TrackedScanPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(target) = &patch.target {
            self.target = target.clone();
        }
    }
}

/// Partial update for a tracked scan; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedScanPatch {
    pub status: Option<ScanStatus>,
    pub target: Option<String>,
}

impl TrackedScanPatch {
    pub fn status(status: ScanStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
