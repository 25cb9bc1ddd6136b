//! Scan history repository trait

use async_trait::async_trait;

use super::entities::{TrackedScan, TrackedScanPatch};
use super::errors::HistoryError;

/// Maximum number of scans kept in history; adds beyond this drop the oldest
pub const MAX_TRACKED_SCANS: usize = 50;

/// Repository trait for locally tracked scans
///
/// Implementations with no usable storage medium must degrade to no-ops:
/// `list` returns an empty list and mutations succeed without effect.
#[async_trait]
pub trait IScanHistoryRepository: Send + Sync {
    /// All tracked scans, most recent first
    async fn list(&self) -> Result<Vec<TrackedScan>, HistoryError>;

    /// Insert a scan at the front, truncating to [`MAX_TRACKED_SCANS`]
    async fn add(&self, scan: TrackedScan) -> Result<(), HistoryError>;

    /// Merge `patch` into the scan with `id`; no-op when absent
    async fn update(&self, id: &str, patch: TrackedScanPatch) -> Result<(), HistoryError>;

    /// Remove the scan with `id`; removing an absent id is idempotent
    async fn remove(&self, id: &str) -> Result<(), HistoryError>;
}
