//! In-memory scan history
//!
//! Same contract as the file adapter without touching disk. Used by tests
//! and anywhere an ephemeral view is enough.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::scan::entities::{TrackedScan, TrackedScanPatch};
use crate::domain::scan::errors::HistoryError;
use crate::domain::scan::repositories::{IScanHistoryRepository, MAX_TRACKED_SCANS};

#[derive(Default)]
pub struct InMemoryScanHistory {
    scans: RwLock<Vec<TrackedScan>>,
}

impl InMemoryScanHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `scans` already tracked, most recent first
    pub fn with_scans(scans: Vec<TrackedScan>) -> Self {
        Self {
            scans: RwLock::new(scans),
        }
    }
}

#[async_trait]
impl IScanHistoryRepository for InMemoryScanHistory {
    async fn list(&self) -> Result<Vec<TrackedScan>, HistoryError> {
        let scans = self.scans.read().unwrap_or_else(|e| e.into_inner());
        Ok(scans.clone())
    }

    async fn add(&self, scan: TrackedScan) -> Result<(), HistoryError> {
        let mut scans = self.scans.write().unwrap_or_else(|e| e.into_inner());
        scans.insert(0, scan);
        scans.truncate(MAX_TRACKED_SCANS);
        Ok(())
    }

    async fn update(&self, id: &str, patch: TrackedScanPatch) -> Result<(), HistoryError> {
        let mut scans = self.scans.write().unwrap_or_else(|e| e.into_inner());
        if let Some(scan) = scans.iter_mut().find(|s| s.id == id) {
            scan.apply(&patch);
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), HistoryError> {
        let mut scans = self.scans.write().unwrap_or_else(|e| e.into_inner());
        scans.retain(|s| s.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scan::entities::ScanStatus;

    #[tokio::test]
    async fn behaves_like_the_file_adapter() {
        let history = InMemoryScanHistory::new();

        for i in 0..55 {
            history
                .add(TrackedScan::new(
                    format!("scan-{i}"),
                    "https://example.com",
                    ScanStatus::Started,
                ))
                .await
                .unwrap();
        }

        let scans = history.list().await.unwrap();
        assert_eq!(scans.len(), MAX_TRACKED_SCANS);
        assert_eq!(scans[0].id, "scan-54");

        history
            .update("scan-54", TrackedScanPatch::status(ScanStatus::Completed))
            .await
            .unwrap();
        assert_eq!(
            history.list().await.unwrap()[0].status,
            ScanStatus::Completed
        );

        history.remove("scan-54").await.unwrap();
        history.remove("scan-54").await.unwrap();
        assert_eq!(history.list().await.unwrap().len(), MAX_TRACKED_SCANS - 1);
    }
}
