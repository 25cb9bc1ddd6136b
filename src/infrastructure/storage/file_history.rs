//! File-backed scan history
//!
//! Persists tracked scans as pretty-printed JSON under the platform data
//! directory. The file is read in full on every operation; history is
//! capped at [`MAX_TRACKED_SCANS`] entries so this stays cheap.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use directories::ProjectDirs;

use crate::domain::scan::entities::{TrackedScan, TrackedScanPatch};
use crate::domain::scan::errors::HistoryError;
use crate::domain::scan::repositories::{IScanHistoryRepository, MAX_TRACKED_SCANS};

const HISTORY_FILE_NAME: &str = "scans.json";

/// Tracked-scan history stored on disk
///
/// When no data directory can be resolved or created the adapter runs
/// disabled: `list` returns an empty list and mutations succeed without
/// effect.
pub struct FileScanHistory {
    path: Option<PathBuf>,
}

impl FileScanHistory {
    /// History at the default location under the platform data directory
    pub fn new() -> Self {
        Self {
            path: default_history_path(),
        }
    }

    /// History at an explicit file path
    pub fn with_path(path: PathBuf) -> Self {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(
                    path = %parent.display(),
                    error = %e,
                    "Failed to create history directory; scan history disabled"
                );
                return Self { path: None };
            }
        }
        Self { path: Some(path) }
    }

    fn load(&self) -> Vec<TrackedScan> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        if !path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read history file, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(scans) => scans,
            Err(e) => {
                tracing::warn!("History file corrupted, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    fn persist(&self, scans: &[TrackedScan]) -> Result<(), HistoryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(scans).map_err(HistoryError::Encode)?;
        fs::write(path, content).map_err(HistoryError::Write)
    }
}

impl Default for FileScanHistory {
    fn default() -> Self {
        Self::new()
    }
}

fn default_history_path() -> Option<PathBuf> {
    let Some(dirs) = ProjectDirs::from("dev", "scanwatch", "scanwatch") else {
        tracing::warn!("No platform data directory available; scan history disabled");
        return None;
    };

    let data_dir = dirs.data_dir();
    if let Err(e) = fs::create_dir_all(data_dir) {
        tracing::warn!(
            path = %data_dir.display(),
            error = %e,
            "Failed to create data directory; scan history disabled"
        );
        return None;
    }

    Some(data_dir.join(HISTORY_FILE_NAME))
}

#[async_trait]
impl IScanHistoryRepository for FileScanHistory {
    async fn list(&self) -> Result<Vec<TrackedScan>, HistoryError> {
        Ok(self.load())
    }

    async fn add(&self, scan: TrackedScan) -> Result<(), HistoryError> {
        let mut scans = self.load();
        scans.insert(0, scan);
        scans.truncate(MAX_TRACKED_SCANS);
        self.persist(&scans)
    }

    async fn update(&self, id: &str, patch: TrackedScanPatch) -> Result<(), HistoryError> {
        let mut scans = self.load();
        let Some(scan) = scans.iter_mut().find(|s| s.id == id) else {
            return Ok(());
        };
        scan.apply(&patch);
        self.persist(&scans)
    }

    async fn remove(&self, id: &str) -> Result<(), HistoryError> {
        let mut scans = self.load();
        scans.retain(|s| s.id != id);
        self.persist(&scans)
    }
}
