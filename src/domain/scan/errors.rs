//! Scan domain errors

/// Errors from the tracked-scan history store
///
/// Read-side failures are deliberately absent: unreadable or undecodable
/// history is treated as an empty list by the adapters, never surfaced as
/// an error.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to write scan history: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to encode scan history: {0}")]
    Encode(#[source] serde_json::Error),
}
