//! Application error types

/// Errors from talking to the scan backend
///
/// The three variants are deliberately distinguishable: an HTTP error
/// carries whatever message the backend chose to send, a transport failure
/// renders a fixed connectivity hint, and a schema mismatch points at the
/// payload rather than the network.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Backend answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Request never produced an HTTP response (connect, DNS, timeout)
    #[error("Network error. Please check your connection.")]
    Network(#[source] reqwest::Error),

    /// Success response whose body does not match the expected schema
    #[error("Unexpected response from backend: {0}")]
    Decode(#[source] serde_json::Error),
}

impl BackendError {
    pub fn is_network(&self) -> bool {
        matches!(self, BackendError::Network(_))
    }

    /// HTTP status for Api errors, None otherwise
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
