//! Infrastructure Layer - External integrations
//!
//! The typed scan-backend client and the tracked-scan storage adapters.

pub mod api_clients;
pub mod storage;

pub use api_clients::ScanApiClient;
pub use storage::{FileScanHistory, InMemoryScanHistory};
