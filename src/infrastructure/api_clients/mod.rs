//! Scan backend API client

pub mod scan_api;

pub use scan_api::{API_KEY_HEADER, ScanApiClient};
