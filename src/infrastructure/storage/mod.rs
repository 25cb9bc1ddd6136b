//! Tracked-scan storage adapters

pub mod file_history;
pub mod memory_history;

pub use file_history::FileScanHistory;
pub use memory_history::InMemoryScanHistory;
