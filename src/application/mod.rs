//! Application Layer - Use cases built on the domain and infrastructure
//!
//! Holds the backend error taxonomy and the polling controllers that drive
//! live scan views.

pub mod errors;
pub mod polling;

pub use errors::BackendError;
pub use polling::{
    OverviewEvent, PollEvent, PollerHandle, ScanSnapshot, spawn_detail_poller,
    spawn_overview_poller,
};
