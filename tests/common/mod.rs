//! Common test utilities for scanwatch integration tests

pub mod fixtures;

pub use fixtures::*;
