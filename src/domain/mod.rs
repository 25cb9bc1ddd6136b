//! Domain Layer - Core types of the scan-tracking client
//!
//! Contains the wire schemas shared with the scan backend, the locally
//! tracked scan record, and the history repository port.

pub mod scan;

pub use scan::*;
