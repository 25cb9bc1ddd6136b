//! Scan domain module
//!
//! Contains the backend wire schemas, the locally tracked scan record,
//! errors, and the history repository trait.

pub mod entities;
pub mod errors;
pub mod repositories;

pub use entities::*;
pub use errors::*;
pub use repositories::*;
