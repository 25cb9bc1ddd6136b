//! Presentation Layer - Dashboard proxy HTTP API

pub mod controllers;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use controllers::ProxyState;
pub use routes::create_router;
