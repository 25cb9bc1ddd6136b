//! Scanwatch - CLI client and dashboard proxy for a DAST scan backend
//!
//! The backend exposes scan orchestration over HTTP behind an `X-API-Key`
//! secret. Scanwatch wraps it twice: a terminal client that starts and
//! follows scans, and a proxy server that lets browser dashboards reach
//! the same API without ever seeing the key.
//!
//! # Modules
//!
//! - [`config`] — Strongly-typed configuration with TOML and environment variable support
//! - [`domain`] — Scan entities, statuses, and the history repository port
//! - [`application`] — Backend error model and the live polling workers
//! - [`infrastructure`] — Backend API client and history storage adapters
//! - [`presentation`] — Axum proxy routes, handlers, and OpenAPI docs
//! - [`cli`] — Command-line interface built on the layers above
//! - [`logging`] — Structured logging with tracing
//!
//! # Usage
//!
//! ```rust,ignore
//! use scanwatch::{Config, create_app};
//!
//! let config = Config::load()?;
//! let app = create_app(config).await?;
//! ```

pub mod app;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use app::{AppHandle, create_app};
pub use config::Config;
pub use logging::init_tracing;
