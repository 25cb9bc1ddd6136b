//! CLI Context - Shared services for CLI commands
//!
//! Commands share one backend client, one history store, and one output
//! writer, all wired from configuration once at startup.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::cli::output::OutputWriter;
use crate::config::Config;
use crate::domain::scan::repositories::IScanHistoryRepository;
use crate::infrastructure::api_clients::ScanApiClient;
use crate::infrastructure::storage::FileScanHistory;

/// Shared context for CLI commands
pub struct CliContext {
    /// Application configuration
    pub config: Arc<Config>,

    /// Client for the scan backend API
    pub client: Arc<ScanApiClient>,

    /// Local history of started scans
    pub history: Arc<dyn IScanHistoryRepository>,

    /// Output writer configured from CLI flags
    pub output: OutputWriter,
}

impl CliContext {
    /// Create a new CLI context from parsed CLI arguments
    pub async fn new(cli: &Cli) -> Result<Self> {
        let config = Self::load_config(cli.config.as_ref())?;
        let config = Arc::new(config);

        let client = ScanApiClient::from_config(&config.backend)
            .context("Failed to initialize backend client")?;
        let client = Arc::new(client);

        let history: Arc<dyn IScanHistoryRepository> = match &config.history.file {
            Some(path) => Arc::new(FileScanHistory::with_path(path.clone())),
            None => Arc::new(FileScanHistory::new()),
        };

        let output = OutputWriter::new(cli.format, cli.quiet, cli.verbose);

        Ok(Self {
            config,
            client,
            history,
            output,
        })
    }

    /// Load configuration from file or defaults
    ///
    /// Without an explicit path the CLI must work with zero configuration,
    /// so load failures fall back to defaults. An explicit --config that
    /// fails to load is an error the user asked to hear about.
    fn load_config(config_path: Option<&PathBuf>) -> Result<Config> {
        match config_path {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display())),
            None => Ok(Config::load().unwrap_or_else(|e| {
                tracing::debug!("No usable config found, using defaults: {}", e);
                Config::default()
            })),
        }
    }
}
