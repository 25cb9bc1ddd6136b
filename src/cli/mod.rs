//! Scanwatch CLI - Command-line interface for the scan backend
//!
//! This module provides the terminal client: starting scans, following them
//! live, browsing findings, and managing the local scan history. The `serve`
//! subcommand runs the dashboard proxy server from the same binary.
//!
//! ## Features
//! - Live watch: follows one scan with combined status/log/summary polling
//! - Local history: last 50 started scans, kept in the platform data dir
//! - Severity-filtered findings, rendered as table, JSON, or plain text
//! - Embedded proxy server with the same configuration surface

mod commands;
mod context;
mod output;

pub use context::CliContext;
pub use output::{OutputFormat, OutputWriter};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scanwatch - Watch DAST scans from the command line
#[derive(Parser, Debug)]
#[command(
    name = "scanwatch",
    version,
    about = "Start, watch, and review vulnerability scans",
    long_about = "Scanwatch drives a DAST scan backend from the terminal: start scans, follow \
                  them live while they run, and browse findings once they settle.\n\n\
                  The backend address and API key come from config/*.toml or SCANWATCH__* \
                  environment variables; `scanwatch serve` exposes the same backend to \
                  browsers through a key-injecting proxy."
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a scan against a target URL
    #[command(visible_alias = "s")]
    Scan(commands::scan::ScanArgs),

    /// Follow a running scan until it settles
    #[command(visible_alias = "w")]
    Watch(commands::watch::WatchArgs),

    /// List tracked scans, optionally refreshing live
    #[command(visible_alias = "ls")]
    List(commands::list::ListArgs),

    /// Show findings for a scan
    #[command(visible_alias = "f")]
    Findings(commands::findings::FindingsArgs),

    /// Remove a scan from the local history
    #[command(visible_alias = "rm")]
    Remove(commands::remove::RemoveArgs),

    /// Run the dashboard proxy server
    Serve(commands::serve::ServeArgs),
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
    context: CliContext,
}

impl CliApp {
    /// Create a new CLI application instance
    pub async fn new() -> anyhow::Result<Self> {
        let cli = Cli::parse();
        let context = CliContext::new(&cli).await?;

        // Tracing goes to stderr; --verbose and --quiet override the
        // configured level
        let mut logging = context.config.logging.clone();
        if cli.verbose {
            logging.level = "debug".to_string();
        } else if cli.quiet {
            logging.level = "warn".to_string();
        }
        crate::logging::init_tracing(&logging)?;

        Ok(Self { cli, context })
    }

    /// Run the CLI application
    pub async fn run(self) -> anyhow::Result<i32> {
        let exit_code = match self.cli.command {
            Commands::Scan(ref args) => commands::scan::run(&self.context, &self.cli, args).await,
            Commands::Watch(ref args) => commands::watch::run(&self.context, &self.cli, args).await,
            Commands::List(ref args) => commands::list::run(&self.context, &self.cli, args).await,
            Commands::Findings(ref args) => {
                commands::findings::run(&self.context, &self.cli, args).await
            }
            Commands::Remove(ref args) => {
                commands::remove::run(&self.context, &self.cli, args).await
            }
            Commands::Serve(ref args) => commands::serve::run(&self.context, &self.cli, args).await,
        }?;

        Ok(exit_code)
    }
}

/// Exit codes for CI integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// A watched scan finished with status "failed"
    pub const SCAN_FAILED: i32 = 1;
    /// Configuration or input error
    pub const INPUT_ERROR: i32 = 2;
    /// Could not reach the backend
    pub const NETWORK_ERROR: i32 = 3;
    /// Backend rejected the request
    pub const BACKEND_ERROR: i32 = 4;
    /// Internal error
    pub const INTERNAL_ERROR: i32 = 99;
}
