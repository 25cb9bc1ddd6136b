//! Serve Command - Run the dashboard proxy server

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Args;
use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;

use crate::app::create_app;
use crate::cli::Cli;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::config::Config;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address, overriding server.host from configuration
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overriding server.port from configuration
    #[arg(long, short)]
    pub port: Option<u16>,
}

/// Run the serve command
pub async fn run(ctx: &CliContext, _cli: &Cli, args: &ServeArgs) -> Result<i32> {
    let config = apply_overrides(ctx.config.as_ref().clone(), args);

    let server_host = config.server.host.clone();
    let server_port = config.server.port;
    let enable_docs = config.server.enable_docs;
    let backend_url = config.backend.base_url.clone();

    let app_handle = create_app(config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create application: {}", e))?;

    let addr = SocketAddr::new(
        server_host.parse().context("Invalid server host")?,
        server_port,
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Dashboard proxy listening on {}", addr);
    ctx.output
        .info(&format!("Dashboard proxy listening on http://{addr}"));
    ctx.output
        .info(&format!("Forwarding /api requests to {backend_url}"));
    if enable_docs {
        ctx.output
            .info(&format!("API documentation available at http://{addr}/docs"));
    }

    axum::serve(listener, app_handle.router)
        .with_graceful_shutdown(shutdown_signal(app_handle.shutdown_token))
        .await
        .context("Proxy server error")?;

    tracing::info!("Server shutdown complete");
    Ok(exit_codes::SUCCESS)
}

/// Apply --host/--port overrides on top of the configured bind address
fn apply_overrides(mut config: Config, args: &ServeArgs) -> Config {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config
}

/// Handle graceful shutdown signals and cancel in-flight work
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }

    shutdown_token.cancel();
}
