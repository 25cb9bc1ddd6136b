//! Application setup and wiring

use std::sync::Arc;

use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::presentation::controllers::ProxyState;
use crate::presentation::routes::create_router;

/// Handle returned from create_app for graceful shutdown coordination
pub struct AppHandle {
    pub router: Router,
    pub shutdown_token: CancellationToken,
}

/// Create the proxy router and return an AppHandle for shutdown coordination
pub async fn create_app(
    config: Config,
) -> Result<AppHandle, Box<dyn std::error::Error + Send + Sync>> {
    let config_arc = Arc::new(config);
    let shutdown_token = CancellationToken::new();

    let state = ProxyState::new(config_arc.clone())?;
    let router = create_router(state, &config_arc);

    Ok(AppHandle {
        router,
        shutdown_token,
    })
}
