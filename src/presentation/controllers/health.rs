//! Health check controller

use axum::{extract::State, response::Json};

use crate::presentation::controllers::ProxyState;
use crate::presentation::models::HealthResponse;

/// GET /health - health of the proxy process itself
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Proxy is healthy", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_check(State(state): State<ProxyState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.startup_time.elapsed().as_secs(),
    })
}
