//! HTTP route configuration for the dashboard proxy

use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::domain::scan::entities::{
    Finding, ScanResponse, ScanResult, ScanStatus, ScanSummary, Severity,
};
use crate::presentation::controllers::{
    ProxyState,
    health::health_check,
    scans::{get_findings, get_logs, get_scan, get_summary, start_scan},
};
use crate::presentation::models::{ErrorResponse, HealthResponse, StartScanRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::scans::start_scan,
        crate::presentation::controllers::scans::get_scan,
        crate::presentation::controllers::scans::get_findings,
        crate::presentation::controllers::scans::get_logs,
        crate::presentation::controllers::scans::get_summary,
        crate::presentation::controllers::health::health_check
    ),
    components(
        schemas(
            StartScanRequest,
            ErrorResponse,
            HealthResponse,
            ScanResponse,
            ScanResult,
            ScanSummary,
            Finding,
            ScanStatus,
            Severity
        )
    ),
    tags(
        (name = "scans", description = "Scan lifecycle endpoints proxied to the scan backend"),
        (name = "health", description = "Proxy process health")
    ),
    info(
        title = "Scanwatch Proxy API",
        version = "0.1.0",
        description = "Dashboard-facing proxy for a DAST scan backend. Requests are forwarded with the backend API key attached so browsers never see the secret."
    )
)]
pub struct ApiDoc;

/// Create the proxy router with its middleware stack
pub fn create_router(state: ProxyState, config: &Config) -> Router {
    // Browsers must never cache scan status
    let scan_status_route = Router::new()
        .route("/scans/{scan_id}", get(get_scan))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::CACHE_CONTROL,
            axum::http::HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ));

    let api_routes = Router::new()
        .route("/scans", post(start_scan))
        .route("/scans/{scan_id}/findings", get(get_findings))
        .route("/scans/{scan_id}/logs", get(get_logs))
        .route("/scans/{scan_id}/summary", get(get_summary))
        .merge(scan_status_route);

    let health_routes = Router::new().route("/health", get(health_check));

    let cors_layer =
        if config.server.allowed_origins.len() == 1 && config.server.allowed_origins[0] == "*" {
            CorsLayer::new()
                .allow_origin(tower_http::cors::AllowOrigin::mirror_request())
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(false)
                .max_age(Duration::from_secs(3600))
        } else {
            let mut layer = CorsLayer::new();
            for origin in &config.server.allowed_origins {
                match axum::http::HeaderValue::from_str(origin) {
                    Ok(origin_header) => {
                        layer = layer.allow_origin(origin_header);
                    }
                    Err(_) => {
                        tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                    }
                }
            }
            layer
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(false)
                .max_age(Duration::from_secs(3600))
        };

    let mut router = Router::new().nest("/api", api_routes).merge(health_routes);

    // Conditionally expose Swagger UI based on configuration (avoid leaking docs in production).
    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer)
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_seconds,
                ))),
        )
        .with_state(state)
}
