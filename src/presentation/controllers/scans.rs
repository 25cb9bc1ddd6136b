//! Scan proxy handlers
//!
//! Thin pass-through handlers: the backend's response status and JSON body
//! are propagated unchanged, success and error alike. The proxy adds the
//! backend API key and answers 500 itself only when the backend cannot be
//! reached at all.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::scan::entities::{Finding, ScanResponse, ScanResult, ScanSummary};
use crate::infrastructure::api_clients::API_KEY_HEADER;
use crate::presentation::controllers::ProxyState;
use crate::presentation::models::{ErrorResponse, StartScanRequest};

/// Severity filter, forwarded to the backend untouched
#[derive(Debug, Deserialize, IntoParams)]
pub struct FindingsQuery {
    pub severity: Option<String>,
}

/// POST /api/scans - start a scan
#[utoipa::path(
    post,
    path = "/api/scans",
    request_body = StartScanRequest,
    responses(
        (status = 200, description = "Scan started by the backend", body = ScanResponse),
        (status = 500, description = "Backend unreachable", body = ErrorResponse)
    ),
    tag = "scans"
)]
pub async fn start_scan(
    State(state): State<ProxyState>,
    Json(request): Json<StartScanRequest>,
) -> Response {
    tracing::info!(target = %request.target, "Proxying scan start");
    let upstream = state.http.post(state.backend_url("/scans")).json(&request);
    forward(&state, upstream).await
}

/// GET /api/scans/{scan_id} - full scan state
#[utoipa::path(
    get,
    path = "/api/scans/{scan_id}",
    params(("scan_id" = String, Path, description = "Backend scan id")),
    responses(
        (status = 200, description = "Current scan state", body = ScanResult),
        (status = 500, description = "Backend unreachable", body = ErrorResponse)
    ),
    tag = "scans"
)]
pub async fn get_scan(State(state): State<ProxyState>, Path(scan_id): Path<String>) -> Response {
    tracing::debug!(scan_id = %scan_id, "Proxying scan status");
    let upstream = state.http.get(state.backend_url(&format!("/scans/{scan_id}")));
    forward(&state, upstream).await
}

/// GET /api/scans/{scan_id}/findings - findings, optionally filtered
#[utoipa::path(
    get,
    path = "/api/scans/{scan_id}/findings",
    params(("scan_id" = String, Path, description = "Backend scan id"), FindingsQuery),
    responses(
        (status = 200, description = "Findings for the scan", body = Vec<Finding>),
        (status = 500, description = "Backend unreachable", body = ErrorResponse)
    ),
    tag = "scans"
)]
pub async fn get_findings(
    State(state): State<ProxyState>,
    Path(scan_id): Path<String>,
    Query(query): Query<FindingsQuery>,
) -> Response {
    tracing::debug!(scan_id = %scan_id, severity = ?query.severity, "Proxying findings");
    let mut upstream = state
        .http
        .get(state.backend_url(&format!("/scans/{scan_id}/findings")));
    if let Some(severity) = &query.severity {
        upstream = upstream.query(&[("severity", severity)]);
    }
    forward(&state, upstream).await
}

/// GET /api/scans/{scan_id}/logs - log lines
#[utoipa::path(
    get,
    path = "/api/scans/{scan_id}/logs",
    params(("scan_id" = String, Path, description = "Backend scan id")),
    responses(
        (status = 200, description = "Log lines for the scan", body = Vec<String>),
        (status = 500, description = "Backend unreachable", body = ErrorResponse)
    ),
    tag = "scans"
)]
pub async fn get_logs(State(state): State<ProxyState>, Path(scan_id): Path<String>) -> Response {
    tracing::debug!(scan_id = %scan_id, "Proxying scan logs");
    let upstream = state
        .http
        .get(state.backend_url(&format!("/scans/{scan_id}/logs")));
    forward(&state, upstream).await
}

/// GET /api/scans/{scan_id}/summary - per-severity counts
#[utoipa::path(
    get,
    path = "/api/scans/{scan_id}/summary",
    params(("scan_id" = String, Path, description = "Backend scan id")),
    responses(
        (status = 200, description = "Per-severity finding counts", body = ScanSummary),
        (status = 500, description = "Backend unreachable", body = ErrorResponse)
    ),
    tag = "scans"
)]
pub async fn get_summary(State(state): State<ProxyState>, Path(scan_id): Path<String>) -> Response {
    tracing::debug!(scan_id = %scan_id, "Proxying scan summary");
    let upstream = state
        .http
        .get(state.backend_url(&format!("/scans/{scan_id}/summary")));
    forward(&state, upstream).await
}

/// Send the prepared request with the API key attached and propagate the
/// backend's status and body unchanged.
async fn forward(state: &ProxyState, upstream: reqwest::RequestBuilder) -> Response {
    let request = upstream.header(API_KEY_HEADER, &state.config.backend.api_key);

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return backend_unreachable(state, e),
    };

    let status = response.status().as_u16();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => return backend_unreachable(state, e),
    };

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

fn backend_unreachable(state: &ProxyState, error: reqwest::Error) -> Response {
    let base_url = &state.config.backend.base_url;
    let message = if error.is_connect() {
        format!("Cannot connect to backend at {base_url}. Make sure the backend server is running.")
    } else {
        error.to_string()
    };
    tracing::error!(error = %error, "Request to scan backend failed");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}
