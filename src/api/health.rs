//! Health check endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response: status, module name and version
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    module: &'static str,
    version: &'static str,
}

/// GET /health
///
/// Liveness probe for monitoring; answers as soon as the router is up.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: "repertorio",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
