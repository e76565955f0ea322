//! Build information endpoint
//!
//! Reports the identification baked in by build.rs.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    version: &'static str,
    git_hash: &'static str,
    build_timestamp: &'static str,
    build_profile: &'static str,
}

/// GET /build_info
pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("GIT_HASH"),
        build_timestamp: env!("BUILD_TIMESTAMP"),
        build_profile: env!("BUILD_PROFILE"),
    })
}
