//! repertorio library - song repertoire CRUD service
//!
//! A small axum service exposing create/read/update/delete over a single
//! collection of songs, persisted wholesale as a pretty-printed JSON file.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod error;
pub mod store;

pub use error::{Error, Result};

use store::RepertoireStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Owning handle to the repertoire store
    pub store: Arc<RepertoireStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: RepertoireStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build application router
///
/// All responses carry permissive CORS headers for browser clients on
/// other origins.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post, put};

    Router::new()
        // Repertoire page (HTML serving)
        .route("/", get(api::serve_index))
        // Song CRUD
        .route("/canciones", get(api::list_songs))
        .route("/canciones", post(api::create_song))
        .route("/canciones/:id", put(api::update_song))
        .route("/canciones/:id", delete(api::delete_song))
        // Build information
        .route("/build_info", get(api::get_build_info))
        // Health endpoint
        .merge(api::health_routes())
        .with_state(state)
        // Enable CORS for cross-origin access
        .layer(CorsLayer::permissive())
}
