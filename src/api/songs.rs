//! Song CRUD handlers
//!
//! The four operations over the repertoire collection. Validation happens
//! here at the HTTP edge; the store enforces uniqueness and id assignment.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::store::{Song, SongFields};
use crate::AppState;

/// Request body for creating or updating a song
#[derive(Debug, Deserialize)]
pub struct SongPayload {
    pub titulo: Option<String>,
    pub artista: Option<String>,
    pub tono: Option<String>,
}

impl SongPayload {
    /// All three fields present and non-empty, or a validation error
    fn validate(self) -> Result<SongFields> {
        match (self.titulo, self.artista, self.tono) {
            (Some(titulo), Some(artista), Some(tono))
                if !titulo.is_empty() && !artista.is_empty() && !tono.is_empty() =>
            {
                Ok(SongFields {
                    titulo,
                    artista,
                    tono,
                })
            }
            _ => Err(Error::Validation("Invalid request body".to_string())),
        }
    }
}

/// Parse a path id as an integer.
///
/// Non-numeric input is a client error, distinct from a not-found.
fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| Error::Validation(format!("Invalid song id: {}", raw)))
}

/// GET /canciones
///
/// Returns the full repertoire in insertion order.
pub async fn list_songs(State(state): State<AppState>) -> Json<Vec<Song>> {
    Json(state.store.list().await)
}

/// POST /canciones
///
/// Adds a song to the repertoire and returns it with its assigned id.
pub async fn create_song(
    State(state): State<AppState>,
    Json(payload): Json<SongPayload>,
) -> Result<(StatusCode, Json<Song>)> {
    let fields = payload.validate()?;
    let song = state.store.create(fields).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

/// PUT /canciones/:id
///
/// Overwrites the three mutable fields of an existing song.
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SongPayload>,
) -> Result<Json<Song>> {
    // An invalid payload outranks a bad id
    let fields = payload.validate()?;
    let id = parse_id(&id)?;
    let song = state.store.update(id, fields).await?;
    Ok(Json(song))
}

/// DELETE /canciones/:id
///
/// Removes a song and returns a plain-text confirmation.
pub async fn delete_song(State(state): State<AppState>, Path(id): Path<String>) -> Result<String> {
    let id = parse_id(&id)?;
    let song = state.store.delete(id).await?;
    Ok(format!("Song \"{}\" has been deleted", song.id))
}
