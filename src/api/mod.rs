//! HTTP API handlers for repertorio

pub mod buildinfo;
pub mod health;
pub mod songs;
pub mod ui;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use songs::{create_song, delete_song, list_songs, update_song};
pub use ui::serve_index;
