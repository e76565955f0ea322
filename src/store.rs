//! Song model and file-backed repertoire store
//!
//! The store owns the in-memory collection and the persisted JSON file.
//! Every mutation runs under the write lock and rewrites the file before
//! the lock is released, so two concurrent mutations cannot interleave
//! between the in-memory change and the disk write.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::error::{Error, Result};

/// A song in the repertoire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub titulo: String,
    pub artista: String,
    pub tono: String,
}

/// The three mutable fields of a song, already validated as non-empty
#[derive(Debug, Clone)]
pub struct SongFields {
    pub titulo: String,
    pub artista: String,
    pub tono: String,
}

/// File-backed repertoire store
pub struct RepertoireStore {
    path: PathBuf,
    songs: RwLock<Vec<Song>>,
}

impl RepertoireStore {
    /// Load the repertoire from `path`.
    ///
    /// A missing file starts an empty repertoire. An unreadable or
    /// unparseable file is an error, so startup fails rather than
    /// silently discarding existing data.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let songs = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let songs: Vec<Song> = serde_json::from_str(&content).map_err(|e| {
                Error::Storage(format!("Failed to parse {}: {}", path.display(), e))
            })?;
            info!("Loaded {} songs from {}", songs.len(), path.display());
            songs
        } else {
            warn!(
                "Data file {} not found, starting with an empty repertoire",
                path.display()
            );
            Vec::new()
        };

        Ok(Self {
            path,
            songs: RwLock::new(songs),
        })
    }

    /// Full collection in insertion order
    pub async fn list(&self) -> Vec<Song> {
        self.songs.read().await.clone()
    }

    /// Append a new song and persist the full collection.
    ///
    /// Rejects an exact (titulo, artista, tono) duplicate. The new id is
    /// one past the highest id present, floored at 0 so the first song in
    /// an empty repertoire gets id 1.
    pub async fn create(&self, fields: SongFields) -> Result<Song> {
        let mut songs = self.songs.write().await;

        let duplicate = songs.iter().any(|s| {
            s.titulo == fields.titulo && s.artista == fields.artista && s.tono == fields.tono
        });
        if duplicate {
            return Err(Error::Duplicate(
                "The song already exists in the repertoire".to_string(),
            ));
        }

        let next_id = songs.iter().map(|s| s.id).fold(0, i64::max) + 1;
        let song = Song {
            id: next_id,
            titulo: fields.titulo,
            artista: fields.artista,
            tono: fields.tono,
        };
        songs.push(song.clone());
        self.persist(&songs)?;

        info!("Added song {} ({} - {})", song.id, song.titulo, song.artista);
        Ok(song)
    }

    /// Overwrite the three mutable fields of the song with `id` in place
    /// (id unchanged) and persist the full collection.
    pub async fn update(&self, id: i64, fields: SongFields) -> Result<Song> {
        let mut songs = self.songs.write().await;

        let song = songs
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound(format!("No song found with id {}", id)))?;
        song.titulo = fields.titulo;
        song.artista = fields.artista;
        song.tono = fields.tono;
        let updated = song.clone();
        self.persist(&songs)?;

        info!("Updated song {}", updated.id);
        Ok(updated)
    }

    /// Remove the song with `id` and persist the full collection.
    pub async fn delete(&self, id: i64) -> Result<Song> {
        let mut songs = self.songs.write().await;

        let index = songs
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::NotFound(format!("No song found with id {}", id)))?;
        let removed = songs.remove(index);
        self.persist(&songs)?;

        info!("Deleted song {} ({})", removed.id, removed.titulo);
        Ok(removed)
    }

    /// Rewrite the persisted file from the full collection.
    ///
    /// Pretty-printed so the file stays human-diffable. Writes to a
    /// sibling `.tmp` file and renames over the target; a crash mid-write
    /// cannot leave a truncated repertoire behind.
    fn persist(&self, songs: &[Song]) -> Result<()> {
        let json = serde_json::to_string_pretty(songs)
            .map_err(|e| Error::Storage(format!("Failed to serialize repertoire: {}", e)))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        if let Err(e) = std::fs::write(&tmp, json) {
            error!("Failed to write {}: {}", tmp.display(), e);
            return Err(e.into());
        }
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            error!("Failed to rename {} to {}: {}", tmp.display(), self.path.display(), e);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fields(titulo: &str, artista: &str, tono: &str) -> SongFields {
        SongFields {
            titulo: titulo.to_string(),
            artista: artista.to_string(),
            tono: tono.to_string(),
        }
    }

    fn store_in(dir: &TempDir) -> RepertoireStore {
        RepertoireStore::load(dir.path().join("repertorio.json")).unwrap()
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn load_reads_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repertorio.json");
        std::fs::write(
            &path,
            r#"[{"id": 3, "titulo": "Imagine", "artista": "Lennon", "tono": "C"}]"#,
        )
        .unwrap();

        let store = RepertoireStore::load(&path).unwrap();
        let songs = store.list().await;
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, 3);
        assert_eq!(songs[0].titulo, "Imagine");
    }

    #[test]
    fn load_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repertorio.json");
        std::fs::write(&path, "not json").unwrap();

        let result = RepertoireStore::load(&path);
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn create_assigns_max_id_plus_one() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repertorio.json");
        std::fs::write(
            &path,
            r#"[{"id": 3, "titulo": "A", "artista": "B", "tono": "C"},
               {"id": 7, "titulo": "D", "artista": "E", "tono": "F"}]"#,
        )
        .unwrap();

        let store = RepertoireStore::load(&path).unwrap();
        let song = store.create(fields("G", "H", "Am")).await.unwrap();
        assert_eq!(song.id, 8);
    }

    #[tokio::test]
    async fn create_rejects_exact_duplicate() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.create(fields("Imagine", "Lennon", "C")).await.unwrap();

        let result = store.create(fields("Imagine", "Lennon", "C")).await;
        assert!(matches!(result, Err(Error::Duplicate(_))));
        assert_eq!(store.list().await.len(), 1);

        // Same title and artist in a different key is a different song
        store.create(fields("Imagine", "Lennon", "D")).await.unwrap();
        assert_eq!(store.list().await.len(), 2);
    }

    #[tokio::test]
    async fn update_replaces_fields_keeps_id_and_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.create(fields("Imagine", "Lennon", "C")).await.unwrap();
        store.create(fields("Help", "Beatles", "A")).await.unwrap();

        let updated = store
            .update(1, fields("Imagine", "John Lennon", "C"))
            .await
            .unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.artista, "John Lennon");

        let songs = store.list().await;
        assert_eq!(songs[0].id, 1);
        assert_eq!(songs[0].artista, "John Lennon");
        assert_eq!(songs[1].titulo, "Help");
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let result = store.update(42, fields("A", "B", "C")).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.create(fields("Imagine", "Lennon", "C")).await.unwrap();
        store.create(fields("Help", "Beatles", "A")).await.unwrap();

        let removed = store.delete(1).await.unwrap();
        assert_eq!(removed.titulo, "Imagine");

        let songs = store.list().await;
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, 2);

        let result = store.delete(42).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn deleting_highest_id_reissues_it() {
        // Ids come from the current maximum, not a counter, so the
        // highest id becomes available again once its song is removed.
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.create(fields("Imagine", "Lennon", "C")).await.unwrap();
        store.create(fields("Help", "Beatles", "A")).await.unwrap();

        store.delete(2).await.unwrap();
        let song = store.create(fields("Yesterday", "Beatles", "F")).await.unwrap();
        assert_eq!(song.id, 2);
    }

    #[tokio::test]
    async fn persist_is_pretty_and_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repertorio.json");
        let store = RepertoireStore::load(&path).unwrap();
        store.create(fields("Imagine", "Lennon", "C")).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  "), "file should be pretty-printed");
        assert!(!dir.path().join("repertorio.json.tmp").exists());
    }

    #[tokio::test]
    async fn reload_matches_in_memory_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repertorio.json");

        let store = RepertoireStore::load(&path).unwrap();
        store.create(fields("Imagine", "Lennon", "C")).await.unwrap();
        store.create(fields("Help", "Beatles", "A")).await.unwrap();
        store.update(2, fields("Help!", "The Beatles", "A")).await.unwrap();
        store.delete(1).await.unwrap();

        let reloaded = RepertoireStore::load(&path).unwrap();
        assert_eq!(reloaded.list().await, store.list().await);
    }
}
