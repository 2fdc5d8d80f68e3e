use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::error::PersistenceError;
use crate::models::FavoriteRef;

/// Durable storage for the favorites list. The whole list is written on
/// every save; there is no partial update.
pub trait FavoritesRepository: Send + Sync {
    fn load(&self) -> Result<Vec<FavoriteRef>, PersistenceError>;
    fn save(&self, entries: &[FavoriteRef]) -> Result<(), PersistenceError>;
}

/// One JSON array of `{movie_id, added_at}` at one path. No schema version
/// field; a missing file is an empty list.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FavoritesRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<FavoriteRef>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::Read(e.to_string())),
        };
        serde_json::from_str(&text).map_err(|e| PersistenceError::Read(e.to_string()))
    }

    fn save(&self, entries: &[FavoriteRef]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::Write(e.to_string()))?;
        }
        let text =
            serde_json::to_string(entries).map_err(|e| PersistenceError::Write(e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| PersistenceError::Write(e.to_string()))
    }
}

/// Ordered, de-duplicated bookmark collection with write-through persistence.
///
/// Mutations persist the full list synchronously before returning. A save
/// failure is logged and swallowed: the in-memory state stays authoritative
/// for the session even when durability is lost.
pub struct FavoritesStore {
    entries: Vec<FavoriteRef>,
    repo: Arc<dyn FavoritesRepository>,
}

impl FavoritesStore {
    /// Loads the persisted list. A read failure (corrupt or unreadable
    /// store) degrades to an empty collection, never a fatal error.
    pub fn new(repo: Arc<dyn FavoritesRepository>) -> Self {
        let entries = repo.load().unwrap_or_else(|e| {
            warn!("could not load persisted favorites, starting empty: {e}");
            Vec::new()
        });
        Self { entries, repo }
    }

    /// Appends a bookmark unless the id is already present.
    pub fn add(&mut self, movie_id: &str) {
        if self.contains(movie_id) {
            return;
        }
        self.entries.push(FavoriteRef {
            movie_id: movie_id.to_string(),
            added_at: Utc::now(),
        });
        self.persist();
    }

    /// Removes a bookmark; an absent id is a no-op (but still persists,
    /// matching mutation-then-write on every dispatched action).
    pub fn remove(&mut self, movie_id: &str) {
        self.entries.retain(|f| f.movie_id != movie_id);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, movie_id: &str) -> bool {
        self.entries.iter().any(|f| f.movie_id == movie_id)
    }

    pub fn entries(&self) -> &[FavoriteRef] {
        &self.entries
    }

    fn persist(&self) {
        if let Err(e) = self.repo.save(&self.entries) {
            warn!("favorites not persisted, keeping in-memory state: {e}");
        }
    }
}
