// src/repositories/watchlist_repository.rs

use std::sync::RwLock;

use crate::domain::content::ContentId;
use crate::domain::watchlist::WatchlistEntry;
use crate::error::AppResult;
use crate::repositories::poisoned;

pub trait WatchlistRepository: Send + Sync {
    /// Append unless an entry for the same content already exists.
    /// Returns whether the entry was stored.
    fn insert_if_absent(&self, entry: &WatchlistEntry) -> AppResult<bool>;
    /// Returns whether an entry was removed
    fn remove(&self, content_id: ContentId) -> AppResult<bool>;
    fn contains(&self, content_id: ContentId) -> AppResult<bool>;
    /// Entries in insertion order
    fn list_all(&self) -> AppResult<Vec<WatchlistEntry>>;
    /// Swap the whole set in one step
    fn replace_all(&self, entries: Vec<WatchlistEntry>) -> AppResult<()>;
}

#[derive(Default)]
pub struct InMemoryWatchlistRepository {
    entries: RwLock<Vec<WatchlistEntry>>,
}

impl InMemoryWatchlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WatchlistRepository for InMemoryWatchlistRepository {
    fn insert_if_absent(&self, entry: &WatchlistEntry) -> AppResult<bool> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        if entries.iter().any(|e| e.content_id == entry.content_id) {
            return Ok(false);
        }
        entries.push(entry.clone());
        Ok(true)
    }

    fn remove(&self, content_id: ContentId) -> AppResult<bool> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        let before = entries.len();
        entries.retain(|e| e.content_id != content_id);
        Ok(entries.len() != before)
    }

    fn contains(&self, content_id: ContentId) -> AppResult<bool> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.iter().any(|e| e.content_id == content_id))
    }

    fn list_all(&self) -> AppResult<Vec<WatchlistEntry>> {
        Ok(self.entries.read().map_err(poisoned)?.clone())
    }

    fn replace_all(&self, entries: Vec<WatchlistEntry>) -> AppResult<()> {
        *self.entries.write().map_err(poisoned)? = entries;
        Ok(())
    }
}
