// src/repositories/history_repository.rs

use std::sync::RwLock;

use crate::domain::content::ContentId;
use crate::domain::history::WatchHistoryEntry;
use crate::error::AppResult;
use crate::repositories::poisoned;

pub trait HistoryRepository: Send + Sync {
    /// Overwrite the entry for the same content in place, or append
    fn save(&self, entry: &WatchHistoryEntry) -> AppResult<()>;
    fn get_by_content(&self, content_id: ContentId) -> AppResult<Option<WatchHistoryEntry>>;
    /// Entries in order of first report
    fn list_all(&self) -> AppResult<Vec<WatchHistoryEntry>>;
    /// Newest `last_watched` first. Equal timestamps put the later first
    /// report ahead, so the order depends only on what `list_all` returns.
    fn list_by_recency(&self, limit: usize) -> AppResult<Vec<WatchHistoryEntry>>;
    /// Swap the whole ledger in one step
    fn replace_all(&self, entries: Vec<WatchHistoryEntry>) -> AppResult<()>;
}

#[derive(Default)]
pub struct InMemoryHistoryRepository {
    entries: RwLock<Vec<WatchHistoryEntry>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryRepository for InMemoryHistoryRepository {
    fn save(&self, entry: &WatchHistoryEntry) -> AppResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        match entries.iter_mut().find(|e| e.content_id == entry.content_id) {
            Some(existing) => *existing = entry.clone(),
            None => entries.push(entry.clone()),
        }
        Ok(())
    }

    fn get_by_content(&self, content_id: ContentId) -> AppResult<Option<WatchHistoryEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.iter().find(|e| e.content_id == content_id).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<WatchHistoryEntry>> {
        Ok(self.entries.read().map_err(poisoned)?.clone())
    }

    fn list_by_recency(&self, limit: usize) -> AppResult<Vec<WatchHistoryEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut ranked: Vec<(usize, &WatchHistoryEntry)> = entries.iter().enumerate().collect();
        ranked.sort_by(|(ia, a), (ib, b)| {
            b.last_watched
                .cmp(&a.last_watched)
                .then(ib.cmp(ia))
        });
        Ok(ranked
            .into_iter()
            .take(limit)
            .map(|(_, e)| e.clone())
            .collect())
    }

    fn replace_all(&self, entries: Vec<WatchHistoryEntry>) -> AppResult<()> {
        *self.entries.write().map_err(poisoned)? = entries;
        Ok(())
    }
}
