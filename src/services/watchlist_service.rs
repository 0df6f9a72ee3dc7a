// src/services/watchlist_service.rs
use crate::domain::content::{ContentId, ContentItem};
use crate::domain::watchlist::WatchlistEntry;
use crate::error::AppResult;
use crate::events::{AddedToWatchlist, EventBus, RemovedFromWatchlist};
use crate::repositories::WatchlistRepository;
use std::sync::Arc;

use super::commit_gate::CommitGate;

pub struct WatchlistService {
    watchlist_repo: Arc<dyn WatchlistRepository>,
    gate: Arc<CommitGate>,
    event_bus: Arc<EventBus>,
}

impl WatchlistService {
    pub fn new(
        watchlist_repo: Arc<dyn WatchlistRepository>,
        gate: Arc<CommitGate>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            watchlist_repo,
            gate,
            event_bus,
        }
    }

    /// Idempotent. A second add keeps the original `added_at` and notifies nobody.
    pub fn add(&self, content_id: ContentId) -> AppResult<()> {
        let inserted = {
            let _commit = self.gate.commit()?;
            self.watchlist_repo
                .insert_if_absent(&WatchlistEntry::new(content_id))?
        };

        if inserted {
            self.event_bus.emit(AddedToWatchlist::new(content_id));
        }
        Ok(())
    }

    /// Idempotent
    pub fn remove(&self, content_id: ContentId) -> AppResult<()> {
        let removed = {
            let _commit = self.gate.commit()?;
            self.watchlist_repo.remove(content_id)?
        };

        if removed {
            self.event_bus.emit(RemovedFromWatchlist::new(content_id));
        }
        Ok(())
    }

    pub fn contains(&self, content_id: ContentId) -> AppResult<bool> {
        self.watchlist_repo.contains(content_id)
    }

    /// Entries in the order they were added
    pub fn list(&self) -> AppResult<Vec<WatchlistEntry>> {
        self.watchlist_repo.list_all()
    }

    /// Catalog records on the watchlist, in watchlist order.
    /// Entries whose record has been deleted are skipped.
    pub fn resolve(&self, catalog: &[ContentItem]) -> AppResult<Vec<ContentItem>> {
        Ok(self
            .list()?
            .iter()
            .filter_map(|entry| catalog.iter().find(|c| c.id == entry.content_id))
            .cloned()
            .collect())
    }

    /// Caller holds the commit gate exclusively
    pub(crate) fn replace_all(&self, entries: Vec<WatchlistEntry>) -> AppResult<()> {
        self.watchlist_repo.replace_all(entries)
    }
}
