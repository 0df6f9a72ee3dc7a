// src/services/history_service.rs
//
// Playback progress ledger. One entry per content id, and the latest
// report always wins.

use std::sync::Arc;

use crate::domain::content::{ContentId, ContentItem};
use crate::domain::history::{validate_position, WatchHistoryEntry};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, ProgressRecorded};
use crate::repositories::HistoryRepository;

use super::commit_gate::CommitGate;

pub struct WatchHistoryService {
    history_repo: Arc<dyn HistoryRepository>,
    gate: Arc<CommitGate>,
    event_bus: Arc<EventBus>,
}

impl WatchHistoryService {
    pub fn new(
        history_repo: Arc<dyn HistoryRepository>,
        gate: Arc<CommitGate>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            history_repo,
            gate,
            event_bus,
        }
    }

    /// Upserts the position for `content_id`. Called many times per second
    /// while a video plays.
    pub fn record_progress(
        &self,
        content_id: ContentId,
        position: f64,
    ) -> AppResult<WatchHistoryEntry> {
        validate_position(position).map_err(AppError::Domain)?;

        let entry = {
            let _commit = self.gate.commit()?;
            let entry = match self.history_repo.get_by_content(content_id)? {
                Some(mut existing) => {
                    existing.record(position);
                    existing
                }
                None => WatchHistoryEntry::new(content_id, position),
            };
            self.history_repo.save(&entry)?;
            entry
        };

        self.event_bus
            .emit(ProgressRecorded::new(content_id, position));

        Ok(entry)
    }

    pub fn list(&self) -> AppResult<Vec<WatchHistoryEntry>> {
        self.history_repo.list_all()
    }

    pub fn find_by_content(&self, content_id: ContentId) -> AppResult<Option<WatchHistoryEntry>> {
        self.history_repo.get_by_content(content_id)
    }

    pub fn most_recent(&self, n: usize) -> AppResult<Vec<WatchHistoryEntry>> {
        self.history_repo.list_by_recency(n)
    }

    /// Most recently watched records that still exist in the catalog
    pub fn continue_watching(
        &self,
        catalog: &[ContentItem],
        n: usize,
    ) -> AppResult<Vec<(ContentItem, WatchHistoryEntry)>> {
        let all = self.history_repo.list_by_recency(usize::MAX)?;
        Ok(all
            .into_iter()
            .filter_map(|entry| {
                catalog
                    .iter()
                    .find(|c| c.id == entry.content_id)
                    .map(|c| (c.clone(), entry))
            })
            .take(n)
            .collect())
    }

    /// Caller holds the commit gate exclusively
    pub(crate) fn replace_all(&self, entries: Vec<WatchHistoryEntry>) -> AppResult<()> {
        self.history_repo.replace_all(entries)
    }
}
