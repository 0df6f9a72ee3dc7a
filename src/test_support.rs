// src/test_support.rs
//
// Shared fixtures for unit tests

use std::sync::Arc;

use crate::domain::content::{ContentDraft, ContentItem, ContentKind};
use crate::events::EventBus;
use crate::repositories::{
    InMemoryCredentialRepository, InMemoryHistoryRepository, InMemorySnapshotRepository,
    InMemoryUserRepository, InMemoryWatchlistRepository,
};
use crate::services::{
    CommitGate, DirectoryVerifier, PersistenceService, SessionService, WatchHistoryService,
    WatchlistService,
};

pub(crate) fn sample_draft(title: &str, genres: &[&str]) -> ContentDraft {
    ContentDraft {
        title: title.to_string(),
        description: format!("{} is a story told over two hours.", title),
        release_year: 2020,
        duration: 110,
        thumbnail_url: "https://cdn.example.com/thumb.jpg".to_string(),
        video_url: "https://cdn.example.com/video.mp4".to_string(),
        trailer_url: "https://cdn.example.com/trailer.mp4".to_string(),
        kind: ContentKind::Movie,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        cast: vec!["Lead Actor".to_string(), "Supporting Actor".to_string()],
        rating: 4.0,
    }
}

pub(crate) fn sample_item(title: &str, genres: &[&str]) -> ContentItem {
    ContentItem::from_draft(sample_draft(title, genres))
}

/// Fully wired in-memory services sharing one bus
pub(crate) struct Fixture {
    pub bus: Arc<EventBus>,
    pub users: Arc<InMemoryUserRepository>,
    pub credentials: Arc<InMemoryCredentialRepository>,
    pub snapshots: Arc<InMemorySnapshotRepository>,
    pub gate: Arc<CommitGate>,
    pub session: Arc<SessionService>,
    pub watchlist: Arc<WatchlistService>,
    pub history: Arc<WatchHistoryService>,
    pub persistence: Arc<PersistenceService>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_snapshots(InMemorySnapshotRepository::new())
    }

    pub fn with_snapshots(snapshots: InMemorySnapshotRepository) -> Self {
        let bus = Arc::new(EventBus::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let credentials = Arc::new(InMemoryCredentialRepository::new());
        let snapshots = Arc::new(snapshots);
        let gate = Arc::new(CommitGate::new());

        let verifier = Arc::new(DirectoryVerifier::new(users.clone(), credentials.clone()));
        let session = Arc::new(SessionService::new(
            users.clone(),
            credentials.clone(),
            verifier,
            gate.clone(),
            bus.clone(),
        ));
        let watchlist = Arc::new(WatchlistService::new(
            Arc::new(InMemoryWatchlistRepository::new()),
            gate.clone(),
            bus.clone(),
        ));
        let history = Arc::new(WatchHistoryService::new(
            Arc::new(InMemoryHistoryRepository::new()),
            gate.clone(),
            bus.clone(),
        ));
        let persistence = Arc::new(PersistenceService::new(
            session.clone(),
            watchlist.clone(),
            history.clone(),
            snapshots.clone(),
            gate.clone(),
            bus.clone(),
        ));

        Self {
            bus,
            users,
            credentials,
            snapshots,
            gate,
            session,
            watchlist,
            history,
            persistence,
        }
    }
}
