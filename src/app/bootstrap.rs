// src/app/bootstrap.rs
//
// Wires repositories, services and the flusher into one `AppState`.
//
// Order matters:
// 1. Install the catalog and the demo directory
// 2. Restore durable state (falls back to defaults, never fails on bad data)
// 3. Only then start listening for changes to flush, so the restore itself
//    does not write straight back

use std::sync::Arc;

use super::catalog_source::CatalogSource;
use super::seed::{seed_directory, SEED_ACCOUNTS};
use crate::application::AppState;
use crate::config::StoreConfig;
use crate::error::AppResult;
use crate::events::EventBus;
use crate::repositories::{
    InMemoryContentRepository, InMemoryCredentialRepository, InMemoryHistoryRepository,
    InMemoryUserRepository, InMemoryWatchlistRepository, SnapshotRepository,
};
use crate::services::{
    CatalogService, CommitGate, CredentialVerifier, DirectoryVerifier, FlushPolicy,
    PersistenceService, RestoreOutcome, SessionService, SnapshotFlusher, WatchHistoryService,
    WatchlistService,
};

pub fn initialize_app_state(
    config: &StoreConfig,
    catalog_source: &dyn CatalogSource,
    snapshot_repo: Arc<dyn SnapshotRepository>,
) -> AppResult<(AppState, RestoreOutcome)> {
    log::info!("[BOOT] Initializing state container...");

    let event_bus = Arc::new(EventBus::new());
    let gate = Arc::new(CommitGate::new());

    let user_repo = Arc::new(InMemoryUserRepository::new());
    let credential_repo = Arc::new(InMemoryCredentialRepository::new());
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(DirectoryVerifier::new(
        user_repo.clone(),
        credential_repo.clone(),
    ));

    let catalog_service = Arc::new(CatalogService::new(
        Arc::new(InMemoryContentRepository::new()),
        event_bus.clone(),
    ));
    let session_service = Arc::new(SessionService::new(
        user_repo,
        credential_repo,
        verifier,
        gate.clone(),
        event_bus.clone(),
    ));
    let watchlist_service = Arc::new(WatchlistService::new(
        Arc::new(InMemoryWatchlistRepository::new()),
        gate.clone(),
        event_bus.clone(),
    ));
    let history_service = Arc::new(WatchHistoryService::new(
        Arc::new(InMemoryHistoryRepository::new()),
        gate.clone(),
        event_bus.clone(),
    ));
    let persistence_service = Arc::new(PersistenceService::new(
        session_service.clone(),
        watchlist_service.clone(),
        history_service.clone(),
        snapshot_repo,
        gate,
        event_bus.clone(),
    ));
    let flusher = Arc::new(SnapshotFlusher::new(
        persistence_service.clone(),
        FlushPolicy {
            window: config.flush_window(),
        },
    ));

    catalog_service.load_catalog(catalog_source.load()?)?;
    seed_directory(&session_service, SEED_ACCOUNTS)?;

    let outcome = persistence_service.restore_from_storage()?;
    log::info!("[BOOT] Restore outcome: {:?}", outcome);

    let state = AppState::new(
        event_bus,
        catalog_service,
        session_service,
        watchlist_service,
        history_service,
        persistence_service,
        flusher,
    );
    state.attach_flusher();

    log::info!("[BOOT] State container ready");
    Ok((state, outcome))
}

impl AppState {
    /// Builds the container from configuration and storage
    pub fn bootstrap(
        config: &StoreConfig,
        catalog_source: &dyn CatalogSource,
        snapshot_repo: Arc<dyn SnapshotRepository>,
    ) -> AppResult<(AppState, RestoreOutcome)> {
        initialize_app_state(config, catalog_source, snapshot_repo)
    }
}
