// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services validate, commit through repositories, then emit events.
// They never hold a lock while emitting.

pub mod catalog_service;
pub mod commit_gate;
pub mod credentials;
pub mod history_service;
pub mod persistence_service;
pub mod query;
pub mod session_service;
pub mod snapshot_flusher;
pub mod watchlist_service;

#[cfg(test)]
mod session_service_tests;

// Re-export all services and their types
pub use catalog_service::CatalogService;

pub use commit_gate::CommitGate;

pub use credentials::{digest_password, CredentialVerifier, DirectoryVerifier};

pub use session_service::SessionService;

pub use watchlist_service::WatchlistService;

pub use history_service::WatchHistoryService;

pub use query::{ContentQuery, Filtered, RELATED_LIMIT};

pub use persistence_service::{
    DefaultReason,
    PersistenceService,
    RestoreOutcome,
    SessionRecord,
    StateSnapshot,
    SNAPSHOT_SCHEMA_VERSION,
};

pub use snapshot_flusher::{FlushPolicy, SnapshotFlusher};
