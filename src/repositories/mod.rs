// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data holders
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls

pub mod content_repository;
pub mod credential_repository;
pub mod history_repository;
pub mod snapshot_repository;
pub mod user_repository;
pub mod watchlist_repository;

pub use content_repository::{ContentRepository, InMemoryContentRepository};
pub use credential_repository::{CredentialRepository, InMemoryCredentialRepository};
pub use history_repository::{HistoryRepository, InMemoryHistoryRepository};
pub use snapshot_repository::{
    InMemorySnapshotRepository, SnapshotRepository, SqliteSnapshotRepository, DEFAULT_SLOT,
};
pub use user_repository::{InMemoryUserRepository, UserRepository};
pub use watchlist_repository::{InMemoryWatchlistRepository, WatchlistRepository};

use crate::error::AppError;

/// Lock poisoning means a writer panicked mid-update; surface it as an error
pub(crate) fn poisoned<T>(_: std::sync::PoisonError<T>) -> AppError {
    AppError::Other("State lock poisoned".to_string())
}
