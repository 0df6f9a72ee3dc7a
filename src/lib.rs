// src/lib.rs
// StreamHub - Client-resident state and persistence core for a streaming app
//
// Architecture:
// - Domain-centric: validation rules live with their entities
// - Event-driven: every committed change is announced on the EventBus
// - Explicit: one AppState container, no module-level globals
// - Durable subset: session, watchlist and history survive restarts;
//   the catalog is supplied fresh on every start

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod app;
pub mod application;

#[cfg(test)]
pub(crate) mod test_support;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_content,
    validate_content_draft,
    validate_credentials,
    validate_login,
    validate_position,
    // Content
    ContentDraft,
    ContentId,
    ContentItem,
    ContentKind,
    ContentPatch,
    // Errors
    DomainError,
    FieldViolation,
    // User / Session
    Session,
    User,
    UserRole,
    ValidationErrors,
    // Watch History
    WatchHistoryEntry,
    // Watchlist
    WatchlistEntry,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    AddedToWatchlist,
    CatalogLoaded,
    ChangeNotice,
    ChangeTopic,
    ContentAdded,
    ContentDeleted,
    ContentUpdated,
    DomainEvent,
    EventBus,
    EventLogEntry,
    ProgressRecorded,
    QueryChanged,
    RemovedFromWatchlist,
    SessionClosed,
    SessionOpened,
    StateRestored,
    SubscriptionToken,
    UserRegistered,
    UserRemoved,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    ContentRepository,
    CredentialRepository,
    HistoryRepository,
    InMemorySnapshotRepository,
    SnapshotRepository,
    SqliteSnapshotRepository,
    UserRepository,
    WatchlistRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Catalog
    CatalogService,
    // Durable state
    CommitGate,
    // Queries
    ContentQuery,
    // Session
    CredentialVerifier,
    DefaultReason,
    DirectoryVerifier,
    FlushPolicy,
    // Persistence
    PersistenceService,
    RestoreOutcome,
    SessionService,
    SnapshotFlusher,
    StateSnapshot,
    // Watch History
    WatchHistoryService,
    // Watchlist
    WatchlistService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use app::{initialize_app_state, CatalogSource, JsonCatalogSource, SeedCatalog};
pub use application::{AppState, ErrorResponse, ErrorType};
pub use config::StoreConfig;
