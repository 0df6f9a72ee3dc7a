// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS - Event Types and Bus Only
// ============================================================================

pub use types::{ChangeNotice, ChangeTopic, DomainEvent};

pub use types::{
    // Watchlist
    AddedToWatchlist,
    // Catalog
    CatalogLoaded,
    ContentAdded,
    ContentDeleted,
    ContentUpdated,
    // History
    ProgressRecorded,
    // Query / restore
    QueryChanged,
    RemovedFromWatchlist,
    // Session
    SessionClosed,
    SessionOpened,
    StateRestored,
    // Directory
    UserRegistered,
    UserRemoved,
};

pub use bus::{EventBus, EventLogEntry, SubscriptionToken};
