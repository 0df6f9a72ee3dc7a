// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already been committed.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;

    /// Which slice of state changed
    fn topic(&self) -> ChangeTopic;
}

/// Slice of application state touched by a committed change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTopic {
    Catalog,
    Directory,
    Session,
    Watchlist,
    History,
    Query,
    Restore,
}

impl ChangeTopic {
    /// Whether the change touches state covered by the persisted snapshot
    pub fn is_durable(&self) -> bool {
        matches!(
            self,
            ChangeTopic::Session | ChangeTopic::Watchlist | ChangeTopic::History
        )
    }
}

/// Type-erased summary handed to "any change" listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub event_type: &'static str,
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub topic: ChangeTopic,
}

impl ChangeNotice {
    pub fn of<E: DomainEvent>(event: &E) -> Self {
        Self {
            event_type: event.event_type(),
            event_id: event.event_id(),
            occurred_at: event.occurred_at(),
            topic: event.topic(),
        }
    }
}

macro_rules! domain_event {
    ($name:ident, $topic:expr) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($name) }
            fn topic(&self) -> ChangeTopic { $topic }
        }
    };
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted when a record is added to the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_id: Uuid,
    pub title: String,
}

impl ContentAdded {
    pub fn new(content_id: Uuid, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_id,
            title,
        }
    }
}

domain_event!(ContentAdded, ChangeTopic::Catalog);

/// Emitted when a record's fields are changed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_id: Uuid,
}

impl ContentUpdated {
    pub fn new(content_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_id,
        }
    }
}

domain_event!(ContentUpdated, ChangeTopic::Catalog);

/// Emitted when a record is removed. Watchlist and history entries are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_id: Uuid,
}

impl ContentDeleted {
    pub fn new(content_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_id,
        }
    }
}

domain_event!(ContentDeleted, ChangeTopic::Catalog);

/// Emitted once an external catalog source has been installed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub installed: usize,
    pub skipped: usize,
}

impl CatalogLoaded {
    pub fn new(installed: usize, skipped: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            installed,
            skipped,
        }
    }
}

domain_event!(CatalogLoaded, ChangeTopic::Catalog);

// ============================================================================
// DIRECTORY / SESSION EVENTS
// ============================================================================

/// Emitted when a user joins the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub email: String,
}

impl UserRegistered {
    pub fn new(user_id: Uuid, email: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            email,
        }
    }
}

domain_event!(UserRegistered, ChangeTopic::Directory);

/// Emitted when a user is explicitly removed from the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl UserRemoved {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
        }
    }
}

domain_event!(UserRemoved, ChangeTopic::Directory);

/// Emitted when a session is opened (signup, login or resume)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOpened {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub generation: u64,
}

impl SessionOpened {
    pub fn new(user_id: Uuid, generation: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            generation,
        }
    }
}

domain_event!(SessionOpened, ChangeTopic::Session);

/// Emitted when an active session is cleared
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClosed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl SessionClosed {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
        }
    }
}

domain_event!(SessionClosed, ChangeTopic::Session);

// ============================================================================
// WATCHLIST EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddedToWatchlist {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_id: Uuid,
}

impl AddedToWatchlist {
    pub fn new(content_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_id,
        }
    }
}

domain_event!(AddedToWatchlist, ChangeTopic::Watchlist);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovedFromWatchlist {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_id: Uuid,
}

impl RemovedFromWatchlist {
    pub fn new(content_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_id,
        }
    }
}

domain_event!(RemovedFromWatchlist, ChangeTopic::Watchlist);

// ============================================================================
// WATCH HISTORY EVENTS
// ============================================================================

/// Emitted on every progress report (many per second during playback)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecorded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_id: Uuid,
    pub position: f64,
}

impl ProgressRecorded {
    pub fn new(content_id: Uuid, position: f64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_id,
            position,
        }
    }
}

domain_event!(ProgressRecorded, ChangeTopic::History);

// ============================================================================
// QUERY / RESTORE EVENTS
// ============================================================================

/// Emitted when the transient browse query changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub text: Option<String>,
    pub genre: Option<String>,
}

impl QueryChanged {
    pub fn new(text: Option<String>, genre: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            text,
            genre,
        }
    }
}

domain_event!(QueryChanged, ChangeTopic::Query);

/// Emitted after durable state was replaced from a snapshot (or reset to defaults)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRestored {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub defaulted: bool,
}

impl StateRestored {
    pub fn new(defaulted: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            defaulted,
        }
    }
}

domain_event!(StateRestored, ChangeTopic::Restore);
