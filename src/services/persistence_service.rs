// src/services/persistence_service.rs
//
// Durable subset of application state: session, watchlist and history.
// The catalog is supplied externally on every start and is never saved.
//
// Restore never fails because of what is (or is not) in storage. A missing,
// unreadable, corrupt or unknown-version snapshot resets to the empty default
// state and says so through `RestoreOutcome`.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::commit_gate::CommitGate;
use super::history_service::WatchHistoryService;
use super::session_service::SessionService;
use super::watchlist_service::WatchlistService;
use crate::domain::history::{validate_position, WatchHistoryEntry};
use crate::domain::watchlist::WatchlistEntry;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, StateRestored};
use crate::repositories::SnapshotRepository;

pub const SNAPSHOT_SCHEMA_VERSION: u64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub schema_version: u64,
    pub session: SessionRecord,
    pub watchlist: Vec<WatchlistEntry>,
    pub history: Vec<WatchHistoryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultReason {
    Missing,
    Corrupt,
    UnknownVersion,
    StorageUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored,
    Defaulted(DefaultReason),
}

impl RestoreOutcome {
    pub fn is_defaulted(&self) -> bool {
        matches!(self, RestoreOutcome::Defaulted(_))
    }
}

impl std::fmt::Display for DefaultReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultReason::Missing => write!(f, "no saved state"),
            DefaultReason::Corrupt => write!(f, "saved state is corrupt"),
            DefaultReason::UnknownVersion => write!(f, "saved state has an unknown schema version"),
            DefaultReason::StorageUnavailable => write!(f, "storage could not be read"),
        }
    }
}

impl StateSnapshot {
    pub fn empty() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            session: SessionRecord::default(),
            watchlist: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn encode(&self) -> AppResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// The version is checked before the typed parse, so a document from
    /// another schema is never partially read.
    pub fn decode(bytes: &[u8]) -> Result<Self, DefaultReason> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|_| DefaultReason::Corrupt)?;

        let version = value
            .get("schemaVersion")
            .and_then(serde_json::Value::as_u64)
            .ok_or(DefaultReason::Corrupt)?;
        if version != SNAPSHOT_SCHEMA_VERSION {
            return Err(DefaultReason::UnknownVersion);
        }

        let snapshot: StateSnapshot =
            serde_json::from_value(value).map_err(|_| DefaultReason::Corrupt)?;
        snapshot.check()?;
        Ok(snapshot)
    }

    /// A document that breaks a collection invariant counts as corrupt
    fn check(&self) -> Result<(), DefaultReason> {
        let mut seen = HashSet::new();
        if !self.watchlist.iter().all(|e| seen.insert(e.content_id)) {
            return Err(DefaultReason::Corrupt);
        }

        let mut seen = HashSet::new();
        for entry in &self.history {
            if !seen.insert(entry.content_id) || validate_position(entry.position).is_err() {
                return Err(DefaultReason::Corrupt);
            }
        }
        Ok(())
    }
}

pub struct PersistenceService {
    session_service: Arc<SessionService>,
    watchlist_service: Arc<WatchlistService>,
    history_service: Arc<WatchHistoryService>,
    snapshot_repo: Arc<dyn SnapshotRepository>,
    gate: Arc<CommitGate>,
    event_bus: Arc<EventBus>,
}

impl PersistenceService {
    pub fn new(
        session_service: Arc<SessionService>,
        watchlist_service: Arc<WatchlistService>,
        history_service: Arc<WatchHistoryService>,
        snapshot_repo: Arc<dyn SnapshotRepository>,
        gate: Arc<CommitGate>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            session_service,
            watchlist_service,
            history_service,
            snapshot_repo,
            gate,
            event_bus,
        }
    }

    /// Current durable state, read while no write can land in between
    pub fn snapshot(&self) -> AppResult<StateSnapshot> {
        let _capture = self.gate.exclusive()?;
        let user_id = self
            .session_service
            .current_session()?
            .map(|s| s.user_id());

        Ok(StateSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            session: SessionRecord { user_id },
            watchlist: self.watchlist_service.list()?,
            history: self.history_service.list()?,
        })
    }

    /// Replaces session, watchlist and history wholesale from `bytes`
    pub fn restore(&self, bytes: Option<&[u8]>) -> AppResult<RestoreOutcome> {
        let decoded = match bytes {
            None => Err(DefaultReason::Missing),
            Some(bytes) => StateSnapshot::decode(bytes),
        };

        match decoded {
            Ok(snapshot) => {
                self.apply(snapshot)?;
                log::info!("Restored saved state");
                self.event_bus.emit(StateRestored::new(false));
                Ok(RestoreOutcome::Restored)
            }
            Err(reason) => self.restore_defaults(reason),
        }
    }

    /// Reads the stored snapshot and restores it. Storage failures are
    /// absorbed like a corrupt document.
    pub fn restore_from_storage(&self) -> AppResult<RestoreOutcome> {
        match self.snapshot_repo.load() {
            Ok(bytes) => self.restore(bytes.as_deref()),
            Err(e) => {
                log::warn!("Failed to read saved state: {}", e);
                self.restore_defaults(DefaultReason::StorageUnavailable)
            }
        }
    }

    /// Encodes the current snapshot and writes it to storage
    pub fn flush(&self) -> AppResult<()> {
        let document = self.snapshot()?.encode()?;
        self.snapshot_repo
            .store(&document)
            .map_err(|e| AppError::Persistence(format!("Failed to write snapshot: {}", e)))
    }

    fn restore_defaults(&self, reason: DefaultReason) -> AppResult<RestoreOutcome> {
        if reason == DefaultReason::Missing {
            log::info!("No saved state, starting empty");
        } else {
            log::warn!("Starting with empty state: {}", reason);
        }

        self.apply(StateSnapshot::empty())?;
        self.event_bus.emit(StateRestored::new(true));
        Ok(RestoreOutcome::Defaulted(reason))
    }

    fn apply(&self, snapshot: StateSnapshot) -> AppResult<()> {
        let _replace = self.gate.exclusive()?;
        match snapshot.session.user_id {
            Some(user_id) => {
                self.session_service.resume(user_id)?;
            }
            None => self.session_service.reset()?,
        }
        self.watchlist_service.replace_all(snapshot.watchlist)?;
        self.history_service.replace_all(snapshot.history)?;
        Ok(())
    }
}
