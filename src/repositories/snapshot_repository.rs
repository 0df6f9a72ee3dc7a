// src/repositories/snapshot_repository.rs
//
// Raw storage for the persisted state document.
// The repository stores and returns opaque bytes; decoding and version
// checks belong to the persistence service.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::db::ConnectionPool;
use crate::error::AppResult;
use crate::repositories::poisoned;

/// Slot name under which the application state document is stored
pub const DEFAULT_SLOT: &str = "app-state";

#[cfg_attr(test, mockall::automock)]
pub trait SnapshotRepository: Send + Sync {
    /// `None` when nothing was ever stored
    fn load(&self) -> AppResult<Option<Vec<u8>>>;
    /// Replace the stored document in one write
    fn store(&self, document: &[u8]) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

pub struct SqliteSnapshotRepository {
    pool: Arc<ConnectionPool>,
    slot: String,
}

impl SqliteSnapshotRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self::with_slot(pool, DEFAULT_SLOT)
    }

    pub fn with_slot(pool: Arc<ConnectionPool>, slot: &str) -> Self {
        Self {
            pool,
            slot: slot.to_string(),
        }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository {
    fn load(&self) -> AppResult<Option<Vec<u8>>> {
        let conn = self.pool.get()?;
        let document = conn
            .query_row(
                "SELECT document FROM state_snapshot WHERE slot = ?1",
                params![self.slot],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(document)
    }

    fn store(&self, document: &[u8]) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR REPLACE INTO state_snapshot (slot, document, written_at)
             VALUES (?1, ?2, ?3)",
            params![self.slot, document, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "DELETE FROM state_snapshot WHERE slot = ?1",
            params![self.slot],
        )?;
        Ok(())
    }
}

/// Process-local storage, for tests and for running without a database
#[derive(Default)]
pub struct InMemorySnapshotRepository {
    document: RwLock<Option<Vec<u8>>>,
    writes: RwLock<usize>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load bytes, as if a previous run had written them
    pub fn with_document(document: &[u8]) -> Self {
        Self {
            document: RwLock::new(Some(document.to_vec())),
            writes: RwLock::new(0),
        }
    }

    /// Number of successful `store` calls
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|w| *w).unwrap_or(0)
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn load(&self) -> AppResult<Option<Vec<u8>>> {
        Ok(self.document.read().map_err(poisoned)?.clone())
    }

    fn store(&self, document: &[u8]) -> AppResult<()> {
        *self.document.write().map_err(poisoned)? = Some(document.to_vec());
        *self.writes.write().map_err(poisoned)? += 1;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.document.write().map_err(poisoned)? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool, get_connection, initialize_database};

    fn sqlite_repo(dir: &tempfile::TempDir) -> SqliteSnapshotRepository {
        let pool = create_connection_pool(&dir.path().join("state.db")).unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        SqliteSnapshotRepository::new(Arc::new(pool))
    }

    #[test]
    fn test_sqlite_missing_slot_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = sqlite_repo(&dir);
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn test_sqlite_store_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let repo = sqlite_repo(&dir);

        repo.store(b"first").unwrap();
        repo.store(b"second").unwrap();
        assert_eq!(repo.load().unwrap(), Some(b"second".to_vec()));

        repo.clear().unwrap();
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn test_sqlite_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        sqlite_repo(&dir).store(b"{\"schemaVersion\":1}").unwrap();

        let reopened = sqlite_repo(&dir);
        assert_eq!(
            reopened.load().unwrap(),
            Some(b"{\"schemaVersion\":1}".to_vec())
        );
    }

    #[test]
    fn test_slots_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let pool = Arc::new(create_connection_pool(&dir.path().join("state.db")).unwrap());
        initialize_database(&get_connection(&pool).unwrap()).unwrap();

        let a = SqliteSnapshotRepository::with_slot(Arc::clone(&pool), "a");
        let b = SqliteSnapshotRepository::with_slot(pool, "b");
        a.store(b"one").unwrap();

        assert_eq!(b.load().unwrap(), None);
    }

    #[test]
    fn test_in_memory_counts_writes() {
        let repo = InMemorySnapshotRepository::new();
        repo.store(b"x").unwrap();
        repo.store(b"y").unwrap();
        assert_eq!(repo.write_count(), 2);
        assert_eq!(repo.load().unwrap(), Some(b"y".to_vec()));
    }
}
