// src/services/commit_gate.rs
//
// Session, watchlist and history live behind separate locks. Writers to any
// of them share this gate; a snapshot or a restore holds it alone, so it sees
// (or replaces) all three stores at one point in time.
//
// RULES:
// - Hold a guard only around the store write, never across `emit`
// - Take the gate before any store lock

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::AppResult;
use crate::repositories::poisoned;

#[derive(Debug, Default)]
pub struct CommitGate {
    lock: RwLock<()>,
}

impl CommitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared guard for a single durable write
    pub fn commit(&self) -> AppResult<RwLockReadGuard<'_, ()>> {
        self.lock.read().map_err(poisoned)
    }

    /// Exclusive guard for reading or replacing all durable state at once
    pub fn exclusive(&self) -> AppResult<RwLockWriteGuard<'_, ()>> {
        self.lock.write().map_err(poisoned)
    }
}
