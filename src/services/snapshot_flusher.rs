// src/services/snapshot_flusher.rs
//
// Writes the durable snapshot after committed changes.
//
// Progress reports arrive many times per second during playback, so history
// changes only mark the snapshot dirty and write at most once per window
// (the first report in a quiet window writes straight away). Every other
// durable change writes immediately. A periodic task and explicit
// `flush_pending` calls pick up whatever is still dirty.

use std::sync::{Arc, Mutex, Weak};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use super::persistence_service::PersistenceService;
use crate::error::AppResult;
use crate::events::{ChangeTopic, EventBus, SubscriptionToken};

#[derive(Debug, Clone)]
pub struct FlushPolicy {
    pub window: Duration,
}

impl Default for FlushPolicy {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Default)]
struct FlushState {
    dirty: bool,
    last_flush: Option<Instant>,
    flush_count: usize,
}

pub struct SnapshotFlusher {
    persistence: Arc<PersistenceService>,
    policy: FlushPolicy,
    state: Mutex<FlushState>,
    task_handle: Mutex<Option<JoinHandle<()>>>,
}

impl SnapshotFlusher {
    pub fn new(persistence: Arc<PersistenceService>, policy: FlushPolicy) -> Self {
        Self {
            persistence,
            policy,
            state: Mutex::new(FlushState::default()),
            task_handle: Mutex::new(None),
        }
    }

    /// Listens to every change on `bus`. The subscription holds only a weak
    /// reference, so dropping the flusher silences it.
    pub fn attach(self: &Arc<Self>, bus: &EventBus) -> SubscriptionToken {
        let weak: Weak<Self> = Arc::downgrade(self);
        bus.subscribe_all(move |notice| {
            if let Some(flusher) = weak.upgrade() {
                flusher.on_change(notice.topic);
            }
        })
    }

    pub fn on_change(&self, topic: ChangeTopic) {
        match topic {
            ChangeTopic::History => {
                let due = {
                    let mut state = self.lock_state();
                    state.dirty = true;
                    state
                        .last_flush
                        .map_or(true, |at| at.elapsed() >= self.policy.window)
                };
                if due {
                    let _ = self.flush_now();
                }
            }
            ChangeTopic::Session | ChangeTopic::Watchlist | ChangeTopic::Restore => {
                self.lock_state().dirty = true;
                let _ = self.flush_now();
            }
            ChangeTopic::Catalog | ChangeTopic::Directory | ChangeTopic::Query => {}
        }
    }

    /// Writes only if something changed since the last successful write
    pub fn flush_pending(&self) -> AppResult<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.flush_now().map(|_| true)
    }

    /// Writes unconditionally. A failed write leaves the snapshot dirty.
    pub fn flush_now(&self) -> AppResult<()> {
        let mut state = self.lock_state();
        match self.persistence.flush() {
            Ok(()) => {
                state.dirty = false;
                state.last_flush = Some(Instant::now());
                state.flush_count += 1;
                log::debug!("Snapshot flushed ({} total)", state.flush_count);
                Ok(())
            }
            Err(e) => {
                state.dirty = true;
                log::error!("Snapshot flush failed: {}", e);
                Err(e)
            }
        }
    }

    /// Flushes pending changes every window until `stop` is called
    pub fn spawn_periodic(self: &Arc<Self>) {
        self.stop();

        let weak = Arc::downgrade(self);
        let interval = self.policy.window;

        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let Some(flusher) = weak.upgrade() else {
                    break;
                };
                let _ = flusher.flush_pending();
            }
        });

        *self
            .task_handle
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(task);
    }

    pub fn stop(&self) {
        let mut handle = self.task_handle.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(task) = handle.take() {
            task.abort();
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.lock_state().dirty
    }

    pub fn flush_count(&self) -> usize {
        self.lock_state().flush_count
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FlushState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for SnapshotFlusher {
    fn drop(&mut self) {
        self.stop();
    }
}
