// events/bus/event_bus.rs
//
// Core event bus implementation.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - handlers execute immediately, after the change is committed
// 2. Deterministic - handlers run in subscription order
// 3. Observable - every emission is logged
// 4. Type-safe - events are strongly typed
// 5. Revocable - every subscription returns a token that can unsubscribe it

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::events::types::{ChangeNotice, DomainEvent};

/// Type-erased event handler function
/// Takes a reference to Any (downcasted to concrete event type inside)
type EventHandler = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Handler that hears every event regardless of type
type ChangeListener = Arc<dyn Fn(&ChangeNotice) + Send + Sync>;

/// Most recent emissions kept for debugging
const EVENT_LOG_CAPACITY: usize = 256;

/// Handle returned by every subscription; pass it to `unsubscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionToken(u64);

/// The Event Bus
///
/// This is the central coordination point for all domain events.
/// Services emit after committing; views and the persistence flusher
/// subscribe without direct dependencies on the services.
///
/// Handlers are invoked without any bus lock held, so a handler may
/// subscribe, unsubscribe or read state freely.
pub struct EventBus {
    /// Map from event TypeId to list of handlers
    handlers: Arc<RwLock<HashMap<TypeId, Vec<(SubscriptionToken, EventHandler)>>>>,

    /// Listeners for every event
    listeners: Arc<RwLock<Vec<(SubscriptionToken, ChangeListener)>>>,

    next_token: Arc<AtomicU64>,

    /// Event emission log (for debugging)
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
}

/// A logged event for debugging and tracing
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            listeners: Arc::new(RwLock::new(Vec::new())),
            next_token: Arc::new(AtomicU64::new(1)),
            event_log: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    fn issue_token(&self) -> SubscriptionToken {
        SubscriptionToken(self.next_token.fetch_add(1, Ordering::Relaxed))
    }

    /// Subscribe to a specific event type
    ///
    /// Handlers are executed in the order they are subscribed.
    ///
    /// Example:
    /// ```ignore
    /// bus.subscribe::<ContentAdded, _>(|event| {
    ///     println!("Content added: {}", event.title);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F) -> SubscriptionToken
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();
        let token = self.issue_token();

        // Wrap the typed handler in a type-erased closure
        let wrapped: EventHandler = Arc::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        handlers.entry(type_id).or_default().push((token, wrapped));
        token
    }

    /// Subscribe to every committed change, whatever its type
    pub fn subscribe_all<F>(&self, listener: F) -> SubscriptionToken
    where
        F: Fn(&ChangeNotice) + Send + Sync + 'static,
    {
        let token = self.issue_token();
        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        listeners.push((token, Arc::new(listener)));
        token
    }

    /// Remove a subscription. Returns false if the token was unknown
    /// (already removed, or issued by another bus).
    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        {
            let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
            if let Some(pos) = listeners.iter().position(|(t, _)| *t == token) {
                listeners.remove(pos);
                return true;
            }
        }

        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        for list in handlers.values_mut() {
            if let Some(pos) = list.iter().position(|(t, _)| *t == token) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Emit an event
    ///
    /// This will:
    /// 1. Log the event
    /// 2. Execute all typed handlers for this event type (in subscription order)
    /// 3. Execute all change listeners (in subscription order)
    ///
    /// If a handler panics, the panic is caught and logged, but other handlers
    /// still execute.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let type_id = TypeId::of::<E>();

        // Snapshot the handler lists so no lock is held while they run
        let typed: Vec<EventHandler> = {
            let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
            handlers
                .get(&type_id)
                .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };
        let listeners: Vec<ChangeListener> = {
            let listeners = self.listeners.read().unwrap_or_else(|e| e.into_inner());
            listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        let log_entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count: typed.len() + listeners.len(),
        };

        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            log_entry.event_type,
            log_entry.event_id,
            log_entry.handler_count
        );

        {
            let mut log = self.event_log.write().unwrap_or_else(|e| e.into_inner());
            if log.len() == EVENT_LOG_CAPACITY {
                log.pop_front();
            }
            log.push_back(log_entry);
        }

        for (idx, handler) in typed.iter().enumerate() {
            // Catch panics to prevent one handler from breaking others
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(&event as &dyn Any);
            }));
            if result.is_err() {
                log::error!("Handler {} for {} panicked", idx, event.event_type());
            }
        }

        let notice = ChangeNotice::of(&event);
        for (idx, listener) in listeners.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener(&notice);
            }));
            if result.is_err() {
                log::error!("Listener {} for {} panicked", idx, notice.event_type);
            }
        }
    }

    /// Get the event log (for debugging)
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    /// Clear the event log
    pub fn clear_event_log(&self) {
        self.event_log
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Get the number of subscribers for a specific event type
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let type_id = TypeId::of::<E>();
        let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
        handlers.get(&type_id).map(|h| h.len()).unwrap_or(0)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Make EventBus cloneable (shared reference)
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            listeners: Arc::clone(&self.listeners),
            next_token: Arc::clone(&self.next_token),
            event_log: Arc::clone(&self.event_log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    #[test]
    fn test_subscribe_and_emit() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        bus.subscribe::<ContentAdded, _>(move |_event| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(ContentAdded::new(Uuid::new_v4(), "Heat".to_string()));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multiple_handlers_execute_in_order() {
        let bus = EventBus::new();
        let sequence = Arc::new(RwLock::new(Vec::new()));

        for n in 1..=3 {
            let seq = Arc::clone(&sequence);
            bus.subscribe::<AddedToWatchlist, _>(move |_| {
                seq.write().unwrap().push(n);
            });
        }

        bus.emit(AddedToWatchlist::new(Uuid::new_v4()));

        let result = sequence.read().unwrap();
        assert_eq!(*result, vec![1, 2, 3]);
    }

    #[test]
    fn test_change_listener_hears_every_type() {
        let bus = EventBus::new();
        let seen = Arc::new(RwLock::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);

        bus.subscribe_all(move |notice| {
            seen_clone.write().unwrap().push(notice.topic);
        });

        bus.emit(ContentDeleted::new(Uuid::new_v4()));
        bus.emit(ProgressRecorded::new(Uuid::new_v4(), 3.0));

        assert_eq!(
            *seen.read().unwrap(),
            vec![ChangeTopic::Catalog, ChangeTopic::History]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c1 = Arc::clone(&counter);
        let typed = bus.subscribe::<ContentUpdated, _>(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        let c2 = Arc::clone(&counter);
        let any = bus.subscribe_all(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        });

        bus.emit(ContentUpdated::new(Uuid::new_v4()));
        assert_eq!(counter.load(Ordering::SeqCst), 11);

        assert!(bus.unsubscribe(typed));
        assert!(bus.unsubscribe(any));
        assert!(!bus.unsubscribe(any));

        bus.emit(ContentUpdated::new(Uuid::new_v4()));
        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn test_handler_may_unsubscribe_itself() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let slot: Arc<RwLock<Option<SubscriptionToken>>> = Arc::new(RwLock::new(None));

        let bus_clone = bus.clone();
        let slot_clone = Arc::clone(&slot);
        let counter_clone = Arc::clone(&counter);
        let token = bus.subscribe_all(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
            if let Some(token) = *slot_clone.read().unwrap() {
                bus_clone.unsubscribe(token);
            }
        });
        *slot.write().unwrap() = Some(token);

        bus.emit(SessionClosed::new(Uuid::new_v4()));
        bus.emit(SessionClosed::new(Uuid::new_v4()));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_log_records_emissions() {
        let bus = EventBus::new();

        bus.emit(ContentAdded::new(Uuid::new_v4(), "Heat".to_string()));
        bus.emit(AddedToWatchlist::new(Uuid::new_v4()));

        let log = bus.get_event_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event_type, "ContentAdded");
        assert_eq!(log[1].event_type, "AddedToWatchlist");
    }

    #[test]
    fn test_event_log_is_bounded() {
        let bus = EventBus::new();
        for _ in 0..(EVENT_LOG_CAPACITY + 10) {
            bus.emit(ProgressRecorded::new(Uuid::new_v4(), 1.0));
        }
        assert_eq!(bus.get_event_log().len(), EVENT_LOG_CAPACITY);
    }

    #[test]
    fn test_subscriber_count() {
        let bus = EventBus::new();

        assert_eq!(bus.subscriber_count::<ContentAdded>(), 0);

        bus.subscribe::<ContentAdded, _>(|_| {});
        assert_eq!(bus.subscriber_count::<ContentAdded>(), 1);

        bus.subscribe::<ContentAdded, _>(|_| {});
        assert_eq!(bus.subscriber_count::<ContentAdded>(), 2);

        // Different event type
        assert_eq!(bus.subscriber_count::<ContentDeleted>(), 0);
    }

    #[test]
    fn test_handler_panic_doesnt_break_bus() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe::<ContentAdded, _>(|_| {
            panic!("Intentional panic");
        });

        let counter_clone = Arc::clone(&counter);
        bus.subscribe::<ContentAdded, _>(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(ContentAdded::new(Uuid::new_v4(), "Test".to_string()));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
