// src/application/state.rs
//
// The single state container. Built once at startup and passed by
// reference to every caller; there are no module-level globals.

use std::sync::{Arc, Mutex, RwLock};

use uuid::Uuid;

use crate::domain::{
    ContentDraft, ContentId, ContentItem, ContentKind, ContentPatch, Session, User,
    WatchHistoryEntry, WatchlistEntry,
};
use crate::error::AppResult;
use crate::events::{ChangeNotice, EventBus, QueryChanged, SubscriptionToken};
use crate::repositories::poisoned;
use crate::services::query;
use crate::services::{
    CatalogService, ContentQuery, PersistenceService, SessionService, SnapshotFlusher,
    WatchHistoryService, WatchlistService, RELATED_LIMIT,
};

/// How many titles the "continue watching" row shows
pub const CONTINUE_WATCHING_LIMIT: usize = 10;

/// Application state shared by every command.
/// All fields are Arc-wrapped for thread-safe sharing across commands.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub catalog_service: Arc<CatalogService>,
    pub session_service: Arc<SessionService>,
    pub watchlist_service: Arc<WatchlistService>,
    pub history_service: Arc<WatchHistoryService>,
    pub persistence_service: Arc<PersistenceService>,
    pub flusher: Arc<SnapshotFlusher>,
    query: RwLock<ContentQuery>,
    flusher_token: Mutex<Option<SubscriptionToken>>,
}

impl AppState {
    pub fn new(
        event_bus: Arc<EventBus>,
        catalog_service: Arc<CatalogService>,
        session_service: Arc<SessionService>,
        watchlist_service: Arc<WatchlistService>,
        history_service: Arc<WatchHistoryService>,
        persistence_service: Arc<PersistenceService>,
        flusher: Arc<SnapshotFlusher>,
    ) -> Self {
        Self {
            event_bus,
            catalog_service,
            session_service,
            watchlist_service,
            history_service,
            persistence_service,
            flusher,
            query: RwLock::new(ContentQuery::default()),
            flusher_token: Mutex::new(None),
        }
    }

    /// Starts writing snapshots after committed changes
    pub fn attach_flusher(&self) {
        let token = self.flusher.attach(&self.event_bus);
        let previous = self
            .flusher_token
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(token);
        if let Some(previous) = previous {
            self.event_bus.unsubscribe(previous);
        }
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    pub fn add_content(&self, draft: ContentDraft) -> AppResult<ContentId> {
        self.catalog_service.add_content(draft)
    }

    pub fn update_content(&self, id: ContentId, patch: ContentPatch) -> AppResult<ContentItem> {
        self.catalog_service.update_content(id, patch)
    }

    pub fn delete_content(&self, id: ContentId) -> AppResult<()> {
        self.catalog_service.delete_content(id)
    }

    pub fn list_content(&self) -> AppResult<Vec<ContentItem>> {
        self.catalog_service.list_content()
    }

    pub fn find_content(&self, id: ContentId) -> AppResult<Option<ContentItem>> {
        self.catalog_service.get_content(id)
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    pub fn signup(&self, name: &str, email: &str, password: &str) -> AppResult<Session> {
        self.session_service.signup(name, email, password)
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        self.session_service.login(email, password).await
    }

    pub fn logout(&self) -> AppResult<()> {
        self.session_service.logout()
    }

    pub fn current_session(&self) -> AppResult<Option<Session>> {
        self.session_service.current_session()
    }

    pub fn list_users(&self) -> AppResult<Vec<User>> {
        self.session_service.list_users()
    }

    pub fn remove_user(&self, user_id: Uuid) -> AppResult<()> {
        self.session_service.remove_user(user_id)
    }

    // ------------------------------------------------------------------
    // Watchlist / history
    // ------------------------------------------------------------------

    pub fn add_to_watchlist(&self, content_id: ContentId) -> AppResult<()> {
        self.watchlist_service.add(content_id)
    }

    pub fn remove_from_watchlist(&self, content_id: ContentId) -> AppResult<()> {
        self.watchlist_service.remove(content_id)
    }

    pub fn is_in_watchlist(&self, content_id: ContentId) -> AppResult<bool> {
        self.watchlist_service.contains(content_id)
    }

    pub fn watchlist(&self) -> AppResult<Vec<WatchlistEntry>> {
        self.watchlist_service.list()
    }

    pub fn watchlist_items(&self) -> AppResult<Vec<ContentItem>> {
        self.watchlist_service.resolve(&self.list_content()?)
    }

    pub fn record_progress(&self, content_id: ContentId, position: f64) -> AppResult<WatchHistoryEntry> {
        self.history_service.record_progress(content_id, position)
    }

    pub fn watch_history(&self) -> AppResult<Vec<WatchHistoryEntry>> {
        self.history_service.list()
    }

    pub fn continue_watching(&self) -> AppResult<Vec<(ContentItem, WatchHistoryEntry)>> {
        self.history_service
            .continue_watching(&self.list_content()?, CONTINUE_WATCHING_LIMIT)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn filter(&self, query: &ContentQuery) -> AppResult<Vec<ContentItem>> {
        let contents = self.list_content()?;
        Ok(query::filter(&contents, query).cloned().collect())
    }

    pub fn by_kind(&self, kind: ContentKind) -> AppResult<Vec<ContentItem>> {
        let contents = self.list_content()?;
        Ok(query::by_kind(&contents, kind).into_iter().cloned().collect())
    }

    pub fn by_genre(&self, genre: &str) -> AppResult<Vec<ContentItem>> {
        let contents = self.list_content()?;
        Ok(query::by_genre(&contents, genre).into_iter().cloned().collect())
    }

    /// Titles shown under a record's detail page. Unknown ids have none.
    pub fn related(&self, id: ContentId) -> AppResult<Vec<ContentItem>> {
        let contents = self.list_content()?;
        let Some(item) = contents.iter().find(|c| c.id == id) else {
            return Ok(Vec::new());
        };
        Ok(query::related(&contents, item, RELATED_LIMIT)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn all_genres(&self) -> AppResult<Vec<String>> {
        Ok(query::all_genres(&self.list_content()?))
    }

    pub fn query(&self) -> AppResult<ContentQuery> {
        Ok(self.query.read().map_err(poisoned)?.clone())
    }

    pub fn set_search_query(&self, text: Option<String>) -> AppResult<()> {
        self.update_query(|q| q.text = text.filter(|t| !t.trim().is_empty()))
    }

    pub fn set_selected_genre(&self, genre: Option<String>) -> AppResult<()> {
        self.update_query(|q| q.genre = genre.filter(|g| !g.is_empty()))
    }

    /// The catalog under the current search text and genre
    pub fn browse(&self) -> AppResult<Vec<ContentItem>> {
        let query = self.query()?;
        self.filter(&query)
    }

    fn update_query<F>(&self, change: F) -> AppResult<()>
    where
        F: FnOnce(&mut ContentQuery),
    {
        let updated = {
            let mut query = self.query.write().map_err(poisoned)?;
            let before = query.clone();
            change(&mut query);
            (*query != before).then(|| query.clone())
        };

        if let Some(query) = updated {
            self.event_bus.emit(QueryChanged::new(query.text, query.genre));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Change notification / lifecycle
    // ------------------------------------------------------------------

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionToken
    where
        F: Fn(&ChangeNotice) + Send + Sync + 'static,
    {
        self.event_bus.subscribe_all(listener)
    }

    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        self.event_bus.unsubscribe(token)
    }

    /// Writes any throttled changes (navigation away, shutdown)
    pub fn flush_pending(&self) -> AppResult<bool> {
        self.flusher.flush_pending()
    }

    /// Stops background flushing and writes whatever is still pending
    pub fn shutdown(&self) -> AppResult<()> {
        self.flusher.stop();
        let token = self
            .flusher_token
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(token) = token {
            self.event_bus.unsubscribe(token);
        }
        self.flusher.flush_pending()?;
        log::info!("State container shut down");
        Ok(())
    }
}
