// src/repositories/content_repository.rs
//
// Catalog storage. The catalog is supplied at startup and never persisted,
// so the only implementation lives in memory.

use std::sync::RwLock;

use crate::domain::content::{ContentId, ContentItem};
use crate::error::AppResult;
use crate::repositories::poisoned;

pub trait ContentRepository: Send + Sync {
    /// Replace the record with the same id in place, or append a new one
    fn save(&self, item: &ContentItem) -> AppResult<()>;
    fn get_by_id(&self, id: ContentId) -> AppResult<Option<ContentItem>>;
    /// All records in insertion order
    fn list_all(&self) -> AppResult<Vec<ContentItem>>;
    /// Returns whether a record was removed
    fn delete(&self, id: ContentId) -> AppResult<bool>;
    fn exists(&self, id: ContentId) -> AppResult<bool>;
}

#[derive(Default)]
pub struct InMemoryContentRepository {
    items: RwLock<Vec<ContentItem>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentRepository for InMemoryContentRepository {
    fn save(&self, item: &ContentItem) -> AppResult<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        Ok(())
    }

    fn get_by_id(&self, id: ContentId) -> AppResult<Option<ContentItem>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<ContentItem>> {
        Ok(self.items.read().map_err(poisoned)?.clone())
    }

    fn delete(&self, id: ContentId) -> AppResult<bool> {
        let mut items = self.items.write().map_err(poisoned)?;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() != before)
    }

    fn exists(&self, id: ContentId) -> AppResult<bool> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.iter().any(|item| item.id == id))
    }
}
