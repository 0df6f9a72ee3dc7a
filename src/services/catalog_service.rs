// src/services/catalog_service.rs
use crate::domain::content::{
    unique_genres, validate_content, validate_content_draft, ContentDraft, ContentId, ContentItem,
    ContentPatch,
};
use crate::error::{AppError, AppResult};
use crate::events::{CatalogLoaded, ContentAdded, ContentDeleted, ContentUpdated, EventBus};
use crate::repositories::ContentRepository;
use std::sync::Arc;

pub struct CatalogService {
    content_repo: Arc<dyn ContentRepository>,
    event_bus: Arc<EventBus>,
}

impl CatalogService {
    pub fn new(content_repo: Arc<dyn ContentRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            content_repo,
            event_bus,
        }
    }

    /// Validates the draft, assigns a fresh id and appends the record
    pub fn add_content(&self, draft: ContentDraft) -> AppResult<ContentId> {
        validate_content_draft(&draft).map_err(AppError::Domain)?;

        let item = ContentItem::from_draft(draft);
        self.content_repo.save(&item)?;

        self.event_bus
            .emit(ContentAdded::new(item.id, item.title.clone()));

        Ok(item.id)
    }

    /// Merges the patch over the stored record. A merge that breaks a rule
    /// is rejected and the stored record stays as it was.
    pub fn update_content(&self, id: ContentId, patch: ContentPatch) -> AppResult<ContentItem> {
        let current = self
            .content_repo
            .get_by_id(id)?
            .ok_or_else(|| AppError::not_found("Content", id))?;

        let mut merged = current.clone();
        merged.apply_patch(patch);
        validate_content(&merged).map_err(AppError::Domain)?;

        if merged == current {
            return Ok(current);
        }

        self.content_repo.save(&merged)?;
        self.event_bus.emit(ContentUpdated::new(id));

        Ok(merged)
    }

    /// Idempotent. Watchlist and history entries pointing at the record are left alone.
    pub fn delete_content(&self, id: ContentId) -> AppResult<()> {
        if self.content_repo.delete(id)? {
            self.event_bus.emit(ContentDeleted::new(id));
        }
        Ok(())
    }

    pub fn get_content(&self, id: ContentId) -> AppResult<Option<ContentItem>> {
        self.content_repo.get_by_id(id)
    }

    /// Catalog in insertion order
    pub fn list_content(&self) -> AppResult<Vec<ContentItem>> {
        self.content_repo.list_all()
    }

    /// Installs records supplied by an external catalog source.
    /// Invalid records and ids already present are skipped.
    pub fn load_catalog(&self, items: Vec<ContentItem>) -> AppResult<usize> {
        let mut installed = 0;
        let mut skipped = 0;

        for mut item in items {
            item.genres = unique_genres(std::mem::take(&mut item.genres));

            if let Err(e) = validate_content(&item) {
                log::warn!("Skipping catalog item '{}' ({}): {}", item.title, item.id, e);
                skipped += 1;
                continue;
            }

            if self.content_repo.exists(item.id)? {
                log::warn!("Skipping catalog item '{}': id {} already present", item.title, item.id);
                skipped += 1;
                continue;
            }

            self.content_repo.save(&item)?;
            installed += 1;
        }

        log::info!("Catalog loaded: {} installed, {} skipped", installed, skipped);
        self.event_bus.emit(CatalogLoaded::new(installed, skipped));

        Ok(installed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentKind;
    use crate::events::ContentAdded;
    use crate::repositories::InMemoryContentRepository;
    use crate::test_support::{sample_draft, sample_item};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service() -> (CatalogService, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        let service = CatalogService::new(Arc::new(InMemoryContentRepository::new()), bus.clone());
        (service, bus)
    }

    #[test]
    fn test_add_assigns_id_and_stores_draft() {
        let (service, _) = service();
        let draft = sample_draft("Arrival", &["Sci-Fi", "Drama"]);

        let id = service.add_content(draft.clone()).unwrap();
        let stored = service.get_content(id).unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.to_draft(), draft);
    }

    #[test]
    fn test_repeated_genres_collapse_on_add_and_update() {
        let (service, _) = service();
        let id = service
            .add_content(sample_draft("Heat", &["Crime", "Drama", "Crime"]))
            .unwrap();
        assert_eq!(service.get_content(id).unwrap().unwrap().genres, vec!["Crime", "Drama"]);

        let updated = service
            .update_content(
                id,
                ContentPatch {
                    genres: Some(vec!["Thriller".into(), "Thriller".into()]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.genres, vec!["Thriller"]);
    }

    #[test]
    fn test_add_invalid_draft_stores_nothing() {
        let (service, bus) = service();
        let mut draft = sample_draft("", &["Drama"]);
        draft.rating = 9.0;

        let err = service.add_content(draft).unwrap_err();
        let fields: Vec<String> = err
            .violations()
            .unwrap()
            .iter()
            .map(|v| v.field.clone())
            .collect();

        assert_eq!(fields, vec!["title", "rating"]);
        assert!(service.list_content().unwrap().is_empty());
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let (service, _) = service();
        let a = service.add_content(sample_draft("Same", &["Drama"])).unwrap();
        let b = service.add_content(sample_draft("Same", &["Drama"])).unwrap();
        assert_ne!(a, b);
        assert_eq!(service.list_content().unwrap().len(), 2);
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let (service, _) = service();
        let id = service.add_content(sample_draft("Heat", &["Crime"])).unwrap();

        let updated = service
            .update_content(
                id,
                ContentPatch {
                    rating: Some(4.8),
                    kind: Some(ContentKind::Show),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.title, "Heat");
        assert_eq!(updated.rating, 4.8);
        assert_eq!(updated.kind, ContentKind::Show);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let (service, _) = service();
        let err = service
            .update_content(uuid::Uuid::new_v4(), ContentPatch::default())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_invalid_update_leaves_record_unchanged() {
        let (service, _) = service();
        let id = service.add_content(sample_draft("Heat", &["Crime"])).unwrap();
        let before = service.get_content(id).unwrap().unwrap();

        let err = service
            .update_content(
                id,
                ContentPatch {
                    title: Some("Heat 2".to_string()),
                    genres: Some(vec![]),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(service.get_content(id).unwrap().unwrap(), before);
    }

    #[test]
    fn test_noop_update_emits_nothing() {
        let (service, bus) = service();
        let id = service.add_content(sample_draft("Heat", &["Crime"])).unwrap();
        bus.clear_event_log();

        service.update_content(id, ContentPatch::default()).unwrap();
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (service, bus) = service();
        let id = service.add_content(sample_draft("Heat", &["Crime"])).unwrap();
        bus.clear_event_log();

        service.delete_content(id).unwrap();
        service.delete_content(id).unwrap();

        assert!(service.get_content(id).unwrap().is_none());
        assert_eq!(bus.get_event_log().len(), 1);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let (service, _) = service();
        for title in ["One", "Two", "Three"] {
            service.add_content(sample_draft(title, &["Drama"])).unwrap();
        }
        let titles: Vec<String> = service
            .list_content()
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_load_catalog_skips_invalid_and_duplicate_ids() {
        let (service, bus) = service();
        let good = sample_item("Good", &["Drama"]);
        let mut bad = sample_item("Bad", &["Drama"]);
        bad.duration = 0;

        let installed = service
            .load_catalog(vec![good.clone(), bad, good.clone()])
            .unwrap();

        assert_eq!(installed, 1);
        assert_eq!(service.list_content().unwrap(), vec![good]);
        assert_eq!(bus.get_event_log().len(), 1);
    }

    #[test]
    fn test_add_notifies_subscribers() {
        let (service, bus) = service();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        bus.subscribe::<ContentAdded, _>(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        service.add_content(sample_draft("Heat", &["Crime"])).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
