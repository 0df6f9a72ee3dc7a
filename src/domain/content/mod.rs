pub mod entity;
pub mod invariants;

pub use entity::{unique_genres, ContentDraft, ContentId, ContentItem, ContentKind, ContentPatch};
pub use invariants::{validate_content, validate_content_draft};
