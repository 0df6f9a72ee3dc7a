pub mod entity;
pub mod invariants;

pub use entity::WatchHistoryEntry;
pub use invariants::validate_position;
