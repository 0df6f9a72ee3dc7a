use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::content::ContentId;

/// "Watch later" marker for one catalog record.
/// The watchlist holds at most one entry per content id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub content_id: ContentId,
    pub added_at: DateTime<Utc>,
}

impl WatchlistEntry {
    pub fn new(content_id: ContentId) -> Self {
        Self {
            content_id,
            added_at: Utc::now(),
        }
    }
}
