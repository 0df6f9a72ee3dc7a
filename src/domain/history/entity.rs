use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::content::ContentId;

/// Last reported playback position for one catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntry {
    pub content_id: ContentId,

    /// Seconds from the start of the video
    pub position: f64,

    pub last_watched: DateTime<Utc>,
}

impl WatchHistoryEntry {
    pub fn new(content_id: ContentId, position: f64) -> Self {
        Self {
            content_id,
            position,
            last_watched: Utc::now(),
        }
    }

    /// Overwrite with the latest report. Earlier positions are accepted:
    /// seeking backwards is a normal thing for a viewer to do.
    pub fn record(&mut self, position: f64) {
        self.position = position;
        self.last_watched = Utc::now();
    }
}
