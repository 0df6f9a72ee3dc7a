use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a catalog record. Assigned by the catalog, never by callers.
pub type ContentId = Uuid;

/// A movie or show in the catalog.
/// Watchlist and history entries reference it by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Internal immutable identifier
    pub id: ContentId,

    pub title: String,

    pub description: String,

    pub release_year: i32,

    /// Runtime in minutes
    pub duration: u32,

    pub thumbnail_url: String,

    pub video_url: String,

    pub trailer_url: String,

    #[serde(rename = "type")]
    pub kind: ContentKind,

    /// Non-empty, no repeats, first-seen order preserved
    pub genres: Vec<String>,

    /// Billing order
    pub cast: Vec<String>,

    /// Average rating in [0, 5]
    pub rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Show,
}

/// Everything a caller supplies to create a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDraft {
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub duration: u32,
    pub thumbnail_url: String,
    pub video_url: String,
    pub trailer_url: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub genres: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    pub rating: f64,
}

/// Partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub duration: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub trailer_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ContentKind>,
    pub genres: Option<Vec<String>>,
    pub cast: Option<Vec<String>>,
    pub rating: Option<f64>,
}

impl ContentItem {
    /// Create a record from a draft with a freshly assigned id
    pub fn from_draft(draft: ContentDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Create a record whose id was assigned elsewhere (external catalog sources)
    pub fn with_id(id: ContentId, draft: ContentDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            release_year: draft.release_year,
            duration: draft.duration,
            thumbnail_url: draft.thumbnail_url,
            video_url: draft.video_url,
            trailer_url: draft.trailer_url,
            kind: draft.kind,
            genres: unique_genres(draft.genres),
            cast: draft.cast,
            rating: draft.rating,
        }
    }

    /// The caller-supplied part of this record
    pub fn to_draft(&self) -> ContentDraft {
        ContentDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            release_year: self.release_year,
            duration: self.duration,
            thumbnail_url: self.thumbnail_url.clone(),
            video_url: self.video_url.clone(),
            trailer_url: self.trailer_url.clone(),
            kind: self.kind,
            genres: self.genres.clone(),
            cast: self.cast.clone(),
            rating: self.rating,
        }
    }

    /// Merge the provided fields over this record. Identity never changes.
    pub fn apply_patch(&mut self, patch: ContentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(year) = patch.release_year {
            self.release_year = year;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(url) = patch.thumbnail_url {
            self.thumbnail_url = url;
        }
        if let Some(url) = patch.video_url {
            self.video_url = url;
        }
        if let Some(url) = patch.trailer_url {
            self.trailer_url = url;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(genres) = patch.genres {
            self.genres = unique_genres(genres);
        }
        if let Some(cast) = patch.cast {
            self.cast = cast;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// Keep the first occurrence of each genre. Pickers can submit the same chip twice.
pub fn unique_genres(genres: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(genres.len());
    for genre in genres {
        if !unique.contains(&genre) {
            unique.push(genre);
        }
    }
    unique
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Movie => write!(f, "movie"),
            ContentKind::Show => write!(f, "show"),
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ContentKind::Movie),
            "show" => Ok(ContentKind::Show),
            other => Err(format!("Unknown content kind: {}", other)),
        }
    }
}
