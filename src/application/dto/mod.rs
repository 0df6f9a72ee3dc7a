// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - Ids and timestamps travel as strings
// - Inputs are converted to domain types at the command boundary

use serde::{Deserialize, Serialize};

use crate::domain::{
    validate_content, validate_content_draft, ContentDraft, ContentItem, ContentKind, ContentPatch,
    DomainError, DomainResult, Session, User, ValidationErrors, WatchHistoryEntry, WatchlistEntry,
};
use crate::services::ContentQuery;

// ============================================================================
// CONTENT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub duration: u32,
    pub thumbnail_url: String,
    pub video_url: String,
    pub trailer_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentDto {
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub duration: u32,
    pub thumbnail_url: String,
    pub video_url: String,
    pub trailer_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub genres: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    pub rating: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub duration: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub trailer_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub genres: Option<Vec<String>>,
    pub cast: Option<Vec<String>>,
    pub rating: Option<f64>,
}

impl From<ContentItem> for ContentDto {
    fn from(item: ContentItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title,
            description: item.description,
            release_year: item.release_year,
            duration: item.duration,
            thumbnail_url: item.thumbnail_url,
            video_url: item.video_url,
            trailer_url: item.trailer_url,
            kind: item.kind.to_string(),
            genres: item.genres,
            cast: item.cast,
            rating: item.rating,
        }
    }
}

impl CreateContentDto {
    /// An unknown `type` is reported together with every other field the
    /// draft rules reject.
    pub fn into_draft(self) -> DomainResult<ContentDraft> {
        let mut errors = ValidationErrors::new();
        let kind = parse_kind(&self.kind, &mut errors);

        let draft = ContentDraft {
            kind: kind.unwrap_or(ContentKind::Movie),
            title: self.title,
            description: self.description,
            release_year: self.release_year,
            duration: self.duration,
            thumbnail_url: self.thumbnail_url,
            video_url: self.video_url,
            trailer_url: self.trailer_url,
            genres: self.genres,
            cast: self.cast,
            rating: self.rating,
        };

        if errors.is_empty() {
            return Ok(draft);
        }
        errors.merge(validate_content_draft(&draft));
        Err(DomainError::Validation(errors))
    }
}

impl UpdateContentDto {
    /// `current` is the stored record the patch merges over. An unknown `type`
    /// is reported alongside every rule the merged record breaks.
    pub fn into_patch(self, current: &ContentItem) -> DomainResult<ContentPatch> {
        let mut errors = ValidationErrors::new();
        let kind = self.kind.and_then(|k| parse_kind(&k, &mut errors));

        let patch = ContentPatch {
            kind,
            title: self.title,
            description: self.description,
            release_year: self.release_year,
            duration: self.duration,
            thumbnail_url: self.thumbnail_url,
            video_url: self.video_url,
            trailer_url: self.trailer_url,
            genres: self.genres,
            cast: self.cast,
            rating: self.rating,
        };

        if errors.is_empty() {
            return Ok(patch);
        }
        let mut merged = current.clone();
        merged.apply_patch(patch);
        errors.merge(validate_content(&merged));
        Err(DomainError::Validation(errors))
    }
}

fn parse_kind(value: &str, errors: &mut ValidationErrors) -> Option<ContentKind> {
    value
        .parse::<ContentKind>()
        .map_err(|message| errors.push("type", message))
        .ok()
}

// ============================================================================
// USER / SESSION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub user: UserDto,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        let is_admin = session.user.is_admin();
        Self {
            user: UserDto::from(session.user),
            is_admin,
        }
    }
}

// ============================================================================
// WATCHLIST / HISTORY DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntryDto {
    pub content_id: String,
    pub added_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntryDto {
    pub content_id: String,
    pub position: f64,
    pub last_watched: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordProgressDto {
    pub content_id: String,
    pub position: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueWatchingDto {
    pub content: ContentDto,
    pub position: f64,
    pub last_watched: String,
}

impl From<WatchlistEntry> for WatchlistEntryDto {
    fn from(entry: WatchlistEntry) -> Self {
        Self {
            content_id: entry.content_id.to_string(),
            added_at: entry.added_at.to_rfc3339(),
        }
    }
}

impl From<WatchHistoryEntry> for WatchHistoryEntryDto {
    fn from(entry: WatchHistoryEntry) -> Self {
        Self {
            content_id: entry.content_id.to_string(),
            position: entry.position,
            last_watched: entry.last_watched.to_rfc3339(),
        }
    }
}

impl From<(ContentItem, WatchHistoryEntry)> for ContinueWatchingDto {
    fn from((item, entry): (ContentItem, WatchHistoryEntry)) -> Self {
        Self {
            content: ContentDto::from(item),
            position: entry.position,
            last_watched: entry.last_watched.to_rfc3339(),
        }
    }
}

// ============================================================================
// QUERY DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryDto {
    pub text: Option<String>,
    pub genre: Option<String>,
}

impl From<QueryDto> for ContentQuery {
    fn from(dto: QueryDto) -> Self {
        ContentQuery {
            text: dto.text,
            genre: dto.genre,
        }
    }
}

impl From<ContentQuery> for QueryDto {
    fn from(query: ContentQuery) -> Self {
        Self {
            text: query.text,
            genre: query.genre,
        }
    }
}
