use std::sync::OnceLock;

use chrono::{Datelike, Utc};
use regex::Regex;

use super::entity::{ContentDraft, ContentItem};
use crate::domain::{DomainResult, ValidationErrors};

pub const MIN_RELEASE_YEAR: i32 = 1900;
/// How far into the future a release year may be announced
pub const MAX_YEARS_AHEAD: i32 = 5;
pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MAX_RATING: f64 = 5.0;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://[^\s/?#]+\.[^\s/?#]+(?::\d+)?(?:[/?#]\S*)?$")
            .expect("url pattern is a valid regex")
    })
}

/// Validates a draft and reports every violated field, not just the first
pub fn validate_content_draft(draft: &ContentDraft) -> DomainResult<()> {
    let mut errors = ValidationErrors::new();

    if draft.title.trim().is_empty() {
        errors.push("title", "Title is required");
    }

    if draft.description.chars().count() < MIN_DESCRIPTION_LEN {
        errors.push(
            "description",
            format!("Description must be at least {} characters", MIN_DESCRIPTION_LEN),
        );
    }

    let max_year = Utc::now().year() + MAX_YEARS_AHEAD;
    if draft.release_year < MIN_RELEASE_YEAR || draft.release_year > max_year {
        errors.push(
            "release_year",
            format!("Release year must be between {} and {}", MIN_RELEASE_YEAR, max_year),
        );
    }

    if draft.duration < 1 {
        errors.push("duration", "Duration must be at least 1 minute");
    }

    for (field, url) in [
        ("thumbnail_url", &draft.thumbnail_url),
        ("video_url", &draft.video_url),
        ("trailer_url", &draft.trailer_url),
    ] {
        if !url_pattern().is_match(url) {
            errors.push(field, "Please enter a valid URL");
        }
    }

    validate_genres(&draft.genres, &mut errors);

    if !draft.rating.is_finite() || draft.rating < 0.0 || draft.rating > MAX_RATING {
        errors.push("rating", "Rating must be between 0 and 5");
    }

    errors.into_result()
}

/// Stored records obey the same rules as drafts
pub fn validate_content(item: &ContentItem) -> DomainResult<()> {
    validate_content_draft(&item.to_draft())
}

fn validate_genres(genres: &[String], errors: &mut ValidationErrors) {
    if genres.is_empty() {
        errors.push("genres", "Select at least one genre");
        return;
    }

    if genres.iter().any(|g| g.trim().is_empty()) {
        errors.push("genres", "Genre names cannot be blank");
    }
}

/// Invariants that must hold true for the Content domain:
///
/// 1. Identity is assigned by the catalog and never changes
/// 2. Title is not blank
/// 3. Description has at least 10 characters
/// 4. Release year lies in [1900, current year + 5]
/// 5. Duration is at least one minute
/// 6. All three URLs are absolute http(s) locators
/// 7. Genres form a non-empty set (repeats collapse when the record is built)
/// 8. Rating lies in [0, 5]
