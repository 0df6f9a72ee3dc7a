// src/services/query.rs
//
// Read-only views over the catalog. Nothing here holds state; every view is
// recomputed from the slice it is given.

use serde::{Deserialize, Serialize};

use crate::domain::content::{ContentItem, ContentKind};

/// How many related titles the detail page shows
pub const RELATED_LIMIT: usize = 12;

/// Transient browse query. Blank text and a missing genre match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQuery {
    pub text: Option<String>,
    pub genre: Option<String>,
}

impl ContentQuery {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            genre: None,
        }
    }

    pub fn genre(genre: &str) -> Self {
        Self {
            text: None,
            genre: Some(genre.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle().is_none() && self.genre_filter().is_none()
    }

    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    fn genre_filter(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }
}

/// Lazy result of [`filter`]. Clone it to walk the same results again.
#[derive(Debug, Clone)]
pub struct Filtered<'a> {
    items: std::slice::Iter<'a, ContentItem>,
    needle: Option<String>,
    genre: Option<&'a str>,
}

impl<'a> Filtered<'a> {
    fn matches(&self, item: &ContentItem) -> bool {
        let text_ok = match &self.needle {
            Some(needle) => {
                item.title.to_lowercase().contains(needle.as_str())
                    || item.description.to_lowercase().contains(needle.as_str())
            }
            None => true,
        };
        let genre_ok = self.genre.map_or(true, |g| item.has_genre(g));
        text_ok && genre_ok
    }
}

impl<'a> Iterator for Filtered<'a> {
    type Item = &'a ContentItem;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(item) = self.items.next() {
            if self.matches(item) {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.items.size_hint().1)
    }
}

/// Text matches title or description (case-insensitive); genre must be one of
/// the item's genres (exact). Input order is preserved.
pub fn filter<'a>(contents: &'a [ContentItem], query: &'a ContentQuery) -> Filtered<'a> {
    Filtered {
        items: contents.iter(),
        needle: query.needle(),
        genre: query.genre_filter(),
    }
}

pub fn by_kind(contents: &[ContentItem], kind: ContentKind) -> Vec<&ContentItem> {
    contents.iter().filter(|c| c.kind == kind).collect()
}

pub fn by_genre<'a>(contents: &'a [ContentItem], genre: &str) -> Vec<&'a ContentItem> {
    contents.iter().filter(|c| c.has_genre(genre)).collect()
}

/// Other titles sharing at least one genre with `item`
pub fn related<'a>(
    contents: &'a [ContentItem],
    item: &ContentItem,
    limit: usize,
) -> Vec<&'a ContentItem> {
    contents
        .iter()
        .filter(|c| c.id != item.id)
        .filter(|c| c.genres.iter().any(|g| item.has_genre(g)))
        .take(limit)
        .collect()
}

/// Distinct genres in first-seen order
pub fn all_genres(contents: &[ContentItem]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for genre in contents.iter().flat_map(|c| c.genres.iter()) {
        if !genres.contains(genre) {
            genres.push(genre.clone());
        }
    }
    genres
}
