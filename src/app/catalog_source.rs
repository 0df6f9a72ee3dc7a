// src/app/catalog_source.rs
//
// Where the catalog comes from at startup. The catalog is never persisted
// with the rest of the state; a source supplies it fresh on every launch.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::content::{ContentDraft, ContentItem, ContentKind};
use crate::error::AppResult;

pub trait CatalogSource: Send + Sync {
    fn load(&self) -> AppResult<Vec<ContentItem>>;
}

/// Stable id for a catalog title, so saved watchlist and history entries
/// still point at the same record after a restart
pub fn catalog_id(title: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("streamhub:content:{}", title).as_bytes())
}

// ============================================================================
// BUILT-IN DEMO CATALOG
// ============================================================================

pub struct SeedCatalog;

struct SeedTitle {
    title: &'static str,
    description: &'static str,
    year: i32,
    duration: u32,
    kind: ContentKind,
    genres: &'static [&'static str],
    cast: &'static [&'static str],
    rating: f64,
}

const SEED_TITLES: &[SeedTitle] = &[
    SeedTitle {
        title: "The Last Horizon",
        description: "A salvage crew drifts past the edge of charted space and finds a signal that should not exist.",
        year: 2023,
        duration: 128,
        kind: ContentKind::Movie,
        genres: &["Sci-Fi", "Thriller"],
        cast: &["Maya Chen", "Idris Cole", "Lena Park"],
        rating: 4.5,
    },
    SeedTitle {
        title: "Harbor Lights",
        description: "Three generations of a fishing family try to keep their harbor town afloat.",
        year: 2021,
        duration: 52,
        kind: ContentKind::Show,
        genres: &["Drama"],
        cast: &["Ana Ruiz", "Tom Hale"],
        rating: 4.2,
    },
    SeedTitle {
        title: "Midnight Ledger",
        description: "An accountant uncovers the books of a crime family and has one night to disappear.",
        year: 2022,
        duration: 112,
        kind: ContentKind::Movie,
        genres: &["Crime", "Thriller"],
        cast: &["Jonah Reyes", "Priya Shah"],
        rating: 3.9,
    },
    SeedTitle {
        title: "Quiet Orbit",
        description: "Documentary portrait of the engineers who keep a forty year old space probe talking.",
        year: 2020,
        duration: 95,
        kind: ContentKind::Movie,
        genres: &["Documentary", "Sci-Fi"],
        cast: &["Narrated by Elise Moreau"],
        rating: 4.7,
    },
    SeedTitle {
        title: "Open Kitchen",
        description: "Chefs swap restaurants for a week and cook for strangers with whatever they find.",
        year: 2024,
        duration: 44,
        kind: ContentKind::Show,
        genres: &["Reality", "Comedy"],
        cast: &["Marco Bellini", "June Okafor"],
        rating: 3.6,
    },
    SeedTitle {
        title: "Paper Crowns",
        description: "Two rival debate teams collide at the national finals in a comedy of small stakes.",
        year: 2019,
        duration: 101,
        kind: ContentKind::Movie,
        genres: &["Comedy", "Drama"],
        cast: &["Sam Whitaker", "Noor Haddad", "Ben Ito"],
        rating: 4.0,
    },
];

impl SeedTitle {
    fn to_item(&self) -> ContentItem {
        let slug: String = self
            .title
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");

        ContentItem::with_id(
            catalog_id(self.title),
            ContentDraft {
                title: self.title.to_string(),
                description: self.description.to_string(),
                release_year: self.year,
                duration: self.duration,
                thumbnail_url: format!("https://cdn.streamhub.example/thumbs/{}.jpg", slug),
                video_url: format!("https://cdn.streamhub.example/video/{}.mp4", slug),
                trailer_url: format!("https://cdn.streamhub.example/trailers/{}.mp4", slug),
                kind: self.kind,
                genres: self.genres.iter().map(|g| g.to_string()).collect(),
                cast: self.cast.iter().map(|c| c.to_string()).collect(),
                rating: self.rating,
            },
        )
    }
}

impl CatalogSource for SeedCatalog {
    fn load(&self) -> AppResult<Vec<ContentItem>> {
        Ok(SEED_TITLES.iter().map(SeedTitle::to_item).collect())
    }
}

// ============================================================================
// JSON FILE CATALOG
// ============================================================================

/// Reads a JSON array of content records. Records without an id get one
/// derived from their title.
pub struct JsonCatalogSource {
    path: PathBuf,
}

#[derive(Deserialize)]
struct CatalogRecord {
    id: Option<Uuid>,
    #[serde(flatten)]
    draft: ContentDraft,
}

impl JsonCatalogSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn parse(bytes: &[u8]) -> AppResult<Vec<ContentItem>> {
        let records: Vec<CatalogRecord> = serde_json::from_slice(bytes)?;
        Ok(records
            .into_iter()
            .map(|r| {
                let id = r.id.unwrap_or_else(|| catalog_id(&r.draft.title));
                ContentItem::with_id(id, r.draft)
            })
            .collect())
    }
}

impl CatalogSource for JsonCatalogSource {
    fn load(&self) -> AppResult<Vec<ContentItem>> {
        let bytes = std::fs::read(&self.path)?;
        log::info!("Reading catalog from {}", self.path.display());
        Self::parse(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate_content;

    #[test]
    fn test_seed_catalog_is_valid_and_stable() {
        let first = SeedCatalog.load().unwrap();
        let second = SeedCatalog.load().unwrap();

        assert_eq!(first.len(), SEED_TITLES.len());
        assert_eq!(first, second);
        for item in &first {
            assert!(validate_content(item).is_ok(), "{} is invalid", item.title);
        }
    }

    #[test]
    fn test_json_catalog_parses_records() {
        let doc = br#"[
            {
                "id": "7d444840-9dc0-11d1-b245-5ffdce74fad2",
                "title": "Heat",
                "description": "A detective hunts a crew of thieves.",
                "releaseYear": 1995,
                "duration": 170,
                "thumbnailUrl": "https://img.example.com/heat.jpg",
                "videoUrl": "https://video.example.com/heat.mp4",
                "trailerUrl": "https://video.example.com/heat-trailer.mp4",
                "type": "movie",
                "genres": ["Crime"],
                "rating": 4.6
            },
            {
                "title": "Dune",
                "description": "A noble family takes over a desert planet.",
                "releaseYear": 2021,
                "duration": 155,
                "thumbnailUrl": "https://img.example.com/dune.jpg",
                "videoUrl": "https://video.example.com/dune.mp4",
                "trailerUrl": "https://video.example.com/dune-trailer.mp4",
                "type": "movie",
                "genres": ["Sci-Fi"],
                "cast": ["Lead"],
                "rating": 4.1
            }
        ]"#;

        let items = JsonCatalogSource::parse(doc).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].id.to_string(),
            "7d444840-9dc0-11d1-b245-5ffdce74fad2"
        );
        assert!(items[0].cast.is_empty());
        assert_eq!(items[1].id, catalog_id("Dune"));
    }

    #[test]
    fn test_json_catalog_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonCatalogSource::new(dir.path().join("missing.json"));
        assert!(source.load().is_err());
    }
}
