use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider page size is fixed at 10 results per page.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
    Episode,
    Other,
}

impl MediaKind {
    /// Parses the provider `Type` field; anything unrecognized maps to `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "movie" => Self::Movie,
            "series" => Self::Series,
            "episode" => Self::Episode,
            _ => Self::Other,
        }
    }

    /// Value for the provider `type` query parameter. `Other` is a parse
    /// fallback only; the provider accepts no such value, so it composes no
    /// filter.
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            Self::Movie => Some("movie"),
            Self::Series => Some("series"),
            Self::Episode => Some("episode"),
            Self::Other => None,
        }
    }
}

/// One catalog entry as returned by a search page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    /// 4-digit year, or a range like "2019–2021" for series.
    pub year: String,
    /// Empty string when the provider has no image.
    pub poster_url: String,
    pub kind: MediaKind,
}

/// One third-party score, e.g. `{"Internet Movie Database", "9.3/10"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub source: String,
    pub value: String,
}

/// Full record for a single title. Fields the provider marks unavailable are
/// empty strings, never the wire sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub rated: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    pub poster_url: String,
    pub ratings: Vec<ScoreEntry>,
    pub metascore: String,
    pub imdb_rating: String,
    pub imdb_votes: String,
    pub kind: MediaKind,
    pub box_office: String,
    pub production: String,
}

impl MovieDetail {
    /// Projects the detail back down to its listing shape.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster_url: self.poster_url.clone(),
            kind: self.kind,
        }
    }
}

/// A bookmark. The only entity with cross-session durability. Persists as
/// `{"movieId": …, "addedAt": …}` with an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRef {
    pub movie_id: String,
    pub added_at: DateTime<Utc>,
}

/// Optional narrowing of a search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub year: Option<String>,
    pub kind: Option<MediaKind>,
}

/// One page of normalized results plus derived pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub items: Vec<MovieSummary>,
    pub total_results: u32,
    pub total_pages: u32,
}

impl PageResult {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_results: 0,
            total_pages: 0,
        }
    }

    pub fn paged(items: Vec<MovieSummary>, total_results: u32) -> Self {
        Self {
            items,
            total_results,
            total_pages: total_results.div_ceil(PAGE_SIZE),
        }
    }
}
