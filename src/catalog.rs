use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::models::{MediaKind, MovieDetail, MovieSummary, PageResult, SearchFilters};
use crate::normalize;
use crate::omdb::OmdbApi;

/// Broad franchise terms the popular listing rotates through. The pick is
/// random on purpose: the intent is "some popular-ish results", not a stable
/// chart.
pub const POPULAR_TERMS: [&str; 10] = [
    "Marvel",
    "Star Wars",
    "Batman",
    "Spider",
    "Avengers",
    "Superman",
    "Iron Man",
    "Thor",
    "Captain America",
    "Harry Potter",
];

/// Acclaimed titles shown on the featured shelf.
pub const FEATURED_IDS: [&str; 6] = [
    "tt0111161", // The Shawshank Redemption
    "tt0068646", // The Godfather
    "tt0468569", // The Dark Knight
    "tt0167260", // The Lord of the Rings: The Return of the King
    "tt0110912", // Pulp Fiction
    "tt0050083", // 12 Angry Men
];

/// Stop accumulating actor-search matches once this many are collected.
const ACTOR_RESULT_TARGET: usize = 10;
/// Detail lookups are the expensive part, so only the first candidates of
/// each strategy page are examined.
const ACTOR_CANDIDATE_CAP: usize = 15;

/// Well-known actor -> a title they are strongly associated with, used as a
/// last-resort search term when name-based strategies come up short.
pub type SignatureTitles = HashMap<String, String>;

static DEFAULT_SIGNATURE_TITLES: Lazy<SignatureTitles> = Lazy::new(|| {
    [
        ("tom hanks", "Forrest Gump"),
        ("leonardo dicaprio", "Inception"),
        ("brad pitt", "Fight Club"),
        ("morgan freeman", "The Shawshank Redemption"),
        ("al pacino", "The Godfather"),
        ("tom cruise", "Mission: Impossible"),
        ("will smith", "Men in Black"),
        ("johnny depp", "Pirates of the Caribbean"),
        ("keanu reeves", "The Matrix"),
        ("scarlett johansson", "Lucy"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
});

/// Orchestrates provider queries and normalization. Holds no request state:
/// every call is independent, and no retry happens at this layer.
pub struct CatalogService {
    api: Arc<dyn OmdbApi>,
    signature_titles: SignatureTitles,
}

impl CatalogService {
    pub fn new(api: Arc<dyn OmdbApi>) -> Self {
        Self::with_signature_titles(api, DEFAULT_SIGNATURE_TITLES.clone())
    }

    /// Swaps the known-actor bootstrap table, e.g. to extend the curated set.
    pub fn with_signature_titles(api: Arc<dyn OmdbApi>, signature_titles: SignatureTitles) -> Self {
        Self {
            api,
            signature_titles,
        }
    }

    /// A page of popular-ish movies via a random broad search term.
    pub async fn get_popular(&self, page: u32) -> Result<PageResult, CatalogError> {
        let term = POPULAR_TERMS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("Marvel");
        let filters = SearchFilters {
            year: None,
            kind: Some(MediaKind::Movie),
        };
        self.search(term, page, &filters).await
    }

    /// Title search. An empty query returns an empty page without touching
    /// the network, and a provider "no results" body is normal data.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        filters: &SearchFilters,
    ) -> Result<PageResult, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(PageResult::empty());
        }

        let raw = self.api.search(query, page, filters).await?;
        if !raw.is_success() {
            debug!(query = %query, error = ?raw.error, "provider returned no results");
            return Ok(PageResult::empty());
        }

        let items: Vec<MovieSummary> = raw.results.iter().map(normalize::to_summary).collect();
        let total_results = raw
            .total_results
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        Ok(PageResult::paged(items, total_results))
    }

    /// Full detail for one id. An unknown id is `NotFound`, which stays
    /// distinct from transport failure.
    pub async fn get_by_id(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        let raw = self.api.get_by_id(id).await?;
        if !raw.is_success() {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        Ok(normalize::to_detail(&raw))
    }

    /// Approximate browse-by-year: a generic term plus the year filter.
    pub async fn get_by_year(&self, year: &str, page: u32) -> Result<PageResult, CatalogError> {
        let filters = SearchFilters {
            year: Some(year.to_string()),
            kind: Some(MediaKind::Movie),
        };
        self.search("movie", page, &filters).await
    }

    /// The fixed featured shelf. Individual lookup failures are skipped, so
    /// the shelf holds whatever succeeded.
    pub async fn get_featured(&self) -> PageResult {
        let mut items = Vec::new();
        for id in FEATURED_IDS {
            match self.get_by_id(id).await {
                Ok(detail) => items.push(detail.summary()),
                Err(e) => warn!(id = %id, "skipping featured title: {e}"),
            }
        }
        let total = items.len() as u32;
        PageResult::paged(items, total)
    }

    /// Multi-strategy actor search.
    ///
    /// Strategies run in order: full name, surname, first name, then the
    /// signature title for curated well-known actors. Accumulation stops at
    /// [`ACTOR_RESULT_TARGET`] de-duplicated matches; each strategy examines
    /// at most [`ACTOR_CANDIDATE_CAP`] candidates, confirming each via its
    /// detail record's actor list. A failed detail lookup keeps the candidate:
    /// lookup failure is not evidence of irrelevance.
    pub async fn search_by_actor(
        &self,
        actor_name: &str,
        page: u32,
    ) -> Result<PageResult, CatalogError> {
        let name = actor_name.trim();
        if name.is_empty() {
            return Ok(PageResult::empty());
        }

        let tokens: Vec<&str> = name.split_whitespace().collect();
        let mut strategies: Vec<String> = vec![name.to_string()];
        if tokens.len() > 1 {
            strategies.push(tokens[tokens.len() - 1].to_string());
            strategies.push(tokens[0].to_string());
        }
        if let Some(title) = self.signature_titles.get(&name.to_lowercase()) {
            strategies.push(title.clone());
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut matched: Vec<MovieSummary> = Vec::new();

        'strategies: for term in &strategies {
            if matched.len() >= ACTOR_RESULT_TARGET {
                break;
            }
            let raw = match self.api.search(term, page, &SearchFilters::default()).await {
                Ok(r) => r,
                Err(e) => {
                    warn!(term = %term, "actor-search strategy failed: {e}");
                    continue;
                }
            };
            if !raw.is_success() {
                continue;
            }

            for candidate in raw.results.iter().take(ACTOR_CANDIDATE_CAP) {
                if matched.len() >= ACTOR_RESULT_TARGET {
                    break 'strategies;
                }
                if !seen.insert(candidate.imdb_id.clone()) {
                    continue;
                }
                match self.api.get_by_id(&candidate.imdb_id).await {
                    Ok(detail) if detail.is_success() => {
                        if actor_in_cast(name, &detail.actors) {
                            matched.push(normalize::to_summary(candidate));
                        }
                    }
                    // Keep the candidate when the lookup gave no evidence
                    // either way.
                    Ok(_) | Err(_) => matched.push(normalize::to_summary(candidate)),
                }
            }
        }

        let total = matched.len() as u32;
        Ok(PageResult::paged(matched, total))
    }
}

/// Case-insensitive membership test against a comma-joined cast field:
/// full name, reversed "surname firstname", or any name token longer than
/// 2 characters.
fn actor_in_cast(name: &str, cast: &str) -> bool {
    let haystack = cast.to_lowercase();
    let needle = name.trim().to_lowercase();
    if haystack.contains(&needle) {
        return true;
    }

    let tokens: Vec<&str> = needle.split_whitespace().collect();
    if tokens.len() > 1 {
        let reversed = format!(
            "{} {}",
            tokens[tokens.len() - 1],
            tokens[..tokens.len() - 1].join(" ")
        );
        if haystack.contains(&reversed) {
            return true;
        }
    }
    tokens.iter().any(|t| t.len() > 2 && haystack.contains(*t))
}
