use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;
use crate::models::SearchFilters;

const OMDB_BASE: &str = "https://www.omdbapi.com/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire-level access to the OMDb provider. Returns provider-shaped records;
/// `Response: "False"` bodies come back as data, not errors.
#[async_trait]
pub trait OmdbApi: Send + Sync {
    async fn search(
        &self,
        query: &str,
        page: u32,
        filters: &SearchFilters,
    ) -> Result<SearchPage, CatalogError>;

    async fn get_by_id(&self, id: &str) -> Result<RawDetail, CatalogError>;
}

/// One raw search hit, exactly as the provider sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSummary {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "Type")]
    pub media_type: String,
}

/// Raw search response. `total_results` is string-encoded on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchPage {
    #[serde(rename = "Search")]
    pub results: Vec<RawSummary>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl SearchPage {
    pub fn no_results() -> Self {
        Self {
            results: Vec::new(),
            total_results: None,
            response: "False".to_string(),
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.response == "True"
    }
}

/// Raw detail response, `Response`/`Error` fields included.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDetail {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Rated")]
    pub rated: String,
    #[serde(rename = "Released")]
    pub released: String,
    #[serde(rename = "Runtime")]
    pub runtime: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Writer")]
    pub writer: String,
    #[serde(rename = "Actors")]
    pub actors: String,
    #[serde(rename = "Plot")]
    pub plot: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Awards")]
    pub awards: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "Ratings")]
    pub ratings: Vec<RawScore>,
    #[serde(rename = "Metascore")]
    pub metascore: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: String,
    #[serde(rename = "Type")]
    pub media_type: String,
    #[serde(rename = "BoxOffice")]
    pub box_office: String,
    #[serde(rename = "Production")]
    pub production: String,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl RawDetail {
    pub fn is_success(&self) -> bool {
        self.response == "True"
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawScore {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client failed")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OMDB_API_KEY").context("OMDB_API_KEY not set")?;
        Self::new(api_key)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, CatalogError> {
        debug!(url = %url, "OMDb request");
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Transport(format!("request failed: {e}")))?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| CatalogError::Transport(format!("reading body failed: {e}")))?;
        if !status.is_success() {
            return Err(CatalogError::Transport(format!("OMDb returned {status}")));
        }
        serde_json::from_str(&text)
            .map_err(|e| CatalogError::Transport(format!("JSON parse failed: {e}")))
    }
}

#[async_trait]
impl OmdbApi for OmdbClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        filters: &SearchFilters,
    ) -> Result<SearchPage, CatalogError> {
        if query.trim().is_empty() {
            return Ok(SearchPage::no_results());
        }
        let mut url = format!(
            "{OMDB_BASE}?apikey={}&s={}&page={page}",
            self.api_key,
            urlencoding::encode(query.trim())
        );
        if let Some(year) = &filters.year {
            url.push_str(&format!("&y={}", urlencoding::encode(year)));
        }
        if let Some(kind) = filters.kind.and_then(|k| k.as_query()) {
            url.push_str(&format!("&type={kind}"));
        }
        self.get_json(&url).await
    }

    async fn get_by_id(&self, id: &str) -> Result<RawDetail, CatalogError> {
        let url = format!(
            "{OMDB_BASE}?apikey={}&i={}&plot=full",
            self.api_key,
            urlencoding::encode(id)
        );
        self.get_json(&url).await
    }
}
