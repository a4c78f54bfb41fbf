use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::TmdbConfig;
use crate::db::NewMovie;

/// A movie as returned by the TMDb discover endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscoveredMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl From<DiscoveredMovie> for NewMovie {
    fn from(m: DiscoveredMovie) -> Self {
        NewMovie {
            tmdb_movie_id: m.id,
            title: m.title,
            poster_path: m.poster_path,
            rating: m.vote_average.unwrap_or(0.0),
            summary: Some(m.overview.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    results: Vec<DiscoveredMovie>,
}

/// Somewhere to discover movies for a set of genres.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Movies matching all of `genre_ids`, most popular first. Failures are
    /// logged and reported as an empty list.
    async fn discover(&self, genre_ids: &[i64]) -> Vec<DiscoveredMovie>;
}

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("No TMDb API key configured")]
    MissingApiKey,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, TmdbError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        if config.api_key.is_none() {
            warn!("No TMDb API key configured, recommendations will only come from the cache");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }

    pub fn discover_url(&self) -> String {
        format!("{}/discover/movie", self.base_url)
    }

    async fn try_discover(&self, genre_ids: &[i64]) -> Result<Vec<DiscoveredMovie>, TmdbError> {
        let api_key = self.api_key.as_deref().ok_or(TmdbError::MissingApiKey)?;
        let genres = join_genres(genre_ids);

        let response = self
            .client
            .get(self.discover_url())
            .query(&[
                ("api_key", api_key),
                ("with_genres", genres.as_str()),
                ("sort_by", "popularity.desc"),
                ("language", self.language.as_str()),
                ("include_adult", "false"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: DiscoverResponse = response.json().await?;
        Ok(body.results)
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    async fn discover(&self, genre_ids: &[i64]) -> Vec<DiscoveredMovie> {
        match self.try_discover(genre_ids).await {
            Ok(results) => {
                debug!(genres = %join_genres(genre_ids), count = results.len(), "TMDb discover");
                results
            }
            Err(e) => {
                error!("Error connecting to TMDb: {}", e);
                Vec::new()
            }
        }
    }
}

pub fn join_genres(genre_ids: &[i64]) -> String {
    genre_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
