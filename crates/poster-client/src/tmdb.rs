//! HTTP search against a TMDB-compatible API.
//!
//! `GET {api_url}/search/movie?api_key=..&query=..` returning
//! `{ "results": [ { "title": .., "poster_path": .. }, .. ] }`.

use crate::{PosterError, PosterSearch, SearchHit};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Movie search over HTTP
#[derive(Clone)]
pub struct TmdbSearch {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    timeout: Duration,
}

impl TmdbSearch {
    /// Create a client whose requests give up after `timeout`
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PosterError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PosterError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            api_url: api_url.into(),
            timeout,
        })
    }

    /// Full URL of the search endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/search/movie", self.api_url.trim_end_matches('/'))
    }

    fn transport_error(&self, e: reqwest::Error) -> PosterError {
        if e.is_timeout() {
            PosterError::Timeout(self.timeout)
        } else {
            PosterError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl PosterSearch for TmdbSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, PosterError> {
        debug!(query = %query, "Searching poster service");

        let response = self
            .http_client
            .get(self.endpoint())
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PosterError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        parse_results(&body)
    }
}

fn parse_results(body: &[u8]) -> Result<Vec<SearchHit>, PosterError> {
    serde_json::from_slice::<SearchResponse>(body)
        .map(|response| response.results)
        .map_err(|e| PosterError::Decode(e.to_string()))
}
