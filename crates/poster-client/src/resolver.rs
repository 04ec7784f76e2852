//! Poster resolution with bounded retries.

use crate::tmdb::TmdbSearch;
use crate::title::clean_title;
use crate::{PosterError, PosterSearch, SearchHit};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";

/// Retry and URL settings for the resolver
#[derive(Debug, Clone)]
pub struct PosterConfig {
    /// Prefix joined with a hit's `poster_path`
    pub image_base_url: String,
    /// Returned whenever no poster can be resolved
    pub placeholder_url: String,
    /// Total tries per lookup, at least 1
    pub attempts: u32,
    /// Bound on each single try
    pub timeout: Duration,
    /// Pause between a failed try and the next one
    pub backoff: Duration,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
            attempts: 3,
            timeout: Duration::from_secs(5),
            backoff: Duration::from_millis(250),
        }
    }
}

/// Why a lookup ended without a poster
#[derive(Debug, Clone, PartialEq)]
pub enum PosterMiss {
    /// The resolver has no search backend (no API key)
    NotConfigured,
    /// The search succeeded but returned nothing
    NoResults,
    /// The chosen hit has no image
    NoImage,
    /// A failure that retrying would not fix
    Rejected(PosterError),
    /// Every attempt failed; holds the last failure
    Exhausted(PosterError),
}

/// Result of one poster lookup
#[derive(Debug, Clone, PartialEq)]
pub enum PosterOutcome {
    Found { url: String, attempts: u32 },
    Missing { reason: PosterMiss, attempts: u32 },
}

impl PosterOutcome {
    /// Number of search calls made
    pub fn attempts(&self) -> u32 {
        match self {
            PosterOutcome::Found { attempts, .. } | PosterOutcome::Missing { attempts, .. } => {
                *attempts
            }
        }
    }

    /// The poster URL, or `placeholder` when there is none
    pub fn url_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self {
            PosterOutcome::Found { url, .. } => url,
            PosterOutcome::Missing { .. } => placeholder,
        }
    }
}

/// Resolves display titles to poster URLs.
///
/// Lookups run one attempt at a time; a lookup blocks its caller for at most
/// `attempts * (timeout + backoff)`.
#[derive(Clone)]
pub struct PosterResolver {
    search: Option<Arc<dyn PosterSearch>>,
    config: PosterConfig,
}

impl PosterResolver {
    /// Resolver over any search backend
    pub fn new(search: impl PosterSearch + 'static, config: PosterConfig) -> Self {
        Self {
            search: Some(Arc::new(search)),
            config,
        }
    }

    /// Resolver over the HTTP search API
    pub fn tmdb(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        config: PosterConfig,
    ) -> Result<Self, PosterError> {
        let search = TmdbSearch::new(api_key, api_url, config.timeout)?;
        Ok(Self::new(search, config))
    }

    /// Resolver that always answers with the placeholder
    pub fn disabled(config: PosterConfig) -> Self {
        Self {
            search: None,
            config,
        }
    }

    pub fn config(&self) -> &PosterConfig {
        &self.config
    }

    /// Poster URL for `title`, or the placeholder. Never fails.
    pub async fn fetch_poster(&self, title: &str) -> String {
        self.resolve(title)
            .await
            .url_or(&self.config.placeholder_url)
            .to_string()
    }

    /// Look up a poster for `title`
    ///
    /// ## Retry policy
    /// - transport errors, timeouts and non-2xx statuses are retried up to
    ///   `attempts` times in total, waiting `backoff` in between
    /// - an undecodable response or an empty result set ends the lookup
    pub async fn resolve(&self, title: &str) -> PosterOutcome {
        let Some(search) = &self.search else {
            return PosterOutcome::Missing {
                reason: PosterMiss::NotConfigured,
                attempts: 0,
            };
        };

        let query = clean_title(title);
        let max_attempts = self.config.attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let attempt_result = tokio::time::timeout(self.config.timeout, search.search(&query));
            let result = match attempt_result.await {
                Ok(result) => result,
                Err(_) => Err(PosterError::Timeout(self.config.timeout)),
            };

            let error = match result {
                Ok(hits) => return self.pick(&query, hits, attempt),
                Err(error) => error,
            };

            if !error.is_retryable() {
                warn!(title = %query, error = %error, "Poster lookup rejected");
                return PosterOutcome::Missing {
                    reason: PosterMiss::Rejected(error),
                    attempts: attempt,
                };
            }

            warn!(
                title = %query,
                attempt,
                max_attempts,
                error = %error,
                "Poster lookup attempt failed"
            );

            if attempt >= max_attempts {
                return PosterOutcome::Missing {
                    reason: PosterMiss::Exhausted(error),
                    attempts: attempt,
                };
            }

            if !self.config.backoff.is_zero() {
                tokio::time::sleep(self.config.backoff).await;
            }
        }
    }

    /// Prefer an exact (case-insensitive) title match, else the first hit
    fn pick(&self, query: &str, hits: Vec<SearchHit>, attempts: u32) -> PosterOutcome {
        let wanted = query.to_lowercase();
        let chosen = hits
            .iter()
            .find(|hit| hit.title.to_lowercase() == wanted)
            .or_else(|| hits.first());

        let Some(hit) = chosen else {
            debug!(title = %query, "Poster search returned no results");
            return PosterOutcome::Missing {
                reason: PosterMiss::NoResults,
                attempts,
            };
        };

        match hit.poster_path.as_deref().filter(|path| !path.is_empty()) {
            Some(path) => PosterOutcome::Found {
                url: self.image_url(path),
                attempts,
            },
            None => PosterOutcome::Missing {
                reason: PosterMiss::NoImage,
                attempts,
            },
        }
    }

    fn image_url(&self, path: &str) -> String {
        let base = self.config.image_base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}
