//! Poster lookup client for the movie search API.
//!
//! This crate resolves a display title to a poster image URL. It handles:
//! - Cleaning the title into a search query
//! - Calling the remote search endpoint (TMDB-compatible)
//! - Picking the best hit and building the image URL
//! - Retrying transport failures and degrading to a placeholder image
//!
//! A lookup never fails from the caller's point of view: the worst case is
//! the placeholder URL. The typed [`PosterOutcome`] says what happened and
//! how many attempts it took.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub mod resolver;
pub mod title;
pub mod tmdb;

pub use resolver::{PosterConfig, PosterMiss, PosterOutcome, PosterResolver};
pub use title::clean_title;
pub use tmdb::TmdbSearch;

/// Errors from a single search attempt
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PosterError {
    #[error("Failed to reach poster service: {0}")]
    Transport(String),

    #[error("Poster search timed out after {0:?}")]
    Timeout(Duration),

    #[error("Poster service returned status {0}")]
    Status(u16),

    #[error("Invalid response from poster service: {0}")]
    Decode(String),
}

impl PosterError {
    /// Transport-level failures are worth another attempt; a bad payload is not
    pub fn is_retryable(&self) -> bool {
        match self {
            PosterError::Transport(_) | PosterError::Timeout(_) | PosterError::Status(_) => true,
            PosterError::Decode(_) => false,
        }
    }
}

/// One result of a title search
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// A remote title search.
///
/// `TmdbSearch` is the HTTP implementation; tests substitute their own.
#[async_trait]
pub trait PosterSearch: Send + Sync {
    /// Search for `query`, returning hits in the service's ranking order
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, PosterError>;
}
