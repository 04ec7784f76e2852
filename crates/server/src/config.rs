use anyhow::anyhow;
use poster_client::{PosterConfig, PosterResolver};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Prefix of every environment variable read by [`Settings`]
pub const ENV_PREFIX: &str = "REEL_RECS_";

/// Application configuration loaded from environment variables
///
/// `REEL_RECS_TMDB_API_KEY` is optional; without it posters fall back to
/// the placeholder image and no network calls are made.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Poster search API key
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// Poster search API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with poster paths
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Image shown when no poster is found
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,

    #[serde(default = "default_poster_attempts")]
    pub poster_attempts: u32,

    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    #[serde(default = "default_poster_backoff_ms")]
    pub poster_backoff_ms: u64,

    /// Directory holding the activity CSV logs
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    poster_client::resolver::DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_placeholder_url() -> String {
    poster_client::resolver::DEFAULT_PLACEHOLDER_URL.to_string()
}

fn default_poster_attempts() -> u32 {
    3
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_poster_backoff_ms() -> u64 {
    250
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Settings {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit `(name, value)` pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn poster_config(&self) -> PosterConfig {
        PosterConfig {
            image_base_url: self.image_base_url.clone(),
            placeholder_url: self.placeholder_url.clone(),
            attempts: self.poster_attempts,
            timeout: Duration::from_secs(self.poster_timeout_secs),
            backoff: Duration::from_millis(self.poster_backoff_ms),
        }
    }

    /// Build the poster resolver, disabled when no API key is configured
    pub fn poster_resolver(&self) -> anyhow::Result<PosterResolver> {
        match self.tmdb_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => {
                PosterResolver::tmdb(key, self.tmdb_api_url.clone(), self.poster_config())
                    .map_err(|e| anyhow!("Failed to create poster client: {}", e))
            }
            _ => {
                info!("No poster API key configured, posters disabled");
                Ok(PosterResolver::disabled(self.poster_config()))
            }
        }
    }
}
