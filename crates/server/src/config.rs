//! Retriever configuration.
//!
//! Nothing here is read from the environment directly: the binary fills a
//! [`RetrieverConfig`] from flags / env vars and hands it to
//! [`MoodOrchestrator::new`](crate::MoodOrchestrator::new). Only the API key
//! has no default.

use std::time::Duration;

use catalog::FALLBACK_POSTER;
use sources::{DEFAULT_CALL_TIMEOUT, DEFAULT_POSTER_BASE};
use tmdb_client::TmdbConfig;

/// Maximum number of candidates enriched per mood query
pub const MAX_CANDIDATES: usize = 30;

/// Everything the orchestrator needs to talk to the provider
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Credential, REST root and HTTP-level timeout
    pub tmdb: TmdbConfig,
    /// Prefix joined with each movie's `poster_path`
    pub image_base: String,
    /// Poster token for movies without artwork
    pub fallback_poster: String,
    /// Candidates kept after catalog search (default: 30, never more than 30)
    pub candidate_limit: usize,
    /// Deadline applied to every provider call; the HTTP client gets it too
    pub request_timeout: Duration,
    /// Keep the genre catalog for the life of the orchestrator
    pub cache_genres: bool,
}

impl RetrieverConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            tmdb: TmdbConfig::new(api_key),
            image_base: DEFAULT_POSTER_BASE.to_string(),
            fallback_poster: FALLBACK_POSTER.to_string(),
            candidate_limit: MAX_CANDIDATES,
            request_timeout: DEFAULT_CALL_TIMEOUT,
            cache_genres: false,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.tmdb.api_base = api_base.into();
        self
    }

    pub fn with_image_base(mut self, image_base: impl Into<String>) -> Self {
        self.image_base = image_base.into();
        self
    }

    pub fn with_fallback_poster(mut self, fallback_poster: impl Into<String>) -> Self {
        self.fallback_poster = fallback_poster.into();
        self
    }

    /// Applies to both the HTTP client and each leaf's deadline
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self.tmdb.timeout = timeout;
        self
    }

    /// Clamped to 1..=30
    pub fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = limit.clamp(1, MAX_CANDIDATES);
        self
    }

    pub fn with_genre_cache(mut self, enabled: bool) -> Self {
        self.cache_genres = enabled;
        self
    }
}
