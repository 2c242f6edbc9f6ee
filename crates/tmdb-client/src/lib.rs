//! Movie metadata provider client.
//!
//! This crate talks to the provider's REST API (TMDB v3). It handles:
//! - Authenticating each request with the injected API key
//! - Mapping transport, status and decoding failures to [`ProviderError`]
//! - Decoding provider JSON into catalog types and raw payloads
//!
//! Everything above this crate works against the [`MetadataProvider`] trait,
//! so tests can swap the HTTP client for an in-memory fake.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use catalog::{Genre, GenreId, MovieId, MovieSummary};

pub mod client;
pub mod wire;

pub use client::{TmdbClient, TmdbConfig};
pub use wire::{CastMember, Credits, CrewMember, MovieDetailsPayload, Video};

/// Errors that can occur when calling the provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Connection, DNS or TLS failure before any response arrived
    #[error("Failed to reach provider: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("Provider returned {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// The body could not be decoded into the expected shape
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    /// The call did not finish within the configured timeout
    #[error("Provider call timed out after {0:?}")]
    Timeout(Duration),

    /// The client could not be built from its configuration
    #[error("Invalid provider configuration: {0}")]
    Config(String),
}

/// Convenience type alias for provider results
pub type Result<T> = std::result::Result<T, ProviderError>;

/// The four provider endpoints a mood query needs.
///
/// `Send + Sync` so one provider can be shared by every fan-out branch.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Returns the name of this provider (for logging/debugging)
    fn name(&self) -> &str;

    /// Full genre catalog
    async fn genres(&self) -> Result<Vec<Genre>>;

    /// Movies in a genre, most popular first, optionally restricted to an
    /// original-language code
    async fn discover(
        &self,
        genre_id: GenreId,
        language: Option<&str>,
    ) -> Result<Vec<MovieSummary>>;

    /// Movie metadata with credits appended
    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetailsPayload>;

    /// Videos attached to a movie, in provider order
    async fn movie_videos(&self, movie_id: MovieId) -> Result<Vec<Video>>;
}
