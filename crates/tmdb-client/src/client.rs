//! HTTP implementation of [`MetadataProvider`] over the TMDB v3 REST API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use catalog::{Genre, GenreId, MovieId, MovieSummary};

use crate::wire::{DiscoverResponse, GenreListResponse, MovieDetailsPayload, Video, VideosResponse};
use crate::{MetadataProvider, ProviderError, Result};

/// Default REST root
pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`TmdbClient`].
///
/// The API key is injected here rather than compiled in; `Debug` never
/// prints it.
#[derive(Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Point the client at another REST root (mock servers, proxies)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// TMDB API client.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Build a client from its configuration.
    ///
    /// Fails with [`ProviderError::Config`] when the API key is blank or the
    /// HTTP client cannot be constructed.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::Config("API key is empty".to_string()));
        }

        let http = Client::builder()
            .user_agent(concat!("moodie/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        info!("TMDB client ready at {}", config.api_base);
        Ok(Self { http, config })
    }

    /// GET `path` with the API key plus `params`, decoding the body as `T`
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.config.api_base.trim_end_matches('/'), path);
        debug!(endpoint = path, "TMDB request");

        let mut query = vec![("api_key", self.config.api_key.as_str())];
        query.extend_from_slice(params);

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.request_error(e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::InvalidResponse(format!("{}: {}", path, e)))
    }

    fn request_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.config.timeout)
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        let list: GenreListResponse = self.get_json("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }

    async fn discover(
        &self,
        genre_id: GenreId,
        language: Option<&str>,
    ) -> Result<Vec<MovieSummary>> {
        let genre = genre_id.to_string();
        let mut params = vec![
            ("with_genres", genre.as_str()),
            ("sort_by", "popularity.desc"),
        ];
        if let Some(language) = language {
            params.push(("with_original_language", language));
        }

        let discover: DiscoverResponse = self.get_json("/discover/movie", &params).await?;
        Ok(discover.results)
    }

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetailsPayload> {
        self.get_json(
            &format!("/movie/{}", movie_id),
            &[("append_to_response", "credits")],
        )
        .await
    }

    async fn movie_videos(&self, movie_id: MovieId) -> Result<Vec<Video>> {
        let videos: VideosResponse = self
            .get_json(&format!("/movie/{}/videos", movie_id), &[])
            .await?;
        Ok(videos.results)
    }
}
