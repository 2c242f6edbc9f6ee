//! DetailFetcher - movie id → descriptive fields
//!
//! ## Derivation
//! - cast: first five billed names, joined with ", "
//! - director: first crew member whose job is exactly "Director", else "N/A"
//! - poster: image base + `poster_path`, else the fallback poster token
//! - genre: provider genre names, joined with ", "
//! - rating: `vote_average`, clamped to 0..=10

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, instrument};

use catalog::{FALLBACK_POSTER, MovieDetail, MovieId, UNKNOWN_DIRECTOR};
use tmdb_client::{MetadataProvider, MovieDetailsPayload};

use crate::DEFAULT_CALL_TIMEOUT;
use crate::outcome::{Outcome, with_deadline};

/// Poster CDN path, sized for list views
pub const DEFAULT_POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// How many cast members make it into `MovieDetail::cast`
pub const CAST_LIMIT: usize = 5;

/// Fetches and flattens movie details plus credits
#[derive(Clone)]
pub struct DetailFetcher {
    provider: Arc<dyn MetadataProvider>,
    timeout: Duration,
    poster_base: String,
    fallback_poster: String,
}

impl DetailFetcher {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_CALL_TIMEOUT,
            poster_base: DEFAULT_POSTER_BASE.to_string(),
            fallback_poster: FALLBACK_POSTER.to_string(),
        }
    }

    /// Deadline for the detail call (default: 10s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Prefix for `poster_path` (default: the w500 CDN path)
    pub fn with_poster_base(mut self, poster_base: impl Into<String>) -> Self {
        self.poster_base = poster_base.into();
        self
    }

    /// Poster used when the movie has none (default: "default-poster.jpg")
    pub fn with_fallback_poster(mut self, fallback_poster: impl Into<String>) -> Self {
        self.fallback_poster = fallback_poster.into();
        self
    }

    /// Fetch details for one movie; `Failed` falls back to the empty record
    #[instrument(skip(self))]
    pub async fn fetch(&self, movie_id: MovieId) -> Outcome<MovieDetail> {
        match with_deadline(self.timeout, self.provider.movie_details(movie_id)).await {
            Ok(payload) => {
                debug!("Fetched details for movie {}", movie_id);
                Outcome::Found(self.derive_detail(payload))
            }
            Err(e) => {
                error!("Error fetching movie details for {}: {}", movie_id, e);
                Outcome::Failed(e)
            }
        }
    }

    /// Flatten a provider payload into the fields the presentation layer shows
    pub fn derive_detail(&self, payload: MovieDetailsPayload) -> MovieDetail {
        let cast = payload
            .credits
            .cast
            .iter()
            .take(CAST_LIMIT)
            .map(|member| member.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let director = payload
            .credits
            .crew
            .iter()
            .find(|member| member.job == "Director")
            .map(|member| member.name.clone())
            .unwrap_or_else(|| UNKNOWN_DIRECTOR.to_string());

        let poster_url = match payload.poster_path.as_deref() {
            Some(path) if !path.is_empty() => format!("{}{}", self.poster_base, path),
            _ => self.fallback_poster.clone(),
        };

        let genre = payload
            .genres
            .iter()
            .map(|genre| genre.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        MovieDetail {
            tagline: payload.tagline,
            poster_url: Some(poster_url),
            rating: payload.vote_average.map(|rating| rating.clamp(0.0, 10.0)),
            genre: Some(genre),
            director: Some(director),
            release_date: payload.release_date,
            description: payload.overview,
            cast: Some(cast),
        }
    }
}
