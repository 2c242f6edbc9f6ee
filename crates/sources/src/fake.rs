//! In-memory [`MetadataProvider`] for tests.
//!
//! Serves canned genres, movies, details and videos, counts every call, and
//! can be told to fail or hang on a given endpoint or movie.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use catalog::{Genre, GenreId, MovieId, MovieSummary};
use tmdb_client::{MetadataProvider, MovieDetailsPayload, ProviderError, Video};

/// Provider endpoints, for call counting and fault injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Genres,
    Discover,
    Details,
    Videos,
}

#[derive(Default)]
pub struct FakeProvider {
    genres: Vec<Genre>,
    movies: Vec<MovieSummary>,
    details: HashMap<MovieId, MovieDetailsPayload>,
    videos: HashMap<MovieId, Vec<Video>>,
    failing: HashSet<Endpoint>,
    stalling: HashSet<Endpoint>,
    failing_movies: HashSet<MovieId>,
    calls: [AtomicUsize; 4],
    discover_requests: Mutex<Vec<(GenreId, Option<String>)>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, id: GenreId, name: &str) -> Self {
        self.genres.push(Genre {
            id,
            name: name.to_string(),
        });
        self
    }

    /// Movies returned by discover, in the given (popularity) order
    pub fn with_movies(mut self, movies: Vec<MovieSummary>) -> Self {
        self.movies = movies;
        self
    }

    pub fn with_details(mut self, id: MovieId, payload: MovieDetailsPayload) -> Self {
        self.details.insert(id, payload);
        self
    }

    pub fn with_videos(mut self, id: MovieId, videos: Vec<Video>) -> Self {
        self.videos.insert(id, videos);
        self
    }

    /// Every call to `endpoint` fails with a transport error
    pub fn failing(mut self, endpoint: Endpoint) -> Self {
        self.failing.insert(endpoint);
        self
    }

    /// Every call to `endpoint` hangs forever
    pub fn stalling(mut self, endpoint: Endpoint) -> Self {
        self.stalling.insert(endpoint);
        self
    }

    /// Details and videos for this movie fail; other movies are unaffected
    pub fn failing_movie(mut self, id: MovieId) -> Self {
        self.failing_movies.insert(id);
        self
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.calls[slot(endpoint)].load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// (genre id, language) of every discover call, in call order
    pub fn discover_requests(&self) -> Vec<(GenreId, Option<String>)> {
        self.discover_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    async fn enter(&self, endpoint: Endpoint) -> Result<(), ProviderError> {
        self.calls[slot(endpoint)].fetch_add(1, Ordering::SeqCst);
        if self.stalling.contains(&endpoint) {
            std::future::pending::<()>().await;
        }
        if self.failing.contains(&endpoint) {
            return Err(ProviderError::Transport(format!("{:?} unavailable", endpoint)));
        }
        Ok(())
    }

    fn check_movie(&self, id: MovieId) -> Result<(), ProviderError> {
        if self.failing_movies.contains(&id) {
            return Err(ProviderError::Status {
                endpoint: format!("/movie/{}", id),
                status: 500,
            });
        }
        Ok(())
    }
}

fn slot(endpoint: Endpoint) -> usize {
    match endpoint {
        Endpoint::Genres => 0,
        Endpoint::Discover => 1,
        Endpoint::Details => 2,
        Endpoint::Videos => 3,
    }
}

#[async_trait]
impl MetadataProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn genres(&self) -> Result<Vec<Genre>, ProviderError> {
        self.enter(Endpoint::Genres).await?;
        Ok(self.genres.clone())
    }

    async fn discover(
        &self,
        genre_id: GenreId,
        language: Option<&str>,
    ) -> Result<Vec<MovieSummary>, ProviderError> {
        if let Ok(mut requests) = self.discover_requests.lock() {
            requests.push((genre_id, language.map(str::to_string)));
        }
        self.enter(Endpoint::Discover).await?;
        Ok(self.movies.clone())
    }

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetailsPayload, ProviderError> {
        self.enter(Endpoint::Details).await?;
        self.check_movie(movie_id)?;
        self.details
            .get(&movie_id)
            .cloned()
            .ok_or_else(|| ProviderError::Status {
                endpoint: format!("/movie/{}", movie_id),
                status: 404,
            })
    }

    async fn movie_videos(&self, movie_id: MovieId) -> Result<Vec<Video>, ProviderError> {
        self.enter(Endpoint::Videos).await?;
        self.check_movie(movie_id)?;
        Ok(self.videos.get(&movie_id).cloned().unwrap_or_default())
    }
}
