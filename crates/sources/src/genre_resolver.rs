//! GenreResolver - genre display name → provider genre id
//!
//! Fetches the provider's genre catalog and matches names case-insensitively.
//! By default every call re-fetches the catalog; `with_cache` keeps the first
//! successful catalog for the life of the resolver (and its clones).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, error, instrument};

use catalog::{Genre, GenreId};
use tmdb_client::{MetadataProvider, ProviderError};

use crate::DEFAULT_CALL_TIMEOUT;
use crate::outcome::{Outcome, with_deadline};

type GenreCache = Arc<RwLock<Option<Arc<Vec<Genre>>>>>;

/// Resolves genre names against the provider's genre catalog
#[derive(Clone)]
pub struct GenreResolver {
    provider: Arc<dyn MetadataProvider>,
    timeout: Duration,
    cache: Option<GenreCache>,
}

impl GenreResolver {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_CALL_TIMEOUT,
            cache: None,
        }
    }

    /// Deadline for the catalog fetch (default: 10s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Memoize the catalog after the first successful fetch
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(Arc::new(RwLock::new(None)));
        self
    }

    /// Look up the id for `genre_name` (exact match, ignoring case)
    #[instrument(skip(self))]
    pub async fn resolve(&self, genre_name: &str) -> Outcome<GenreId> {
        let genres = match self.catalog().await {
            Ok(genres) => genres,
            Err(e) => {
                error!("Error fetching genres from {}: {}", self.provider.name(), e);
                return Outcome::Failed(e);
            }
        };

        match find_genre(&genres, genre_name) {
            Some(id) => {
                debug!("Resolved genre {} to id {}", genre_name, id);
                Outcome::Found(id)
            }
            None => {
                debug!("Genre {} not in catalog of {} genres", genre_name, genres.len());
                Outcome::Missing
            }
        }
    }

    /// The full genre catalog, as the provider lists it
    pub async fn list(&self) -> Outcome<Vec<Genre>> {
        match self.catalog().await {
            Ok(genres) => Outcome::Found(genres.as_ref().clone()),
            Err(e) => {
                error!("Error fetching genres from {}: {}", self.provider.name(), e);
                Outcome::Failed(e)
            }
        }
    }

    async fn catalog(&self) -> Result<Arc<Vec<Genre>>, ProviderError> {
        let Some(cache) = &self.cache else {
            return self.fetch().await;
        };

        if let Some(genres) = cache.read().await.as_ref() {
            return Ok(genres.clone());
        }

        let mut slot = cache.write().await;
        // Another task may have filled it while we waited for the lock
        if let Some(genres) = slot.as_ref() {
            return Ok(genres.clone());
        }
        let genres = self.fetch().await?;
        *slot = Some(genres.clone());
        Ok(genres)
    }

    async fn fetch(&self) -> Result<Arc<Vec<Genre>>, ProviderError> {
        let genres = with_deadline(self.timeout, self.provider.genres()).await?;
        Ok(Arc::new(genres))
    }
}

/// Case-insensitive exact match on the genre name
pub fn find_genre(genres: &[Genre], genre_name: &str) -> Option<GenreId> {
    let wanted = genre_name.to_lowercase();
    genres
        .iter()
        .find(|genre| genre.name.to_lowercase() == wanted)
        .map(|genre| genre.id)
}
