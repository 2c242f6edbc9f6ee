//! CatalogSearch - genre id (+ language) → popularity-ordered candidates

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, instrument};

use catalog::{GenreId, MovieSummary};
use tmdb_client::MetadataProvider;

use crate::DEFAULT_CALL_TIMEOUT;
use crate::outcome::{Outcome, with_deadline};

/// Finds candidate movies for a genre, most popular first
#[derive(Clone)]
pub struct CatalogSearch {
    provider: Arc<dyn MetadataProvider>,
    timeout: Duration,
}

impl CatalogSearch {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Deadline for the discover call (default: 10s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Candidates in provider order.
    ///
    /// A blank `language` means no language filter. An empty list is still
    /// `Found`; only a failed call is `Failed`.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        genre_id: GenreId,
        language: Option<&str>,
    ) -> Outcome<Vec<MovieSummary>> {
        let language = language.map(str::trim).filter(|code| !code.is_empty());

        match with_deadline(self.timeout, self.provider.discover(genre_id, language)).await {
            Ok(movies) => {
                debug!("Found {} candidates for genre {}", movies.len(), genre_id);
                Outcome::Found(movies)
            }
            Err(e) => {
                error!("Error fetching movies for genre {}: {}", genre_id, e);
                Outcome::Failed(e)
            }
        }
    }
}
