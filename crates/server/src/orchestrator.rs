//! # Mood Orchestrator
//!
//! This module coordinates one mood query end to end:
//! 1. Look the mood up in the mood table
//! 2. Resolve the mapped genre name to a provider genre id
//! 3. Search the catalog (optionally filtered by original language)
//! 4. Keep the first 30 candidates
//! 5. Enrich every candidate concurrently (details + trailer at once)
//! 6. Return the records in popularity order
//!
//! Leaf failures never surface here as errors; they arrive as typed
//! [`Outcome`]s and are replaced by their fallbacks. The only ways a query
//! ends early are the [`Apology`] variants.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::future::join_all;
use serde::{Serialize, Serializer};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use catalog::{MoodTable, MovieSummary, Recommendation};
use sources::{CatalogSearch, DetailFetcher, GenreResolver, Outcome, TrailerResolver};
use tmdb_client::{MetadataProvider, TmdbClient};

use crate::config::{MAX_CANDIDATES, RetrieverConfig};

/// Why a mood query produced no list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Apology {
    /// The mood is not in the mood table
    UnknownMood,
    /// The genre could not be resolved (absent from the catalog, or the
    /// catalog fetch failed)
    UnknownGenre,
    /// The caller cancelled the query
    Cancelled,
}

impl Apology {
    pub fn message(&self) -> &'static str {
        match self {
            Apology::UnknownMood => "Sorry, I don't have suggestions for that mood.",
            Apology::UnknownGenre => "Sorry, I couldn't find any movies for that genre.",
            Apology::Cancelled => "Sorry, the search was cancelled before it finished.",
        }
    }
}

impl fmt::Display for Apology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Apology {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Result of a mood query: a plain sentence, or the ordered records.
///
/// Serializes as a JSON string or a JSON array respectively, so consumers
/// tell them apart by shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Suggestions {
    Apology(Apology),
    Movies(Vec<Recommendation>),
}

impl Suggestions {
    pub fn movies(&self) -> Option<&[Recommendation]> {
        match self {
            Suggestions::Movies(movies) => Some(movies),
            Suggestions::Apology(_) => None,
        }
    }

    pub fn apology(&self) -> Option<Apology> {
        match self {
            Suggestions::Apology(apology) => Some(*apology),
            Suggestions::Movies(_) => None,
        }
    }
}

/// Main orchestrator that turns a mood into recommendations
#[derive(Clone)]
pub struct MoodOrchestrator {
    moods: Arc<MoodTable>,
    genres: GenreResolver,
    search: CatalogSearch,
    details: DetailFetcher,
    trailers: TrailerResolver,
    candidate_limit: usize,
}

impl MoodOrchestrator {
    /// Create an orchestrator backed by the TMDB HTTP client.
    ///
    /// The client's HTTP timeout follows `request_timeout`, whatever
    /// `config.tmdb.timeout` says.
    pub fn new(config: &RetrieverConfig, moods: MoodTable) -> Result<Self> {
        let tmdb = config.tmdb.clone().with_timeout(config.request_timeout);
        let client = TmdbClient::new(tmdb).context("Failed to build TMDB client")?;
        Ok(Self::with_provider(Arc::new(client), moods, config))
    }

    /// Create an orchestrator over any provider (fakes in tests, proxies...)
    pub fn with_provider(
        provider: Arc<dyn MetadataProvider>,
        moods: MoodTable,
        config: &RetrieverConfig,
    ) -> Self {
        let timeout = config.request_timeout;

        let mut genres = GenreResolver::new(provider.clone()).with_timeout(timeout);
        if config.cache_genres {
            genres = genres.with_cache();
        }
        let search = CatalogSearch::new(provider.clone()).with_timeout(timeout);
        let details = DetailFetcher::new(provider.clone())
            .with_timeout(timeout)
            .with_poster_base(config.image_base.clone())
            .with_fallback_poster(config.fallback_poster.clone());
        let trailers = TrailerResolver::new(provider).with_timeout(timeout);

        Self {
            moods: Arc::new(moods),
            genres,
            search,
            details,
            trailers,
            candidate_limit: config.candidate_limit.clamp(1, MAX_CANDIDATES),
        }
    }

    /// The active mood table
    pub fn moods(&self) -> &MoodTable {
        &self.moods
    }

    /// Genre resolver sharing this orchestrator's provider (and cache)
    pub fn genre_resolver(&self) -> &GenreResolver {
        &self.genres
    }

    /// Main entry point: recommendations for a mood
    ///
    /// # Arguments
    /// * `mood` - Free-text mood, matched case-insensitively
    /// * `language` - Optional original-language code (e.g. "en"); blank means any
    pub async fn suggest(&self, mood: &str, language: Option<&str>) -> Suggestions {
        self.suggest_with_cancel(mood, language, &CancellationToken::new())
            .await
    }

    /// Like [`suggest`](Self::suggest), but stops with
    /// [`Apology::Cancelled`] as soon as `cancel` fires
    #[instrument(skip(self, cancel))]
    pub async fn suggest_with_cancel(
        &self,
        mood: &str,
        language: Option<&str>,
        cancel: &CancellationToken,
    ) -> Suggestions {
        let start_time = Instant::now();

        let suggestions = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Mood query for {:?} cancelled", mood);
                Suggestions::Apology(Apology::Cancelled)
            }
            suggestions = self.run(mood, language) => suggestions,
        };

        info!(
            "Mood query for {:?} finished in {:.2?}",
            mood,
            start_time.elapsed()
        );
        suggestions
    }

    async fn run(&self, mood: &str, language: Option<&str>) -> Suggestions {
        // Map mood to genre name
        let Some(genre_name) = self.moods.genre_for(mood) else {
            info!("No genre mapped for mood {:?}", mood);
            return Suggestions::Apology(Apology::UnknownMood);
        };

        // Resolve genre id
        let genre_id = match self.genres.resolve(genre_name).await {
            Outcome::Found(id) => id,
            Outcome::Missing | Outcome::Failed(_) => {
                info!("Could not resolve genre {} for mood {:?}", genre_name, mood);
                return Suggestions::Apology(Apology::UnknownGenre);
            }
        };

        // Fetch candidates; a failed search degrades to an empty list
        let candidates = self.search.search(genre_id, language).await.unwrap_or_default();
        let candidates = self.select_candidates(candidates);
        info!(
            "Enriching {} candidates for genre {} ({})",
            candidates.len(),
            genre_name,
            genre_id
        );

        let recommendations = self.enrich(&candidates).await;
        info!("Built {} recommendations", recommendations.len());

        Suggestions::Movies(recommendations)
    }

    /// Keep the most popular candidates, preserving provider order
    fn select_candidates(&self, mut candidates: Vec<MovieSummary>) -> Vec<MovieSummary> {
        candidates.truncate(self.candidate_limit);
        candidates
    }

    /// Enrich every candidate concurrently and join the whole batch
    async fn enrich(&self, candidates: &[MovieSummary]) -> Vec<Recommendation> {
        join_all(
            candidates
                .iter()
                .enumerate()
                .map(|(idx, summary)| self.enrich_one(idx + 1, summary)),
        )
        .await
    }

    async fn enrich_one(&self, rank: usize, summary: &MovieSummary) -> Recommendation {
        let (detail, trailer) = tokio::join!(
            self.details.fetch(summary.id),
            self.trailers.resolve(summary.id)
        );
        Recommendation::new(rank, summary, detail.unwrap_or_default(), trailer.found())
    }
}
