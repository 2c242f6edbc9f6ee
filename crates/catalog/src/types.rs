//! Core domain types for mood-based recommendations.
//!
//! Every value here is request-scoped: it is built for one mood query and
//! dropped once the caller has rendered the result.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Provider identifier for a genre (e.g. 35 for Comedy on TMDB)
pub type GenreId = u32;

/// Provider identifier for a movie
pub type MovieId = u64;

/// Poster used when the provider has no artwork for a movie
pub const FALLBACK_POSTER: &str = "default-poster.jpg";

/// Director shown when the crew list names nobody with the "Director" job
pub const UNKNOWN_DIRECTOR: &str = "N/A";

/// Decodes `null` the same as a missing field: as `T::default()`.
///
/// TMDB nulls out fields it has no value for, and one such entry must not
/// fail the whole list it arrives in.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Provider Types
// =============================================================================

/// A genre as listed by the provider's genre catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A candidate movie returned by catalog search, before enrichment.
///
/// Only `id` and `title` drive the enrichment fan-out; `popularity` is kept
/// so callers can see why the provider ranked it where it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
}

// =============================================================================
// Enriched Types
// =============================================================================

/// Descriptive fields derived from the provider's movie details and credits.
///
/// `MovieDetail::default()` is the empty record used when the detail fetch
/// fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    pub tagline: Option<String>,
    pub poster_url: Option<String>,
    /// Average vote, 0.0 to 10.0
    pub rating: Option<f32>,
    /// Genre names joined with ", "
    pub genre: Option<String>,
    /// Director name, or "N/A" when the crew names none
    pub director: Option<String>,
    /// ISO date, e.g. "1999-03-31"
    pub release_date: Option<String>,
    pub description: Option<String>,
    /// First five cast names joined with ", "
    pub cast: Option<String>,
}

impl MovieDetail {
    /// True for the empty record (nothing was fetched)
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The fully enriched record handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// 1-based position in the provider's popularity ordering
    pub rank: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub trailer_url: Option<String>,
    #[serde(flatten)]
    pub detail: MovieDetail,
}

impl Recommendation {
    /// Merge a candidate with its fetched detail and trailer
    pub fn new(
        rank: usize,
        summary: &MovieSummary,
        detail: MovieDetail,
        trailer_url: Option<String>,
    ) -> Self {
        Self {
            rank,
            movie_id: summary.id,
            title: summary.title.clone(),
            trailer_url,
            detail,
        }
    }
}
