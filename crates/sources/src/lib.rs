//! # Sources Crate
//!
//! The four leaf operations of a mood query. Each wraps one provider
//! endpoint, bounds it with a deadline, and reports a typed [`Outcome`]
//! instead of an error.
//!
//! ## Components
//!
//! - **GenreResolver**: genre name → genre id (optionally cached)
//! - **CatalogSearch**: genre id + language → candidates, most popular first
//! - **DetailFetcher**: movie id → tagline, poster, rating, director, cast...
//! - **TrailerResolver**: movie id → YouTube embed URL
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CatalogSearch, GenreResolver};
//!
//! let provider: Arc<dyn MetadataProvider> = Arc::new(TmdbClient::new(config)?);
//! let genres = GenreResolver::new(provider.clone());
//! let search = CatalogSearch::new(provider.clone());
//!
//! if let Some(id) = genres.resolve("Comedy").await.found() {
//!     let candidates = search.search(id, Some("en")).await.unwrap_or_default();
//! }
//! ```

use std::time::Duration;

pub mod catalog_search;
pub mod detail_fetcher;
pub mod genre_resolver;
pub mod outcome;
pub mod trailer_resolver;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

// Re-export commonly used types
pub use catalog_search::CatalogSearch;
pub use detail_fetcher::{DEFAULT_POSTER_BASE, DetailFetcher};
pub use genre_resolver::GenreResolver;
pub use outcome::Outcome;
pub use trailer_resolver::TrailerResolver;

/// Per-call deadline used unless a leaf is given another
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);
