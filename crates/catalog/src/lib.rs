//! # Catalog Crate
//!
//! Domain types shared by every stage of a mood query, plus the mood table
//! that turns free-text moods into provider genre names.
//!
//! ## Main Components
//!
//! - **types**: Genre, MovieSummary, MovieDetail, Recommendation
//! - **mood**: the validated, immutable MoodTable
//! - **parser**: reads `mood::Genre` files into a MoodTable
//! - **error**: Error types for table construction
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::MoodTable;
//!
//! let moods = MoodTable::default();
//! assert_eq!(moods.genre_for("Happy"), Some("Comedy"));
//!
//! let custom = MoodTable::load_from_file(Path::new("moods.txt"))?;
//! ```

pub mod error;
pub mod mood;
pub mod parser;
pub mod types;

pub use error::{CatalogError, Result};
pub use mood::{DEFAULT_MOODS, MoodTable};
pub use types::{
    // Type aliases
    GenreId,
    MovieId,
    // Core types
    Genre,
    MovieDetail,
    MovieSummary,
    Recommendation,
    // Constants
    FALLBACK_POSTER,
    UNKNOWN_DIRECTOR,
    // Serde helpers
    null_as_default,
};
