//! The mood → genre mapping.
//!
//! A [`MoodTable`] is plain data: built once (from the built-in pairs or a
//! mood table file), validated for unique keys, and never mutated afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::parser;

/// Built-in mapping, kept verbatim (including the "aderanaline rush" spelling).
pub const DEFAULT_MOODS: &[(&str, &str)] = &[
    ("happy", "Comedy"),
    ("sad", "Drama"),
    ("excited", "Action"),
    ("romantic", "Romance"),
    ("aderanaline rush", "Horror"),
    ("relax", "Family"),
    ("bored", "Animation"),
    ("angry", "Thriller"),
    ("adventurous", "Adventure"),
    ("nostalgic", "Documentary"),
    ("mystery", "Mystery"),
    ("serious", "War"),
    ("inspired", "Biography"),
];

/// Immutable mapping from lower-cased mood keyword to genre display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodTable {
    moods: BTreeMap<String, String>,
}

impl MoodTable {
    /// Build a table from (mood, genre) pairs.
    ///
    /// Moods are trimmed and lower-cased; two moods that normalize to the
    /// same key are rejected with [`CatalogError::DuplicateMood`].
    pub fn from_pairs<I, M, G>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (M, G)>,
        M: AsRef<str>,
        G: AsRef<str>,
    {
        let mut moods = BTreeMap::new();
        for (mood, genre) in pairs {
            let key = normalize(mood.as_ref());
            let genre = genre.as_ref().trim();

            if key.is_empty() {
                return Err(CatalogError::InvalidValue {
                    field: "mood".to_string(),
                    value: mood.as_ref().to_string(),
                });
            }
            if genre.is_empty() {
                return Err(CatalogError::InvalidValue {
                    field: "genre".to_string(),
                    value: genre.to_string(),
                });
            }
            if moods.contains_key(&key) {
                return Err(CatalogError::DuplicateMood { mood: key });
            }
            moods.insert(key, genre.to_string());
        }
        Ok(Self { moods })
    }

    /// Load a table from a `mood::Genre` file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let pairs = parser::parse_mood_file(path)?;
        let table = Self::from_pairs(pairs)?;
        tracing::debug!("Loaded {} moods from {}", table.len(), path.display());
        Ok(table)
    }

    /// Genre display name for a mood, matched case-insensitively
    pub fn genre_for(&self, mood: &str) -> Option<&str> {
        self.moods.get(&normalize(mood)).map(String::as_str)
    }

    /// All (mood, genre) pairs in alphabetical mood order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.moods.iter().map(|(m, g)| (m.as_str(), g.as_str()))
    }

    pub fn len(&self) -> usize {
        self.moods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }
}

impl Default for MoodTable {
    fn default() -> Self {
        let moods = DEFAULT_MOODS
            .iter()
            .map(|(mood, genre)| (mood.to_string(), genre.to_string()))
            .collect();
        Self { moods }
    }
}

fn normalize(mood: &str) -> String {
    mood.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        // The built-in pairs must survive the same validation as user tables
        let validated = MoodTable::from_pairs(DEFAULT_MOODS.iter().copied()).unwrap();
        assert_eq!(validated, MoodTable::default());
        assert_eq!(validated.len(), DEFAULT_MOODS.len());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = MoodTable::default();
        assert_eq!(table.genre_for("happy"), Some("Comedy"));
        assert_eq!(table.genre_for("HAPPY"), Some("Comedy"));
        assert_eq!(table.genre_for("  Sad "), Some("Drama"));
        assert_eq!(table.genre_for("Aderanaline Rush"), Some("Horror"));
    }

    #[test]
    fn test_unknown_mood() {
        let table = MoodTable::default();
        assert_eq!(table.genre_for("hungry"), None);
        assert_eq!(table.genre_for(""), None);
        assert_eq!(table.genre_for("adrenaline rush"), None);
    }

    #[test]
    fn test_duplicate_moods_rejected() {
        let result = MoodTable::from_pairs([("Happy", "Comedy"), ("happy ", "Drama")]);
        match result {
            Err(CatalogError::DuplicateMood { mood }) => assert_eq!(mood, "happy"),
            other => panic!("expected DuplicateMood, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(matches!(
            MoodTable::from_pairs([("  ", "Comedy")]),
            Err(CatalogError::InvalidValue { .. })
        ));
        assert!(matches!(
            MoodTable::from_pairs([("happy", "")]),
            Err(CatalogError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_iter_is_sorted() {
        let table = MoodTable::from_pairs([("sad", "Drama"), ("angry", "Thriller")]).unwrap();
        let moods: Vec<_> = table.iter().map(|(m, _)| m).collect();
        assert_eq!(moods, vec!["angry", "sad"]);
    }
}
