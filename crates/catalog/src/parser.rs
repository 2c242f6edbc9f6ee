//! Parser for mood table files.
//!
//! Format, one mapping per line: `mood::Genre`
//!
//! ```text
//! # comments and blank lines are skipped
//! happy::Comedy
//! rainy day::Drama
//! ```

use crate::error::{CatalogError, Result};
use std::fs;
use std::path::Path;

/// Parse a mood table file into (mood, genre) pairs, in file order.
///
/// Uniqueness is checked later by [`MoodTable::from_pairs`](crate::MoodTable::from_pairs).
pub fn parse_mood_file(path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)?;
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_moods(&content, &file)
}

/// Parse mood table text; `file` is only used in error messages
pub fn parse_moods(content: &str, file: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        let (mood, genre) = line_trimmed
            .split_once("::")
            .ok_or_else(|| parse_error(file, line_no, "Missing '::' separator"))?;

        let mood = mood.trim();
        if mood.is_empty() {
            return Err(parse_error(file, line_no, "Missing mood"));
        }
        let genre = genre.trim();
        if genre.is_empty() {
            return Err(parse_error(file, line_no, "Missing genre"));
        }

        pairs.push((mood.to_string(), genre.to_string()));
    }

    Ok(pairs)
}

fn parse_error(file: &str, line: usize, reason: &str) -> CatalogError {
    CatalogError::ParseError {
        file: file.to_string(),
        line,
        reason: reason.to_string(),
    }
}
