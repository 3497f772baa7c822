//! Candidate coordinate generation for keyword probes.
//!
//! Well-known library families resolve through a data-driven shortcut table
//! before the generic group templates are tried. Candidate order is
//! significant: probes run (and hits surface) in exactly this order.

use std::collections::{HashMap, HashSet};

use crate::types::Coordinate;

const BUILTIN_SHORTCUTS: &str = include_str!("shortcuts.json");

/// Keyword-to-coordinates shortcut table plus the generic templates.
#[derive(Debug, Clone, Default)]
pub struct PatternBook {
    shortcuts: HashMap<String, Vec<Coordinate>>,
}

impl PatternBook {
    /// The embedded table of well-known Android/Kotlin library families.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_SHORTCUTS).expect("embedded shortcut table is valid JSON")
    }

    /// Loads a caller-supplied table: a JSON object mapping lowercase
    /// keywords to ordered coordinate lists. Replaces the builtin table
    /// entirely.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let shortcuts = serde_json::from_str(json)?;
        Ok(Self { shortcuts })
    }

    /// A book with no shortcuts; only the generic templates apply.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ordered, deduplicated candidate coordinates for `keyword`: shortcut
    /// entries first, then the generic templates.
    ///
    /// Keywords that cannot appear in a registry path (anything outside
    /// `a-z`, `0-9`, `.`, `_`, `-` after trimming and lowercasing) produce
    /// no candidates at all.
    pub fn candidates(&self, keyword: &str) -> Vec<Coordinate> {
        let keyword = keyword.trim().to_lowercase();
        if !is_probe_safe(&keyword) {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        if let Some(entries) = self.shortcuts.get(&keyword) {
            candidates.extend(entries.iter().cloned());
        }
        candidates.extend(generic_candidates(&keyword));

        dedup_in_order(candidates)
    }
}

/// Generic guesses applied to any keyword, most specific group first.
fn generic_candidates(keyword: &str) -> Vec<Coordinate> {
    vec![
        Coordinate::new(format!("androidx.{keyword}"), keyword),
        Coordinate::new(format!("androidx.{keyword}"), format!("{keyword}-ktx")),
        Coordinate::new(format!("androidx.compose.{keyword}"), keyword),
        Coordinate::new(format!("com.google.android.{keyword}"), keyword),
        Coordinate::new(format!("com.google.{keyword}"), keyword),
    ]
}

fn is_probe_safe(keyword: &str) -> bool {
    !keyword.is_empty()
        && keyword
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
}

fn dedup_in_order(candidates: Vec<Coordinate>) -> Vec<Coordinate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_parses() {
        let book = PatternBook::builtin();
        assert!(!book.candidates("room").is_empty());
    }

    #[test]
    fn test_shortcut_entries_come_first() {
        let book = PatternBook::builtin();
        let candidates = book.candidates("room");

        assert_eq!(candidates[0], Coordinate::new("androidx.room", "room-runtime"));
        assert_eq!(candidates[1], Coordinate::new("androidx.room", "room-ktx"));
    }

    #[test]
    fn test_generic_templates_follow_shortcuts() {
        let book = PatternBook::builtin();
        let candidates = book.candidates("room");

        // androidx.room:room is a generic guess, not a shortcut entry.
        assert!(candidates.contains(&Coordinate::new("androidx.room", "room")));
        assert!(candidates.contains(&Coordinate::new("com.google.room", "room")));
    }

    #[test]
    fn test_unknown_keyword_gets_generic_templates_only() {
        let book = PatternBook::builtin();
        let candidates = book.candidates("exoplayer");

        assert_eq!(candidates.len(), 5);
        assert_eq!(
            candidates[0],
            Coordinate::new("androidx.exoplayer", "exoplayer")
        );
    }

    #[test]
    fn test_candidates_are_unique() {
        // "room" shortcuts already contain androidx.room:room-ktx, which the
        // generic templates would produce again.
        let book = PatternBook::builtin();
        let candidates = book.candidates("room");

        let mut seen = HashSet::new();
        for candidate in &candidates {
            assert!(seen.insert(candidate.clone()), "duplicate: {candidate}");
        }
    }

    #[test]
    fn test_keyword_is_normalized() {
        let book = PatternBook::builtin();
        assert_eq!(book.candidates("  Room "), book.candidates("room"));
    }

    #[test]
    fn test_unsafe_keywords_produce_nothing() {
        let book = PatternBook::builtin();
        assert!(book.candidates("a/b").is_empty());
        assert!(book.candidates("room runtime").is_empty());
        assert!(book.candidates("série").is_empty());
        assert!(book.candidates("").is_empty());
    }

    #[test]
    fn test_custom_table_replaces_builtin() {
        let book = PatternBook::from_json(
            r#"{"media": [{"group": "androidx.media3", "artifact": "media3-exoplayer"}]}"#,
        )
        .unwrap();

        let candidates = book.candidates("media");
        assert_eq!(
            candidates[0],
            Coordinate::new("androidx.media3", "media3-exoplayer")
        );

        // The builtin room entry is gone.
        assert!(!book.candidates("room").contains(&Coordinate::new("androidx.room", "room-runtime")));
    }

    #[test]
    fn test_empty_book_keeps_generic_templates() {
        let candidates = PatternBook::empty().candidates("room");
        assert_eq!(candidates.len(), 5);
    }

    #[test]
    fn test_malformed_table_is_rejected() {
        assert!(PatternBook::from_json("{\"room\": \"not-a-list\"}").is_err());
    }
}
