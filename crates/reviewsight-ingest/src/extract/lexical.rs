//! Per-document keyword fallback that needs no corpus statistics.

use std::collections::HashSet;

use super::normalize::{normalize_text, tokenize};
use super::stopwords::is_stopword;

/// Non-stopword tokens longer than two characters, in first-occurrence order,
/// deduplicated, at most `max` of them.
pub fn lexical_keywords(text: &str, max: usize) -> Vec<String> {
    let normalized = normalize_text(text);
    let mut seen = HashSet::new();
    tokenize(&normalized)
        .into_iter()
        .filter(|t| t.len() > 2 && !is_stopword(t))
        .filter(|t| seen.insert(*t))
        .take(max)
        .map(str::to_string)
        .collect()
}
