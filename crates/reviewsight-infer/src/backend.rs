//! Keyword extraction backend trait and implementations.
//!
//! The `KeywordBackend` trait abstracts over how salient terms are pulled
//! out of a review corpus. Implementations:
//! - `TfidfBackend`: corpus-wide TF-IDF over unigrams and bigrams
//! - `LexicalBackend`: per-document stopword-filtered tokens, no corpus statistics

use reviewsight_core::{KeywordSet, PipelineConfig};
use reviewsight_ingest::extract::{lexical_keywords, normalize_text};
use reviewsight_ingest::TfidfVectorizer;
use tracing::{debug, warn};

/// Trait for keyword extraction backends.
pub trait KeywordBackend: Send + Sync {
    /// Extract one keyword set per document, in input order.
    fn extract_corpus(&self, texts: &[&str]) -> Vec<KeywordSet>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// TF-IDF extraction. A corpus the vectorizer cannot fit yields an empty
/// keyword set for every document.
pub struct TfidfBackend {
    vectorizer: TfidfVectorizer,
    top_terms: usize,
    stored_terms: usize,
}

impl TfidfBackend {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(config.max_features, config.min_df),
            top_terms: config.top_terms,
            stored_terms: config.stored_terms,
        }
    }
}

impl KeywordBackend for TfidfBackend {
    fn extract_corpus(&self, texts: &[&str]) -> Vec<KeywordSet> {
        let docs: Vec<String> = texts.iter().map(|t| normalize_text(t)).collect();

        let matrix = match self.vectorizer.fit_transform(&docs) {
            Ok(m) => m,
            Err(e) => {
                warn!(
                    "Keyword extraction failed for {} documents: {}. Leaving keywords empty.",
                    texts.len(),
                    e
                );
                return vec![KeywordSet::empty(); texts.len()];
            }
        };

        let sets: Vec<KeywordSet> = (0..docs.len())
            .map(|row| {
                let mut terms = matrix.top_terms(row, self.top_terms);
                terms.truncate(self.stored_terms);
                KeywordSet::new(terms)
            })
            .collect();

        debug!(
            "TF-IDF keywords: {} of {} documents non-empty",
            sets.iter().filter(|s| !s.is_empty()).count(),
            sets.len()
        );
        sets
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}

/// Per-document fallback extraction.
pub struct LexicalBackend {
    top_terms: usize,
    stored_terms: usize,
}

impl LexicalBackend {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            top_terms: config.top_terms,
            stored_terms: config.stored_terms,
        }
    }
}

impl KeywordBackend for LexicalBackend {
    fn extract_corpus(&self, texts: &[&str]) -> Vec<KeywordSet> {
        texts
            .iter()
            .map(|t| {
                let mut terms = lexical_keywords(t, self.top_terms);
                terms.truncate(self.stored_terms);
                KeywordSet::new(terms)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "lexical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min_df: usize) -> PipelineConfig {
        PipelineConfig {
            min_df,
            ..Default::default()
        }
    }

    #[test]
    fn test_tfidf_backend_stores_top_five() {
        let backend = TfidfBackend::new(&config(1));
        let sets = backend.extract_corpus(&[
            "login failed password reset account locked again today",
            "login failed",
        ]);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].len(), 5);
        assert!(sets[1].terms().contains(&"login failed".to_string()));
    }

    #[test]
    fn test_tfidf_backend_recovers_degenerate_corpus() {
        let backend = TfidfBackend::new(&config(2));
        let sets = backend.extract_corpus(&["only once", "something else"]);
        assert_eq!(sets, vec![KeywordSet::empty(), KeywordSet::empty()]);
        assert!(backend.extract_corpus(&[]).is_empty());
    }

    #[test]
    fn test_tfidf_backend_empty_text_yields_empty_set() {
        let backend = TfidfBackend::new(&config(2));
        let sets = backend.extract_corpus(&["Login failed!", "!!!", "login failed"]);
        assert!(!sets[0].is_empty());
        assert!(sets[1].is_empty());
    }

    #[test]
    fn test_tfidf_backend_deterministic() {
        let backend = TfidfBackend::new(&config(1));
        let texts = ["slow transfer again", "transfer failed", "app crash on login"];
        assert_eq!(backend.extract_corpus(&texts), backend.extract_corpus(&texts));
    }

    #[test]
    fn test_lexical_backend() {
        let backend = LexicalBackend::new(&PipelineConfig::default());
        let sets = backend.extract_corpus(&["The app keeps crashing on login", ""]);
        assert_eq!(sets[0].terms(), &["app", "keeps", "crashing", "login"]);
        assert!(sets[1].is_empty());
        assert_eq!(backend.name(), "lexical");
    }
}
