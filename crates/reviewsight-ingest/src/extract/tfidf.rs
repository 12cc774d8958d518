//! Corpus-wide TF-IDF over unigrams and bigrams.
//!
//! Documents are expected to be normalized already (see
//! [`normalize_text`](super::normalize_text)). Stopwords are dropped before
//! bigrams are formed, so a bigram joins two adjacent surviving tokens.

use std::collections::{BTreeMap, HashMap};

use ndarray::Array2;
use reviewsight_core::{Error, Result};
use tracing::debug;

use super::normalize::tokenize;
use super::stopwords::is_stopword;

/// Vectorizer settings. Built from [`PipelineConfig`](reviewsight_core::PipelineConfig)
/// by the extraction backend.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    pub max_features: usize,
    pub min_df: usize,
}

/// Fitted vocabulary and the dense documents × terms weight matrix.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    weights: Array2<f64>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            max_features: 50,
            min_df: 2,
        }
    }
}

impl TfidfVectorizer {
    pub fn new(max_features: usize, min_df: usize) -> Self {
        Self {
            max_features,
            min_df,
        }
    }

    /// Fit the vocabulary on `docs` and return their weights.
    ///
    /// Fails with [`Error::Vectorize`] when the corpus is empty or no term
    /// survives the document-frequency floor.
    pub fn fit_transform(&self, docs: &[String]) -> Result<TfidfMatrix> {
        if docs.is_empty() {
            return Err(Error::Vectorize("empty corpus".into()));
        }

        let counts: Vec<HashMap<String, usize>> = docs.iter().map(|d| term_counts(d)).collect();

        // Document frequency and total corpus frequency per term.
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        let mut total: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &counts {
            for (term, n) in doc {
                *df.entry(term.as_str()).or_insert(0) += 1;
                *total.entry(term.as_str()).or_insert(0) += n;
            }
        }

        let min_df = self.min_df.max(1);
        let mut kept: Vec<(&str, usize)> = total
            .into_iter()
            .filter(|(term, _)| df.get(term).copied().unwrap_or(0) >= min_df)
            .collect();
        if kept.is_empty() {
            return Err(Error::Vectorize(format!(
                "no terms remain after pruning (min_df = {})",
                min_df
            )));
        }

        // Highest corpus count first; BTreeMap iteration already gives
        // alphabetical order, and the sort is stable.
        kept.sort_by(|a, b| b.1.cmp(&a.1));
        kept.truncate(self.max_features.max(1));

        let mut vocabulary: Vec<String> = kept.iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let n_docs = docs.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|t| {
                let d = df.get(t.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + d)).ln() + 1.0
            })
            .collect();

        let mut weights = Array2::<f64>::zeros((docs.len(), vocabulary.len()));
        for (row, doc) in counts.iter().enumerate() {
            for (term, n) in doc {
                if let Some(&col) = index.get(term.as_str()) {
                    weights[[row, col]] = *n as f64 * idf[col];
                }
            }
            let mut r = weights.row_mut(row);
            let norm = r.iter().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                r.mapv_inplace(|w| w / norm);
            }
        }

        debug!(
            "TF-IDF fitted {} documents, {} terms",
            docs.len(),
            vocabulary.len()
        );

        Ok(TfidfMatrix {
            vocabulary,
            weights,
        })
    }
}

impl TfidfMatrix {
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn n_docs(&self) -> usize {
        self.weights.nrows()
    }

    pub fn weight(&self, row: usize, term: &str) -> Option<f64> {
        let col = self.vocabulary.iter().position(|t| t == term)?;
        self.weights.get([row, col]).copied()
    }

    /// Up to `k` terms of document `row` by descending weight. Ties go to the
    /// earlier vocabulary entry; zero weights are never returned.
    pub fn top_terms(&self, row: usize, k: usize) -> Vec<String> {
        if row >= self.weights.nrows() {
            return Vec::new();
        }
        let mut scored: Vec<(usize, f64)> = self
            .weights
            .row(row)
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, w)| *w > 0.0)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored
            .into_iter()
            .take(k)
            .map(|(col, _)| self.vocabulary[col].clone())
            .collect()
    }
}

/// Unigram and bigram counts for one normalized document.
fn term_counts(doc: &str) -> HashMap<String, usize> {
    let tokens: Vec<&str> = tokenize(doc)
        .into_iter()
        .filter(|t| !is_stopword(t))
        .collect();

    let mut counts = HashMap::new();
    for token in &tokens {
        *counts.entry((*token).to_string()).or_insert(0) += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}
