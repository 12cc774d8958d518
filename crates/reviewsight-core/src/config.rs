//! Pipeline configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Paths to the ReviewSight data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Raw review exports (`data/raw/`).
    pub raw: PathBuf,
    /// Preprocessed and theme-augmented records (`data/processed/`).
    pub processed: PathBuf,
    /// Insight reports (`data/reports/`).
    pub reports: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            raw: root.join("raw"),
            processed: root.join("processed"),
            reports: root.join("reports"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.raw)?;
        std::fs::create_dir_all(&self.processed)?;
        std::fs::create_dir_all(&self.reports)?;
        Ok(())
    }
}

/// Which keyword extraction backend the pipeline runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    /// Corpus-wide TF-IDF over unigrams and bigrams.
    Tfidf,
    /// Per-document stopword-filtered tokens, no corpus statistics.
    Lexical,
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tfidf => write!(f, "tfidf"),
            Self::Lexical => write!(f, "lexical"),
        }
    }
}

impl FromStr for ExtractionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tfidf" | "tf-idf" => Ok(Self::Tfidf),
            "lexical" => Ok(Self::Lexical),
            other => Err(Error::Config(format!("unknown extraction strategy: {}", other))),
        }
    }
}

/// Settings for one pipeline run, constructed once and passed by reference
/// into the extraction stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Vocabulary cap for the TF-IDF vectorizer.
    pub max_features: usize,
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Terms ranked per document before truncation.
    pub top_terms: usize,
    /// Terms kept in the stored keyword string.
    pub stored_terms: usize,
    /// Extraction backend.
    pub strategy: ExtractionStrategy,
    /// Score reviews that arrive without a sentiment label.
    pub fill_sentiment: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_features: 50,
            min_df: 2,
            top_terms: 10,
            stored_terms: 5,
            strategy: ExtractionStrategy::Tfidf,
            fill_sentiment: false,
        }
    }
}

impl PipelineConfig {
    /// Build configuration from environment variables, keeping defaults for
    /// anything absent or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_features = env_parse("REVIEWSIGHT_MAX_FEATURES")
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.max_features);
        let min_df = env_parse("REVIEWSIGHT_MIN_DF")
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.min_df);
        let strategy = std::env::var("REVIEWSIGHT_STRATEGY")
            .ok()
            .and_then(|s| match s.parse::<ExtractionStrategy>() {
                Ok(strategy) => Some(strategy),
                Err(e) => {
                    tracing::warn!("{}; using {}", e, defaults.strategy);
                    None
                }
            })
            .unwrap_or(defaults.strategy);
        let fill_sentiment = std::env::var("REVIEWSIGHT_FILL_SENTIMENT")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.fill_sentiment);

        Self {
            max_features,
            min_df,
            strategy,
            fill_sentiment,
            ..defaults
        }
    }
}

/// Resolve the data directory from `REVIEWSIGHT_DATA_DIR`, defaulting to `data`.
pub fn data_dir_from_env() -> PathBuf {
    std::env::var("REVIEWSIGHT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
