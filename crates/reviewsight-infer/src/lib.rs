//! ReviewSight Infer: keyword extraction backends and sentiment scoring.
//!
//! Provides the `KeywordBackend` trait for pulling salient terms out of a
//! review corpus. `TfidfBackend` weighs terms across the whole corpus;
//! `LexicalBackend` is the per-document fallback. `SentimentBackend` scores
//! reviews that arrive unlabeled.

pub mod backend;
pub mod sentiment;

pub use backend::{KeywordBackend, LexicalBackend, TfidfBackend};
pub use sentiment::{label_for, LexiconSentiment, SentimentBackend};

use std::sync::Arc;

use reviewsight_core::{ExtractionStrategy, PipelineConfig};

/// Create the keyword backend selected by `config`. Called once per run.
pub fn create_extractor(config: &PipelineConfig) -> Arc<dyn KeywordBackend> {
    match config.strategy {
        ExtractionStrategy::Tfidf => {
            tracing::info!(
                "Using TF-IDF keyword extraction (max_features={}, min_df={})",
                config.max_features,
                config.min_df
            );
            Arc::new(TfidfBackend::new(config))
        }
        ExtractionStrategy::Lexical => {
            tracing::info!("Using lexical keyword extraction (no corpus statistics)");
            Arc::new(LexicalBackend::new(config))
        }
    }
}

/// Create the sentiment backend used to fill missing labels.
pub fn create_sentiment() -> Arc<dyn SentimentBackend> {
    tracing::info!("Using lexicon sentiment scorer");
    Arc::new(LexiconSentiment::new())
}
