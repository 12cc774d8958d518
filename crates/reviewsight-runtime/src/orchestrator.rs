//! Orchestrator: runs the review analysis stages end to end.

use std::sync::Arc;

use reviewsight_core::{AnalyzedReview, PipelineConfig, Review};
use reviewsight_infer::{create_extractor, create_sentiment, KeywordBackend, SentimentBackend};
use reviewsight_ingest::{classify_by_bank, classify_keywords, theme_distribution};
use reviewsight_insights::{
    banks, compare_banks, generate_recommendations, identify_drivers_and_pain_points,
    theme_coverage, theme_summary, BankInsights,
};
use tracing::{debug, info};

use crate::types::*;

/// Themes kept per bank in the theme summary.
pub const SUMMARY_TOP_THEMES: usize = 5;

/// Top-level orchestrator. Backends are chosen once at construction.
pub struct Orchestrator {
    config: PipelineConfig,
    extractor: Arc<dyn KeywordBackend>,
    sentiment: Option<Arc<dyn SentimentBackend>>,
}

impl Orchestrator {
    pub fn new(config: PipelineConfig) -> Self {
        let extractor = create_extractor(&config);
        let sentiment = config.fill_sentiment.then(create_sentiment);

        info!(
            "Orchestrator initialized: extractor={}, fill_sentiment={}",
            extractor.name(),
            config.fill_sentiment
        );

        Self {
            config,
            extractor,
            sentiment,
        }
    }

    /// Create with an explicit keyword backend (for testing).
    pub fn with_extractor(config: PipelineConfig, extractor: Arc<dyn KeywordBackend>) -> Self {
        let sentiment = config.fill_sentiment.then(create_sentiment);
        Self {
            config,
            extractor,
            sentiment,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage over `reviews`.
    pub fn analyze(&self, reviews: Vec<Review>) -> AnalysisReport {
        let start = std::time::Instant::now();
        info!("Analyzing {} reviews", reviews.len());

        let (reviews, sentiment_filled) = self.fill_sentiment(reviews);
        let analyzed = self.extract_and_classify(reviews);

        let bank_insights: Vec<BankInsights> = banks(analyzed.iter().map(|r| &r.review))
            .into_iter()
            .map(|bank| {
                let insights = identify_drivers_and_pain_points(&analyzed, Some(bank.as_str()));
                let recommendations = generate_recommendations(&insights);
                info!(
                    "{}: {} drivers, {} pain points, {} recommendations",
                    bank,
                    insights.drivers.len(),
                    insights.pain_points.len(),
                    recommendations.len()
                );
                BankInsights {
                    bank,
                    insights,
                    recommendations,
                }
            })
            .collect();

        let plain: Vec<Review> = analyzed.iter().map(|r| r.review.clone()).collect();
        let comparison = compare_banks(&plain);
        let bank_themes =
            classify_by_bank(analyzed.iter().map(|r| (r.review.bank.as_str(), &r.keywords)));
        let summary = theme_summary(&bank_themes, SUMMARY_TOP_THEMES);
        let coverage: Vec<ThemeCoverage> = theme_coverage(&bank_themes)
            .into_iter()
            .map(|(bank, distinct_themes, meets_target)| ThemeCoverage {
                bank,
                distinct_themes,
                meets_target,
            })
            .collect();

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Analysis complete: reviews={}, banks={}, duration={}ms",
            analyzed.len(),
            bank_insights.len(),
            duration_ms
        );

        AnalysisReport {
            reviews: analyzed,
            banks: bank_insights,
            comparison,
            theme_summary: summary,
            coverage,
            sentiment_filled,
            duration_ms,
        }
    }

    /// Keywords over the whole corpus, then one theme per review.
    pub fn extract_and_classify(&self, reviews: Vec<Review>) -> Vec<AnalyzedReview> {
        let texts: Vec<&str> = reviews.iter().map(|r| r.text.as_str()).collect();
        let keywords = self.extractor.extract_corpus(&texts);
        debug!("{} stage produced {} keyword sets", self.extractor.name(), keywords.len());

        let analyzed: Vec<AnalyzedReview> = reviews
            .into_iter()
            .zip(keywords)
            .map(|(review, keywords)| {
                let theme = classify_keywords(&keywords);
                AnalyzedReview {
                    review,
                    keywords,
                    theme,
                }
            })
            .collect();

        let themes: Vec<_> = analyzed.iter().map(|r| r.theme).collect();
        for (theme, count) in theme_distribution(&themes) {
            debug!("Theme {:?}: {}", theme.label(), count);
        }
        analyzed
    }

    fn fill_sentiment(&self, reviews: Vec<Review>) -> (Vec<Review>, usize) {
        let Some(scorer) = &self.sentiment else {
            return (reviews, 0);
        };
        let mut filled = 0;
        let reviews = reviews
            .into_iter()
            .map(|review| {
                if review.sentiment_label.is_some() {
                    return review;
                }
                filled += 1;
                let (label, score) = scorer.score(&review.text);
                review.with_sentiment(label, score)
            })
            .collect();
        if filled > 0 {
            info!("Scored sentiment for {} unlabeled reviews", filled);
        }
        (reviews, filled)
    }
}
