//! Insight synthesis types.

use reviewsight_core::{InsightSet, Recommendation, Review, SentimentLabel, Theme};
use serde::{Deserialize, Serialize};

/// Review subsets that theme tallies are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    PositiveSentiment,
    NegativeSentiment,
    /// Rating ≤ 2.
    LowRating,
    /// Rating ≥ 4.
    HighRating,
}

impl Segment {
    pub fn all() -> &'static [Segment] {
        &[
            Self::PositiveSentiment,
            Self::NegativeSentiment,
            Self::LowRating,
            Self::HighRating,
        ]
    }

    pub fn contains(&self, review: &Review) -> bool {
        match self {
            Self::PositiveSentiment => review.sentiment_label == Some(SentimentLabel::Positive),
            Self::NegativeSentiment => review.sentiment_label == Some(SentimentLabel::Negative),
            Self::LowRating => review.rating <= 2,
            Self::HighRating => review.rating >= 4,
        }
    }
}

/// Theme counts for one bank × one segment. `counts` excludes the
/// `Other`/unlabeled sentinels; `population` does not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeTally {
    pub segment: Segment,
    pub population: usize,
    /// Descending count, ties by first appearance.
    pub counts: Vec<(Theme, usize)>,
}

/// Per-bank headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankComparison {
    pub bank: String,
    pub avg_rating: f64,
    pub total_reviews: usize,
    pub positive_pct: f64,
    pub negative_pct: f64,
}

/// One row of the themes-by-bank summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSummaryRow {
    pub bank: String,
    pub theme: Theme,
    pub count: usize,
    /// Share of all of the bank's reviews.
    pub percentage: f64,
}

/// Insights and recommendations for one bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankInsights {
    pub bank: String,
    pub insights: InsightSet,
    pub recommendations: Vec<Recommendation>,
}
