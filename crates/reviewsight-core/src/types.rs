//! Review records and the derived views produced by each pipeline stage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// Sentiment polarity attached to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "POSITIVE" => Ok(Self::Positive),
            "NEGATIVE" => Ok(Self::Negative),
            "NEUTRAL" => Ok(Self::Neutral),
            other => Err(Error::Parse(format!("unknown sentiment label: {}", other))),
        }
    }
}

/// One customer review. Never mutated once it reaches the analysis stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: usize,
    #[serde(rename = "review")]
    pub text: String,
    /// Star rating, 1..=5.
    pub rating: u8,
    pub bank: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub sentiment_label: Option<SentimentLabel>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
}

impl Review {
    /// Minimal review with no date, sentiment or source.
    pub fn new(id: usize, text: impl Into<String>, rating: u8, bank: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            rating,
            bank: bank.into(),
            date: None,
            sentiment_label: None,
            sentiment_score: None,
            source: None,
        }
    }

    pub fn with_sentiment(mut self, label: SentimentLabel, score: f64) -> Self {
        self.sentiment_label = Some(label);
        self.sentiment_score = Some(score);
        self
    }
}

/// Salient terms of one review, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new(terms: Vec<String>) -> Self {
        Self(terms)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn terms(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-joined terms, the stored and classified form.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

/// Topical label assigned to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Theme {
    AccountAccess,
    TransactionPerformance,
    UserInterface,
    CustomerSupport,
    AppReliability,
    FeatureRequests,
    SecurityPrivacy,
    /// Keywords present but no taxonomy trigger matched.
    Other,
    /// No keywords at all. Rendered as the empty string.
    Unlabeled,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AccountAccess => "Account Access Issues",
            Self::TransactionPerformance => "Transaction Performance",
            Self::UserInterface => "User Interface & Experience",
            Self::CustomerSupport => "Customer Support",
            Self::AppReliability => "App Reliability",
            Self::FeatureRequests => "Feature Requests",
            Self::SecurityPrivacy => "Security & Privacy",
            Self::Other => "Other",
            Self::Unlabeled => "",
        }
    }

    /// Whether this label may surface as an insight.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, Self::Other | Self::Unlabeled)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let theme = match s {
            "Account Access Issues" => Self::AccountAccess,
            "Transaction Performance" => Self::TransactionPerformance,
            "User Interface & Experience" => Self::UserInterface,
            "Customer Support" => Self::CustomerSupport,
            "App Reliability" => Self::AppReliability,
            "Feature Requests" => Self::FeatureRequests,
            "Security & Privacy" => Self::SecurityPrivacy,
            "Other" => Self::Other,
            "" => Self::Unlabeled,
            other => return Err(Error::Parse(format!("unknown theme: {}", other))),
        };
        Ok(theme)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.label().to_string()
    }
}

impl TryFrom<String> for Theme {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A review joined with its extracted keywords and theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedReview {
    pub review: Review,
    pub keywords: KeywordSet,
    pub theme: Theme,
}

/// Share of a segment that raised one theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub theme: Theme,
    pub count: usize,
    /// `count / segment population × 100`.
    pub percentage: f64,
}

/// Ranked drivers and pain points for one bank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightSet {
    pub drivers: Vec<Insight>,
    pub pain_points: Vec<Insight>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical"),
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    #[serde(rename = "recommendation")]
    pub text: String,
    pub priority: Priority,
}
