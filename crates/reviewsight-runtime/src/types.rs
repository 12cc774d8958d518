//! Runtime types.

use reviewsight_core::AnalyzedReview;
use reviewsight_insights::{BankComparison, BankInsights, ThemeSummaryRow};
use serde::Serialize;

/// Theme coverage of one bank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeCoverage {
    pub bank: String,
    #[serde(rename = "distinctThemes")]
    pub distinct_themes: usize,
    #[serde(rename = "meetsTarget")]
    pub meets_target: bool,
}

/// Everything one `analyze` run produces.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub reviews: Vec<AnalyzedReview>,
    pub banks: Vec<BankInsights>,
    pub comparison: Vec<BankComparison>,
    #[serde(rename = "themeSummary")]
    pub theme_summary: Vec<ThemeSummaryRow>,
    pub coverage: Vec<ThemeCoverage>,
    #[serde(rename = "sentimentFilled")]
    pub sentiment_filled: usize,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}

impl AnalysisReport {
    pub fn bank(&self, name: &str) -> Option<&BankInsights> {
        self.banks.iter().find(|b| b.bank == name)
    }
}
