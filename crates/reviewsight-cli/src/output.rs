//! Output writers for preprocessed records and analysis results.
//!
//! - `reviews_with_themes.csv`: one row per review with keywords and theme
//! - `themes_by_bank.csv`: top themes per bank
//! - `insights_data.json`: per-bank insights and recommendations
//! - `insights_report.md`: the Markdown report

use std::path::{Path, PathBuf};

use reviewsight_core::{AnalyzedReview, InsightSet, Recommendation, Review};
use reviewsight_ingest::QualityReport;
use reviewsight_insights::{render_markdown, BankInsights};
use reviewsight_runtime::AnalysisReport;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::info;

pub const REVIEWS_FILE: &str = "reviews_with_themes.csv";
pub const THEMES_FILE: &str = "themes_by_bank.csv";
pub const INSIGHTS_FILE: &str = "insights_data.json";
pub const REPORT_FILE: &str = "insights_report.md";

#[derive(Serialize)]
struct ReviewRow<'a> {
    review: &'a str,
    rating: u8,
    date: String,
    bank: &'a str,
    source: &'a str,
    sentiment_label: &'a str,
    sentiment_score: Option<f64>,
    keywords: String,
    theme: &'static str,
}

impl<'a> ReviewRow<'a> {
    fn new(review: &'a Review, analyzed: Option<&AnalyzedReview>) -> Self {
        Self {
            review: &review.text,
            rating: review.rating,
            date: review
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            bank: &review.bank,
            source: review.source.as_deref().unwrap_or(""),
            sentiment_label: review.sentiment_label.map(|l| l.as_str()).unwrap_or(""),
            sentiment_score: review.sentiment_score,
            keywords: analyzed.map(|a| a.keywords.joined()).unwrap_or_default(),
            theme: analyzed.map(|a| a.theme.label()).unwrap_or(""),
        }
    }
}

#[derive(Serialize)]
struct PreprocessedRow<'a> {
    review: &'a str,
    rating: u8,
    date: String,
    bank: &'a str,
    source: &'a str,
    sentiment_label: &'a str,
    sentiment_score: Option<f64>,
}

/// Paths written by one analysis run.
#[derive(Debug)]
pub struct WrittenFiles {
    pub reviews: PathBuf,
    pub themes: PathBuf,
    pub insights: PathBuf,
    pub report: PathBuf,
}

/// Write cleaned reviews to `path` as CSV.
pub fn write_preprocessed(path: &Path, reviews: &[Review]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for review in reviews {
        let row = ReviewRow::new(review, None);
        writer.serialize(PreprocessedRow {
            review: row.review,
            rating: row.rating,
            date: row.date,
            bank: row.bank,
            source: row.source,
            sentiment_label: row.sentiment_label,
            sentiment_score: row.sentiment_score,
        })?;
    }
    writer.flush()?;
    info!("Wrote {} reviews to {}", reviews.len(), path.display());
    Ok(())
}

/// Write all analysis outputs into `dir`.
pub fn write_analysis(dir: &Path, report: &AnalysisReport) -> anyhow::Result<WrittenFiles> {
    std::fs::create_dir_all(dir)?;
    let files = WrittenFiles {
        reviews: dir.join(REVIEWS_FILE),
        themes: dir.join(THEMES_FILE),
        insights: dir.join(INSIGHTS_FILE),
        report: dir.join(REPORT_FILE),
    };

    let mut writer = csv::Writer::from_path(&files.reviews)?;
    for item in &report.reviews {
        writer.serialize(ReviewRow::new(&item.review, Some(item)))?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(&files.themes)?;
    for row in &report.theme_summary {
        writer.serialize(row)?;
    }
    writer.flush()?;

    std::fs::write(&files.insights, insights_json(&report.banks)?)?;

    let markdown = render_markdown(&report.reviews, &report.comparison, &report.banks);
    std::fs::write(&files.report, markdown)?;

    info!("Wrote analysis outputs to {}", dir.display());
    Ok(files)
}

#[derive(Serialize)]
struct BankEntry<'a> {
    insights: &'a InsightSet,
    recommendations: &'a [Recommendation],
}

/// Banks keyed by name, in the order they appear in the input.
struct BanksByName<'a>(&'a [BankInsights]);

impl Serialize for BanksByName<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for b in self.0 {
            map.serialize_entry(
                &b.bank,
                &BankEntry {
                    insights: &b.insights,
                    recommendations: &b.recommendations,
                },
            )?;
        }
        map.end()
    }
}

/// `{bank: {insights, recommendations}}`, banks in first-seen order.
fn insights_json(banks: &[BankInsights]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&BanksByName(banks))?)
}

pub fn print_quality(report: &QualityReport) {
    println!("=== Data Quality ===");
    println!("Input records:     {}", report.total_input);
    println!("Output reviews:    {}", report.total_output);
    println!("Duplicates:        {}", report.duplicates_removed);
    println!("Invalid ratings:   {}", report.invalid_rating_removed);
    println!("Missing text:      {}", report.missing_text_removed);
    println!("Empty text:        {}", report.empty_text_removed);
    println!(
        "Missing values:    review={} rating={} bank={} date={}",
        report.missing_review, report.missing_rating, report.missing_bank, report.missing_date
    );
    println!(
        "Error rate:        {:.2}% ({})",
        report.error_rate,
        if report.kpi_met() { "KPI met" } else { "KPI not met" }
    );
}

pub fn print_summary(report: &AnalysisReport, files: &WrittenFiles) {
    println!("=== Analysis ===");
    println!("Reviews analyzed:  {}", report.reviews.len());
    for coverage in &report.coverage {
        println!(
            "  {}: {} themes ({})",
            coverage.bank,
            coverage.distinct_themes,
            if coverage.meets_target { "target met" } else { "below target" }
        );
    }
    println!();
    println!("Files written:");
    for path in [&files.reviews, &files.themes, &files.insights, &files.report] {
        println!("  {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewsight_core::{PipelineConfig, SentimentLabel};
    use reviewsight_runtime::Orchestrator;

    fn report() -> AnalysisReport {
        let config = PipelineConfig {
            min_df: 1,
            ..Default::default()
        };
        Orchestrator::new(config).analyze(vec![
            Review::new(0, "login failed", 1, "CBE").with_sentiment(SentimentLabel::Negative, 0.9),
            Review::new(1, "login failed", 1, "CBE").with_sentiment(SentimentLabel::Negative, 0.9),
            Review::new(2, "great transfer speed", 5, "CBE")
                .with_sentiment(SentimentLabel::Positive, 0.8),
        ])
    }

    #[test]
    fn test_write_analysis_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_analysis(dir.path(), &report()).unwrap();

        let csv_text = std::fs::read_to_string(&files.reviews).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "review,rating,date,bank,source,sentiment_label,sentiment_score,keywords,theme"
        );
        assert!(csv_text.contains("\"failed, login, login failed\",Account Access Issues"));

        let themes = std::fs::read_to_string(&files.themes).unwrap();
        assert!(themes.starts_with("bank,theme,count,percentage"));
        assert!(themes.contains("CBE,Account Access Issues,2,"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&files.insights).unwrap()).unwrap();
        let cbe = &json["CBE"];
        assert_eq!(cbe["insights"]["pain_points"][0]["theme"], "Account Access Issues");
        assert_eq!(cbe["recommendations"][1]["category"], "Enhancement");
        assert!(cbe["recommendations"][0]["recommendation"]
            .as_str()
            .unwrap()
            .starts_with("Improve login process"));

        let md = std::fs::read_to_string(&files.report).unwrap();
        assert!(md.starts_with("# Bank Review Analysis"));
    }

    #[test]
    fn test_insights_json_keeps_input_bank_order() {
        let report = Orchestrator::new(PipelineConfig {
            min_df: 1,
            ..Default::default()
        })
        .analyze(vec![
            Review::new(0, "login failed", 1, "Dashen"),
            Review::new(1, "slow transfer", 2, "Awash"),
            Review::new(2, "crash on startup", 1, "CBE"),
        ]);
        let text = insights_json(&report.banks).unwrap();
        let dashen = text.find("\"Dashen\"").unwrap();
        let awash = text.find("\"Awash\"").unwrap();
        let cbe = text.find("\"CBE\"").unwrap();
        assert!(dashen < awash && awash < cbe);

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(json["Awash"]["insights"]["drivers"].is_array());
        assert!(json["CBE"]["recommendations"].is_array());
    }

    #[test]
    fn test_write_preprocessed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.csv");
        let mut review = Review::new(0, "Slow app", 2, "BOA");
        review.date = chrono::NaiveDate::from_ymd_opt(2024, 3, 9);
        write_preprocessed(&path, &[review]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Slow app,2,2024-03-09,BOA,,,"));
    }
}
