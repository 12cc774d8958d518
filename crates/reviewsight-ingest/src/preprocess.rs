//! Record preprocessing: raw export rows → clean [`Review`]s.
//!
//! Steps run in a fixed order: text-less rows, dedup by (review, bank),
//! rating validation, date normalization. A [`QualityReport`] describes the
//! input and what was removed; every input row is either kept or counted
//! under exactly one removal reason.

use std::collections::HashSet;

use chrono::{Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use reviewsight_core::{Review, SentimentLabel};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::load::RawRecord;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Error rate below which the data-quality KPI is met, in percent.
pub const MAX_ERROR_RATE: f64 = 5.0;

/// Data-quality metrics of one preprocessing run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub total_input: usize,
    pub missing_review: usize,
    pub missing_rating: usize,
    pub missing_bank: usize,
    pub missing_date: usize,
    pub duplicates_removed: usize,
    pub invalid_rating_removed: usize,
    pub missing_text_removed: usize,
    pub empty_text_removed: usize,
    pub total_output: usize,
    /// Missing cells over all checked cells of the input, in percent.
    pub error_rate: f64,
}

impl QualityReport {
    pub fn kpi_met(&self) -> bool {
        self.error_rate < MAX_ERROR_RATE
    }

    pub fn total_removed(&self) -> usize {
        self.duplicates_removed
            + self.invalid_rating_removed
            + self.missing_text_removed
            + self.empty_text_removed
    }
}

#[derive(Debug, Clone)]
pub struct PreprocessOutcome {
    pub reviews: Vec<Review>,
    pub report: QualityReport,
}

/// SHA-256 of the (bank, review) pair, the duplicate key.
pub fn content_hash(bank: &str, review: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bank.as_bytes());
    hasher.update([0u8]);
    hasher.update(review.as_bytes());
    hex::encode(hasher.finalize())
}

/// Preprocess with missing or unparseable dates set to today.
pub fn preprocess(records: Vec<RawRecord>) -> PreprocessOutcome {
    preprocess_with_today(records, Local::now().date_naive())
}

pub fn preprocess_with_today(records: Vec<RawRecord>, today: NaiveDate) -> PreprocessOutcome {
    let mut report = quality_of(&records);

    let mut seen = HashSet::new();
    let mut reviews = Vec::with_capacity(records.len());
    for record in records {
        let Some(raw_text) = record.review.as_deref() else {
            report.missing_text_removed += 1;
            continue;
        };
        let text = clean_text(raw_text);
        if text.is_empty() {
            report.empty_text_removed += 1;
            continue;
        }

        let key = content_hash(record.bank.as_deref().unwrap_or(""), raw_text);
        if !seen.insert(key) {
            report.duplicates_removed += 1;
            continue;
        }

        let rating = record.rating.unwrap_or(0.0);
        if !(1.0..=5.0).contains(&rating) || rating.fract() != 0.0 {
            report.invalid_rating_removed += 1;
            continue;
        }

        let date = record
            .date
            .as_deref()
            .and_then(parse_date)
            .unwrap_or(today);
        let sentiment_label = record
            .sentiment_label
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| match s.parse::<SentimentLabel>() {
                Ok(label) => Some(label),
                Err(e) => {
                    debug!("Dropping sentiment label: {}", e);
                    None
                }
            });

        let mut review = Review::new(
            reviews.len(),
            text,
            rating as u8,
            record.bank.unwrap_or_default().trim(),
        );
        review.date = Some(date);
        review.sentiment_label = sentiment_label;
        review.sentiment_score = record.sentiment_score;
        review.source = record.source;
        reviews.push(review);
    }

    report.total_output = reviews.len();
    info!(
        "Preprocessed {} → {} reviews ({} duplicates, {} invalid ratings, {} missing text, {} empty)",
        report.total_input,
        report.total_output,
        report.duplicates_removed,
        report.invalid_rating_removed,
        report.missing_text_removed,
        report.empty_text_removed
    );
    debug_assert_eq!(report.total_input, report.total_output + report.total_removed());
    if !report.kpi_met() {
        warn!(
            "Data error rate {:.2}% exceeds {}%",
            report.error_rate, MAX_ERROR_RATE
        );
    }

    PreprocessOutcome { reviews, report }
}

fn quality_of(records: &[RawRecord]) -> QualityReport {
    let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
    let total = records.len();
    let missing_review = records.iter().filter(|r| blank(&r.review)).count();
    let missing_rating = records.iter().filter(|r| r.rating.is_none()).count();
    let missing_bank = records.iter().filter(|r| blank(&r.bank)).count();
    let missing_date = records.iter().filter(|r| blank(&r.date)).count();

    let missing = missing_review + missing_rating + missing_bank + missing_date;
    let error_rate = if total == 0 {
        0.0
    } else {
        missing as f64 / (total * 4) as f64 * 100.0
    };

    QualityReport {
        total_input: total,
        missing_review,
        missing_rating,
        missing_bank,
        missing_date,
        error_rate,
        ..Default::default()
    }
}

/// Collapse runs of whitespace and trim.
pub fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Parse the first whitespace-separated token of `raw` as a date, then the
/// whole string as a datetime.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.split_whitespace().next()?;
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(head, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(review: &str, rating: f64, bank: &str) -> RawRecord {
        RawRecord {
            review: Some(review.into()),
            rating: Some(rating),
            bank: Some(bank.into()),
            date: Some("2024-05-01".into()),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_content_hash_distinguishes_banks() {
        assert_eq!(content_hash("CBE", "ok"), content_hash("CBE", "ok"));
        assert_ne!(content_hash("CBE", "ok"), content_hash("BOA", "ok"));
        assert_eq!(content_hash("CBE", "ok").len(), 64);
    }

    #[test]
    fn test_duplicates_removed_per_bank() {
        let out = preprocess_with_today(
            vec![
                raw("Login failed", 1.0, "CBE"),
                raw("Login failed", 1.0, "CBE"),
                raw("Login failed", 1.0, "BOA"),
            ],
            today(),
        );
        assert_eq!(out.reviews.len(), 2);
        assert_eq!(out.report.duplicates_removed, 1);
        assert_eq!(out.reviews[1].id, 1);
    }

    #[test]
    fn test_invalid_ratings_and_missing_text_dropped() {
        let mut missing_text = raw("x", 3.0, "CBE");
        missing_text.review = None;
        let mut missing_rating = raw("no stars", 3.0, "CBE");
        missing_rating.rating = None;
        let out = preprocess_with_today(
            vec![
                raw("fine", 6.0, "CBE"),
                missing_text,
                missing_rating,
                raw("   ", 4.0, "CBE"),
                raw("good", 5.0, "CBE"),
            ],
            today(),
        );
        assert_eq!(out.reviews.len(), 1);
        assert_eq!(out.reviews[0].text, "good");
        assert_eq!(out.report.invalid_rating_removed, 2);
        assert_eq!(out.report.missing_text_removed, 1);
        assert_eq!(out.report.empty_text_removed, 1);
        assert_eq!(out.report.total_input, out.report.total_output + out.report.total_removed());
    }

    #[test]
    fn test_missing_text_not_counted_as_duplicate() {
        let mut first = raw("x", 3.0, "CBE");
        first.review = None;
        let mut second = raw("y", 4.0, "CBE");
        second.review = None;
        let out = preprocess_with_today(
            vec![first, second, raw("   ", 2.0, "CBE"), raw("\t", 2.0, "CBE")],
            today(),
        );
        assert!(out.reviews.is_empty());
        assert_eq!(out.report.missing_text_removed, 2);
        assert_eq!(out.report.empty_text_removed, 2);
        assert_eq!(out.report.duplicates_removed, 0);
    }

    #[test]
    fn test_every_row_accounted_for() {
        let mut no_text = raw("x", 3.0, "CBE");
        no_text.review = None;
        let records = vec![
            raw("Login failed", 1.0, "CBE"),
            raw("Login failed", 1.0, "CBE"),
            raw("Login failed", 0.0, "BOA"),
            raw("Slow", 2.5, "BOA"),
            no_text,
            raw(" ", 5.0, "Dashen"),
            raw("Works", 5.0, "Dashen"),
        ];
        let out = preprocess_with_today(records, today());
        let r = &out.report;
        assert_eq!(r.total_input, 7);
        assert_eq!(r.total_output, 2);
        assert_eq!(r.duplicates_removed, 1);
        assert_eq!(r.invalid_rating_removed, 2);
        assert_eq!(r.missing_text_removed, 1);
        assert_eq!(r.empty_text_removed, 1);
        assert_eq!(r.total_input, r.total_output + r.total_removed());
    }

    #[test]
    fn test_dates_normalized() {
        assert_eq!(
            parse_date("2024-05-01 13:45:00"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(parse_date("31/12/2023"), NaiveDate::from_ymd_opt(2023, 12, 31));
        assert_eq!(
            parse_date("2024-02-03T08:00:00"),
            NaiveDate::from_ymd_opt(2024, 2, 3)
        );
        assert_eq!(parse_date("yesterday"), None);

        let mut undated = raw("hello", 4.0, "CBE");
        undated.date = Some("not a date".into());
        let out = preprocess_with_today(vec![undated], today());
        assert_eq!(out.reviews[0].date, Some(today()));
    }

    #[test]
    fn test_whitespace_cleaned() {
        assert_eq!(clean_text("  slow\n\tapp   today "), "slow app today");
    }

    #[test]
    fn test_sentiment_fields_carried() {
        let mut record = raw("great", 5.0, "CBE");
        record.sentiment_label = Some("positive".into());
        record.sentiment_score = Some(0.9);
        let out = preprocess_with_today(vec![record], today());
        assert_eq!(out.reviews[0].sentiment_label, Some(SentimentLabel::Positive));
        assert_eq!(out.reviews[0].sentiment_score, Some(0.9));
    }

    #[test]
    fn test_quality_report_error_rate() {
        let mut partial = raw("a", 3.0, "CBE");
        partial.date = None;
        let out = preprocess_with_today(
            vec![partial, raw("b", 3.0, "CBE"), raw("c", 3.0, "CBE"), raw("d", 3.0, "CBE")],
            today(),
        );
        assert_eq!(out.report.total_input, 4);
        assert_eq!(out.report.missing_date, 1);
        assert!((out.report.error_rate - 6.25).abs() < 1e-9);
        assert!(!out.report.kpi_met());
        assert_eq!(out.report.total_output, 4);
    }
}
