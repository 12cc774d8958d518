//! Markdown insights report.

use std::fmt::Write;

use reviewsight_core::{AnalyzedReview, SentimentLabel};

use crate::compare::banks;
use crate::types::{BankComparison, BankInsights};

/// Items listed per section.
const SECTION_LIMIT: usize = 3;

/// Render the insights report.
pub fn render_markdown(
    reviews: &[AnalyzedReview],
    comparison: &[BankComparison],
    per_bank: &[BankInsights],
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, reviews, comparison, per_bank);
    out
}

fn write_report(
    out: &mut String,
    reviews: &[AnalyzedReview],
    comparison: &[BankComparison],
    per_bank: &[BankInsights],
) -> std::fmt::Result {
    let total = reviews.len();
    let bank_names = banks(reviews.iter().map(|r| &r.review));

    writeln!(out, "# Bank Review Analysis - Insights and Recommendations\n")?;
    writeln!(out, "## Executive Summary\n")?;
    writeln!(out, "Total Reviews Analyzed: {}", total)?;
    writeln!(out, "Banks Analyzed: {}\n", bank_names.join(", "))?;

    let mut dist: Vec<(SentimentLabel, usize)> = Vec::new();
    for label in reviews.iter().filter_map(|r| r.review.sentiment_label) {
        match dist.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => dist.push((label, 1)),
        }
    }
    if !dist.is_empty() {
        dist.sort_by(|a, b| b.1.cmp(&a.1));
        writeln!(out, "Overall Sentiment Distribution:")?;
        for (label, count) in dist {
            let pct = count as f64 / total as f64 * 100.0;
            writeln!(out, "- {}: {} ({:.1}%)", label, count, pct)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## Bank Comparison\n")?;
    writeln!(
        out,
        "| Bank | Avg Rating | Total Reviews | Positive % | Negative % |"
    )?;
    writeln!(out, "|------|-----------|---------------|------------|------------|")?;
    for row in comparison {
        writeln!(
            out,
            "| {} | {:.2} | {} | {:.1} | {:.1} |",
            row.bank, row.avg_rating, row.total_reviews, row.positive_pct, row.negative_pct
        )?;
    }
    writeln!(out)?;

    for bank in per_bank {
        writeln!(out, "## {}\n", bank.bank)?;

        writeln!(out, "### Satisfaction Drivers\n")?;
        if bank.insights.drivers.is_empty() {
            writeln!(out, "- No clear drivers identified")?;
        }
        for d in bank.insights.drivers.iter().take(SECTION_LIMIT) {
            writeln!(
                out,
                "- **{}**: {} mentions ({:.1}% of positive reviews)",
                d.theme, d.count, d.percentage
            )?;
        }
        writeln!(out)?;

        writeln!(out, "### Pain Points\n")?;
        if bank.insights.pain_points.is_empty() {
            writeln!(out, "- No clear pain points identified")?;
        }
        for p in bank.insights.pain_points.iter().take(SECTION_LIMIT) {
            writeln!(
                out,
                "- **{}**: {} mentions ({:.1}% of negative reviews)",
                p.theme, p.count, p.percentage
            )?;
        }
        writeln!(out)?;

        writeln!(out, "### Recommendations\n")?;
        if bank.recommendations.is_empty() {
            writeln!(out, "- Continue monitoring user feedback")?;
        }
        for rec in bank.recommendations.iter().take(SECTION_LIMIT) {
            writeln!(
                out,
                "- **[{} Priority] {}**: {}",
                rec.priority, rec.category, rec.text
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::analyzed;
    use reviewsight_core::{Insight, InsightSet, Priority, Recommendation, Theme};

    #[test]
    fn test_report_sections() {
        let reviews = vec![
            analyzed("CBE", 1, Some(SentimentLabel::Negative), Theme::AccountAccess),
            analyzed("CBE", 5, Some(SentimentLabel::Positive), Theme::Other),
        ];
        let comparison = vec![BankComparison {
            bank: "CBE".into(),
            avg_rating: 3.0,
            total_reviews: 2,
            positive_pct: 50.0,
            negative_pct: 50.0,
        }];
        let per_bank = vec![BankInsights {
            bank: "CBE".into(),
            insights: InsightSet {
                drivers: vec![],
                pain_points: vec![Insight {
                    theme: Theme::AccountAccess,
                    count: 1,
                    percentage: 100.0,
                }],
            },
            recommendations: vec![Recommendation {
                category: "Account Access".into(),
                text: "Improve login.".into(),
                priority: Priority::High,
            }],
        }];

        let md = render_markdown(&reviews, &comparison, &per_bank);
        assert!(md.contains("Total Reviews Analyzed: 2"));
        assert!(md.contains("- NEGATIVE: 1 (50.0%)"));
        assert!(md.contains("| CBE | 3.00 | 2 | 50.0 | 50.0 |"));
        assert!(md.contains("- No clear drivers identified"));
        assert!(md.contains("- **Account Access Issues**: 1 mentions (100.0% of negative reviews)"));
        assert!(md.contains("- **[High Priority] Account Access**: Improve login."));
    }

    #[test]
    fn test_report_fallbacks() {
        let per_bank = vec![BankInsights {
            bank: "BOA".into(),
            insights: InsightSet::default(),
            recommendations: vec![],
        }];
        let md = render_markdown(&[], &[], &per_bank);
        assert!(md.contains("- No clear pain points identified"));
        assert!(md.contains("- Continue monitoring user feedback"));
        assert!(!md.contains("Overall Sentiment Distribution"));
    }
}
