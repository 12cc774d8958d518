//! Cross-bank comparison and the themes-by-bank summary.

use reviewsight_core::{Review, SentimentLabel, Theme};

use crate::types::{BankComparison, ThemeSummaryRow};

/// Distinct themes a bank needs for theme coverage.
pub const MIN_THEMES_PER_BANK: usize = 3;

/// Banks in order of first appearance.
pub fn banks<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for review in reviews {
        if !out.iter().any(|b| *b == review.bank) {
            out.push(review.bank.clone());
        }
    }
    out
}

/// Average rating, review count and sentiment shares per bank. Shares are 0
/// when no review carries a sentiment label.
pub fn compare_banks(reviews: &[Review]) -> Vec<BankComparison> {
    let labeled = reviews.iter().any(|r| r.sentiment_label.is_some());

    banks(reviews)
        .into_iter()
        .map(|bank| {
            let rows: Vec<&Review> = reviews.iter().filter(|r| r.bank == bank).collect();
            let total = rows.len();
            let share = |label: SentimentLabel| {
                if !labeled {
                    return 0.0;
                }
                let n = rows.iter().filter(|r| r.sentiment_label == Some(label)).count();
                n as f64 / total as f64 * 100.0
            };
            BankComparison {
                avg_rating: rows.iter().map(|r| r.rating as f64).sum::<f64>() / total as f64,
                total_reviews: total,
                positive_pct: share(SentimentLabel::Positive),
                negative_pct: share(SentimentLabel::Negative),
                bank,
            }
        })
        .collect()
}

/// Top `top_n` themes per bank from per-bank theme lists (banks in the
/// order given). Every label counts, including `Other` and unlabeled, and
/// percentages are over all of the bank's reviews.
pub fn theme_summary(bank_themes: &[(String, Vec<Theme>)], top_n: usize) -> Vec<ThemeSummaryRow> {
    let mut rows = Vec::new();
    for (bank, themes) in bank_themes {
        let total = themes.len();
        let mut counts: Vec<(Theme, usize)> = Vec::new();
        for theme in themes {
            match counts.iter_mut().find(|(t, _)| t == theme) {
                Some((_, n)) => *n += 1,
                None => counts.push((*theme, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        rows.extend(counts.into_iter().take(top_n).map(|(theme, count)| ThemeSummaryRow {
            bank: bank.clone(),
            theme,
            count,
            percentage: count as f64 / total as f64 * 100.0,
        }));
    }
    rows
}

/// Distinct theme labels per bank, `Other` and unlabeled included, and
/// whether the bank meets [`MIN_THEMES_PER_BANK`].
pub fn theme_coverage(bank_themes: &[(String, Vec<Theme>)]) -> Vec<(String, usize, bool)> {
    bank_themes
        .iter()
        .map(|(bank, themes)| {
            let mut seen: Vec<Theme> = Vec::new();
            for theme in themes {
                if !seen.contains(theme) {
                    seen.push(*theme);
                }
            }
            let n = seen.len();
            (bank.clone(), n, n >= MIN_THEMES_PER_BANK)
        })
        .collect()
}
