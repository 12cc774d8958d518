//! Ordered theme taxonomy and the first-match classifier.

use reviewsight_core::{KeywordSet, Theme};

/// Taxonomy entries in evaluation order. A theme matches when any of its
/// triggers is a substring of the keyword string.
pub const TAXONOMY: &[(Theme, &[&str])] = &[
    (
        Theme::AccountAccess,
        &[
            "login", "password", "access", "account", "sign", "authentication", "verify",
            "security", "locked", "blocked",
        ],
    ),
    (
        Theme::TransactionPerformance,
        &[
            "transfer", "transaction", "payment", "slow", "fast", "speed", "timeout", "delay",
            "processing", "complete", "failed",
        ],
    ),
    (
        Theme::UserInterface,
        &[
            "ui", "interface", "design", "layout", "navigation", "button", "screen", "display",
            "user", "experience", "ux", "easy", "simple",
        ],
    ),
    (
        Theme::CustomerSupport,
        &[
            "support", "help", "service", "customer", "contact", "response", "assistance",
            "issue", "problem", "complaint", "resolve",
        ],
    ),
    (
        Theme::AppReliability,
        &[
            "crash", "error", "bug", "glitch", "freeze", "hang", "close", "restart", "unstable",
            "reliable", "stable", "working",
        ],
    ),
    (
        Theme::FeatureRequests,
        &[
            "feature", "add", "want", "need", "missing", "request", "suggest", "improve",
            "enhance", "option", "functionality",
        ],
    ),
    (
        Theme::SecurityPrivacy,
        &[
            "security", "privacy", "safe", "secure", "protection", "data", "personal",
            "information", "trust", "fraud",
        ],
    ),
];

/// Classify a comma-joined, lower-case keyword string.
///
/// A blank string is [`Theme::Unlabeled`]; a string no trigger matches is
/// [`Theme::Other`].
pub fn classify(keywords: &str) -> Theme {
    if keywords.trim().is_empty() {
        return Theme::Unlabeled;
    }
    TAXONOMY
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| keywords.contains(t)))
        .map(|(theme, _)| *theme)
        .unwrap_or(Theme::Other)
}

pub fn classify_keywords(keywords: &KeywordSet) -> Theme {
    if keywords.is_empty() {
        return Theme::Unlabeled;
    }
    classify(&keywords.joined())
}

/// Classify each bank's reviews separately. Banks are returned in order of
/// first appearance, each with its themes in input order.
pub fn classify_by_bank<'a, I>(rows: I) -> Vec<(String, Vec<Theme>)>
where
    I: IntoIterator<Item = (&'a str, &'a KeywordSet)>,
{
    let mut out: Vec<(String, Vec<Theme>)> = Vec::new();
    for (bank, keywords) in rows {
        let theme = classify_keywords(keywords);
        match out.iter_mut().find(|(b, _)| b == bank) {
            Some((_, themes)) => themes.push(theme),
            None => out.push((bank.to_string(), vec![theme])),
        }
    }
    out
}

/// `(theme, count)` pairs by descending count, ties by first appearance.
pub fn theme_distribution(themes: &[Theme]) -> Vec<(Theme, usize)> {
    let mut counts: Vec<(Theme, usize)> = Vec::new();
    for theme in themes {
        match counts.iter_mut().find(|(t, _)| t == theme) {
            Some((_, n)) => *n += 1,
            None => counts.push((*theme, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
