//! Lexicon sentiment scoring for reviews that arrive without a label.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use reviewsight_core::SentimentLabel;
use reviewsight_ingest::extract::normalize_text;

/// Compound score at or beyond which a review is polar.
pub const POLARITY_THRESHOLD: f64 = 0.05;
/// Score reported for neutral reviews.
pub const NEUTRAL_SCORE: f64 = 0.5;

const NORMALIZATION_ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;

/// Trait for sentiment backends.
pub trait SentimentBackend: Send + Sync {
    /// Compound polarity in `[-1, 1]`.
    fn compound(&self, text: &str) -> f64;

    /// Label and score for a review.
    fn score(&self, text: &str) -> (SentimentLabel, f64) {
        label_for(self.compound(text))
    }

    fn name(&self) -> &'static str;
}

/// Map a compound score to a label. Negative reviews report the magnitude.
pub fn label_for(compound: f64) -> (SentimentLabel, f64) {
    if compound >= POLARITY_THRESHOLD {
        (SentimentLabel::Positive, compound)
    } else if compound <= -POLARITY_THRESHOLD {
        (SentimentLabel::Negative, compound.abs())
    } else {
        (SentimentLabel::Neutral, NEUTRAL_SCORE)
    }
}

static VALENCE: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let words: &[(&str, f64)] = &[
        // Positive
        ("good", 1.9),
        ("great", 3.1),
        ("excellent", 3.2),
        ("amazing", 2.8),
        ("awesome", 3.1),
        ("best", 3.2),
        ("love", 3.2),
        ("nice", 1.8),
        ("easy", 1.9),
        ("fast", 1.4),
        ("helpful", 1.9),
        ("reliable", 1.6),
        ("smooth", 1.5),
        ("convenient", 1.6),
        ("perfect", 2.7),
        ("thanks", 1.9),
        ("thank", 1.5),
        ("useful", 1.9),
        ("secure", 1.4),
        ("happy", 2.7),
        ("works", 1.0),
        ("wonderful", 2.7),
        ("satisfied", 1.8),
        ("simple", 1.2),
        // Negative
        ("bad", -2.5),
        ("worst", -3.1),
        ("terrible", -2.1),
        ("horrible", -2.5),
        ("poor", -2.1),
        ("slow", -1.3),
        ("failed", -2.3),
        ("fail", -2.5),
        ("fails", -2.3),
        ("crash", -1.7),
        ("crashes", -1.7),
        ("crashing", -1.7),
        ("error", -1.7),
        ("bug", -1.5),
        ("useless", -1.8),
        ("annoying", -1.7),
        ("disappointed", -1.9),
        ("disappointing", -2.2),
        ("problem", -1.7),
        ("issue", -1.0),
        ("stuck", -1.4),
        ("hate", -2.7),
        ("frustrating", -2.1),
        ("waste", -1.8),
        ("broken", -1.9),
        ("locked", -1.0),
        ("blocked", -1.2),
        ("scam", -2.4),
        ("fraud", -2.8),
        ("unstable", -1.5),
    ];
    words.iter().copied().collect()
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 0.293),
        ("really", 0.293),
        ("extremely", 0.293),
        ("so", 0.293),
        ("super", 0.293),
        ("too", 0.293),
        ("totally", 0.293),
        ("slightly", -0.293),
        ("somewhat", -0.293),
        ("barely", -0.293),
    ]
    .into_iter()
    .collect()
});

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "cannot", "cant", "dont", "doesnt", "didnt",
    "wont", "isnt", "wasnt", "arent", "hardly", "without",
];

/// Valence lexicon with negation flip and intensifier scaling.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentBackend for LexiconSentiment {
    fn compound(&self, text: &str) -> f64 {
        let normalized = normalize_text(text);
        let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();

        let mut sum = 0.0;
        for (i, word) in words.iter().enumerate() {
            let Some(&valence) = VALENCE.get(word) else {
                continue;
            };
            let mut v = valence;
            // Look back up to three words for modifiers.
            for back in 1..=3usize.min(i) {
                let prev = words[i - back];
                if let Some(&boost) = INTENSIFIERS.get(prev) {
                    if back == 1 {
                        v += boost * v.signum();
                    }
                }
                if NEGATIONS.contains(&prev) {
                    v *= NEGATION_SCALAR;
                    break;
                }
            }
            sum += v;
        }

        if sum == 0.0 {
            return 0.0;
        }
        let score = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
        score.clamp(-1.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
