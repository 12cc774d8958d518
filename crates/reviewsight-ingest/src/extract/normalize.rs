//! Text normalization shared by every extraction backend.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z\s]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lower-case, drop everything but ASCII letters and whitespace, collapse
/// whitespace runs and trim.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let letters = NON_ALPHA.replace_all(&lowered, "");
    WHITESPACE.replace_all(&letters, " ").trim().to_string()
}

/// Split normalized text into word tokens of at least two letters.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized
        .split(' ')
        .filter(|w| w.len() >= 2)
        .collect()
}
