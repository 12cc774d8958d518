//! Keyword extraction and theme classification primitives.
//!
//! Normalization, stopword filtering, a corpus-wide TF-IDF vectorizer over
//! unigrams and bigrams, a per-document lexical fallback, and the ordered
//! theme taxonomy applied to the resulting keyword strings.

pub mod lexical;
pub mod normalize;
pub mod stopwords;
pub mod tfidf;
pub mod themes;

pub use lexical::lexical_keywords;
pub use normalize::{normalize_text, tokenize};
pub use stopwords::is_stopword;
pub use tfidf::{TfidfMatrix, TfidfVectorizer};
pub use themes::{classify, classify_by_bank, classify_keywords, theme_distribution, TAXONOMY};
