//! ReviewSight Ingest: record loading, preprocessing, keyword vectorization,
//! theme classification.

pub mod extract;
pub mod load;
pub mod preprocess;

pub use extract::{
    classify, classify_by_bank, classify_keywords, lexical_keywords, normalize_text,
    theme_distribution, TfidfMatrix, TfidfVectorizer, TAXONOMY,
};
pub use load::{load_records, FileType, RawRecord};
pub use preprocess::{
    content_hash, preprocess, preprocess_with_today, PreprocessOutcome, QualityReport,
};
