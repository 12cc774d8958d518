//! Review record loading from CSV and JSON exports.

use std::path::Path;

use reviewsight_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Supported record file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Csv,
    Json,
    Unknown,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "csv" => Self::Csv,
            "json" => Self::Json,
            _ => Self::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }
}

/// One row as it appears in an export, before any cleaning. Every field is
/// optional; unparseable numbers load as `None`.
///
/// Exports may carry `review_text`, `bank_name` and `review_date` next to,
/// or instead of, the canonical columns. [`load_records`] folds them into
/// the canonical field when that one is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub review_date: Option<String>,
    #[serde(default)]
    pub sentiment_label: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
}

impl RawRecord {
    /// Fill each canonical column from its alias when it is missing.
    pub fn resolve_aliases(mut self) -> Self {
        self.review = self.review.or(self.review_text.take());
        self.bank = self.bank.or(self.bank_name.take());
        self.date = self.date.or(self.review_date.take());
        self
    }
}

/// Numeric columns coerced before JSON rows are deserialized.
const NUMERIC_FIELDS: &[&str] = &["rating", "sentiment_score"];

/// Load all records from a `.csv` or `.json` (array of objects) file.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let records: Vec<RawRecord> = match FileType::from_path(path) {
        FileType::Csv => load_csv(path)?,
        FileType::Json => load_json(path)?,
        FileType::Unknown => {
            return Err(Error::Parse(format!(
                "unsupported record file: {}",
                path.display()
            )))
        }
    };
    let records: Vec<RawRecord> = records.into_iter().map(RawRecord::resolve_aliases).collect();
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: RawRecord = row?;
        records.push(record);
    }
    Ok(records)
}

fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let content = std::fs::read_to_string(path)?;
    let rows: Vec<Value> = serde_json::from_str(&content)?;
    let mut records = Vec::with_capacity(rows.len());
    for (i, mut row) in rows.into_iter().enumerate() {
        let Some(fields) = row.as_object_mut() else {
            return Err(Error::Parse(format!("record {} is not an object", i)));
        };
        for key in NUMERIC_FIELDS {
            if let Some(value) = fields.get_mut(*key) {
                *value = coerce_number(value);
            }
        }
        records.push(serde_json::from_value(row)?);
    }
    Ok(records)
}

/// Numbers pass through, numeric strings are parsed, anything else is null.
fn coerce_number(value: &Value) -> Value {
    match value {
        Value::Number(_) => value.clone(),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_extension("CSV"), FileType::Csv);
        assert_eq!(FileType::from_extension("json"), FileType::Json);
        assert_eq!(FileType::from_extension("xlsx"), FileType::Unknown);
    }

    #[test]
    fn test_load_csv_with_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        std::fs::write(
            &path,
            "review_text,rating,bank_name,review_date,extra\n\
             Login failed,1,CBE,2024-05-01,x\n\
             Great app,abc,BOA,,y\n",
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].review.as_deref(), Some("Login failed"));
        assert_eq!(records[0].rating, Some(1.0));
        assert_eq!(records[0].bank.as_deref(), Some("CBE"));
        assert_eq!(records[0].date.as_deref(), Some("2024-05-01"));
        assert_eq!(records[1].rating, None);
    }

    #[test]
    fn test_load_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        std::fs::write(
            &path,
            r#"[{"review": "Slow transfer", "rating": 2, "bank": "Dashen",
                 "sentiment_label": "NEGATIVE", "sentiment_score": 0.8}]"#,
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating, Some(2.0));
        assert_eq!(records[0].sentiment_label.as_deref(), Some("NEGATIVE"));
        assert_eq!(records[0].date, None);
    }

    #[test]
    fn test_canonical_columns_win_over_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        std::fs::write(
            &path,
            "review_id,review_text,review,rating,review_date,date,bank_name,bank,source\n\
             r1,Old text,Slow login,2,2024-01-01,2024-05-01,Commercial Bank,CBE,Google Play\n\
             r2,Only alias,,4,2024-02-02,,Dashen Bank,,Google Play\n",
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].review.as_deref(), Some("Slow login"));
        assert_eq!(records[0].bank.as_deref(), Some("CBE"));
        assert_eq!(records[0].date.as_deref(), Some("2024-05-01"));
        assert_eq!(records[0].rating, Some(2.0));
        assert_eq!(records[1].review.as_deref(), Some("Only alias"));
        assert_eq!(records[1].bank.as_deref(), Some("Dashen Bank"));
        assert_eq!(records[1].date.as_deref(), Some("2024-02-02"));
    }

    #[test]
    fn test_json_malformed_rating_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        std::fs::write(
            &path,
            r#"[{"review": "Crashes", "rating": [1, 2], "bank": "CBE", "sentiment_score": {"x": 1}},
                {"review": "Fine", "rating": "4", "bank": "BOA"},
                {"review_text": "Alias row", "rating": 5, "bank_name": "Dashen"}]"#,
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].rating, None);
        assert_eq!(records[0].sentiment_score, None);
        assert_eq!(records[0].review.as_deref(), Some("Crashes"));
        assert_eq!(records[1].rating, Some(4.0));
        assert_eq!(records[2].review.as_deref(), Some("Alias row"));
        assert_eq!(records[2].bank.as_deref(), Some("Dashen"));
    }

    #[test]
    fn test_json_non_object_row_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        std::fs::write(&path, r#"[{"review": "ok"}, 7]"#).unwrap();
        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = load_records(Path::new("reviews.parquet")).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
