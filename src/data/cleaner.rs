use std::collections::{BTreeMap, HashSet};

use log::{debug, info};
use serde::Serialize;

use super::features::{parse_timestamp, TIMESTAMP_COLUMN};
use super::model::{Dataset, FieldValue, Record};
use crate::error::{PipelineError, Result};

/// Columns every post must carry a value for.  Rows missing either are
/// dropped rather than imputed.
pub const REQUIRED_COLUMNS: &[&str] = &["Text", "Sentiment"];

/// Column holding the post body, counted separately in the quality report.
pub const TEXT_COLUMN: &str = "Text";

// ---------------------------------------------------------------------------
// Cleaning pipeline
// ---------------------------------------------------------------------------

/// Full cleaning pass: trim strings → coerce numeric columns → drop rows
/// with missing required fields → drop exact duplicates.
///
/// Row order is preserved among survivors (stable filter, no reordering)
/// and the pass is idempotent: cleaning an already-clean dataset returns
/// it unchanged.  Fails with [`PipelineError::MissingColumn`] when a
/// required column is absent from the schema.
pub fn clean_data(dataset: &Dataset) -> Result<Dataset> {
    for col in REQUIRED_COLUMNS {
        if !dataset.has_column(col) {
            return Err(PipelineError::MissingColumn((*col).to_string()));
        }
    }

    let initial = dataset.len();
    let trimmed = trim_strings(dataset);
    let coerced = coerce_numeric_columns(&trimmed);
    let complete = drop_missing_required(&coerced, REQUIRED_COLUMNS);
    let deduped = remove_duplicates(&complete);

    info!(
        "cleaning complete: {} -> {} rows",
        initial,
        deduped.len()
    );
    Ok(deduped)
}

/// Strip leading/trailing whitespace from every string cell.  A cell that
/// trims down to nothing becomes `Null` and follows the missing-value rule.
pub fn trim_strings(dataset: &Dataset) -> Dataset {
    let records: Vec<Record> = dataset
        .records
        .iter()
        .map(|rec| {
            let fields = rec
                .fields
                .iter()
                .map(|(col, val)| {
                    let cleaned = match val {
                        FieldValue::String(s) => {
                            let t = s.trim();
                            if t.is_empty() {
                                FieldValue::Null
                            } else if t.len() == s.len() {
                                val.clone()
                            } else {
                                FieldValue::String(t.to_string())
                            }
                        }
                        other => other.clone(),
                    };
                    (col.clone(), cleaned)
                })
                .collect();
            Record::new(fields)
        })
        .collect();

    let out = dataset.with_records(records);
    if let Some(labels) = out.unique_values.get("Sentiment") {
        debug!("'Sentiment' column has {} unique raw labels", labels.len());
    }
    out
}

/// Coerce numeric-looking text columns to numbers.
///
/// A column counts as numeric when more than half of its non-null values
/// already are numbers or parse as one.  Inside such a column every
/// numeric-looking string is converted (integer when lossless, float
/// otherwise) and anything non-coercible becomes `Null`.
pub fn coerce_numeric_columns(dataset: &Dataset) -> Dataset {
    let numeric_columns: Vec<String> = dataset
        .column_names
        .iter()
        .filter(|col| is_numeric_column(dataset, col))
        .cloned()
        .collect();

    if numeric_columns.is_empty() {
        return dataset.clone();
    }
    debug!("numeric columns: {}", numeric_columns.join(", "));

    let records: Vec<Record> = dataset
        .records
        .iter()
        .map(|rec| {
            let mut rec = rec.clone();
            for col in &numeric_columns {
                let coerced = match rec.get(col) {
                    FieldValue::String(s) => {
                        FieldValue::parse_number(s.trim()).unwrap_or(FieldValue::Null)
                    }
                    other => other.clone(),
                };
                rec.insert(col.clone(), coerced);
            }
            rec
        })
        .collect();

    dataset.with_records(records)
}

fn is_numeric_column(dataset: &Dataset, column: &str) -> bool {
    let mut non_null = 0usize;
    let mut numeric = 0usize;
    for rec in &dataset.records {
        match rec.get(column) {
            FieldValue::Null => {}
            FieldValue::Integer(_) | FieldValue::Float(_) => {
                non_null += 1;
                numeric += 1;
            }
            FieldValue::String(s) => {
                non_null += 1;
                if FieldValue::parse_number(s.trim()).is_some() {
                    numeric += 1;
                }
            }
            _ => non_null += 1,
        }
    }
    numeric * 2 > non_null
}

/// Drop rows whose value in any of the given columns is `Null`.
/// Stable filter: surviving rows keep their relative order.
pub fn drop_missing_required(dataset: &Dataset, required: &[&str]) -> Dataset {
    let survivors: Vec<Record> = dataset
        .records
        .iter()
        .filter(|rec| required.iter().all(|col| !rec.get(col).is_null()))
        .cloned()
        .collect();

    let dropped = dataset.len() - survivors.len();
    if dropped > 0 {
        info!("dropped {dropped} row(s) with missing required fields");
    }
    dataset.with_records(survivors)
}

/// Remove exact duplicate rows (equality across all columns), keeping the
/// first occurrence.
pub fn remove_duplicates(dataset: &Dataset) -> Dataset {
    let mut seen: HashSet<&Record> = HashSet::with_capacity(dataset.len());
    let mut keep = Vec::with_capacity(dataset.len());
    for rec in &dataset.records {
        if seen.insert(rec) {
            keep.push(rec.clone());
        }
    }

    let removed = dataset.len() - keep.len();
    info!("found and removed {removed} duplicate rows");
    dataset.with_records(keep)
}

// ---------------------------------------------------------------------------
// Quality assessment
// ---------------------------------------------------------------------------

/// Data-quality counters for a dataset.  Informational only: quality
/// problems are reported, never raised.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub rows: usize,
    /// Per-column count of null/absent cells.
    pub missing_values: BTreeMap<String, usize>,
    /// Rows equal to an earlier row across all columns.
    pub duplicate_rows: usize,
    /// Rows whose text field is empty or missing.
    pub empty_text_rows: usize,
    /// Timestamp cells that do not parse with any accepted format.
    pub invalid_timestamps: usize,
}

/// Count missing values, duplicates, empty posts, and bad timestamps.
pub fn assess_quality(dataset: &Dataset) -> QualityReport {
    let mut missing_values: BTreeMap<String, usize> = BTreeMap::new();
    for col in &dataset.column_names {
        let missing = dataset
            .records
            .iter()
            .filter(|rec| rec.get(col).is_null())
            .count();
        missing_values.insert(col.clone(), missing);
    }

    let mut seen: HashSet<&Record> = HashSet::with_capacity(dataset.len());
    let duplicate_rows = dataset
        .records
        .iter()
        .filter(|rec| !seen.insert(rec))
        .count();

    let empty_text_rows = dataset
        .records
        .iter()
        .filter(|rec| match rec.get(TEXT_COLUMN) {
            FieldValue::Null => true,
            FieldValue::String(s) => s.trim().is_empty(),
            _ => false,
        })
        .count();

    let invalid_timestamps = dataset
        .records
        .iter()
        .filter(|rec| match rec.get(TIMESTAMP_COLUMN) {
            FieldValue::String(s) => parse_timestamp(s).is_none(),
            _ => false,
        })
        .count();

    let report = QualityReport {
        rows: dataset.len(),
        missing_values,
        duplicate_rows,
        empty_text_rows,
        invalid_timestamps,
    };
    info!(
        "quality: {} rows, {} duplicates, {} empty posts, {} invalid timestamps",
        report.rows, report.duplicate_rows, report.empty_text_rows, report.invalid_timestamps
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(text: &str, sentiment: &str, likes: FieldValue) -> Record {
        let mut rec = Record::new(BTreeMap::new());
        rec.insert("Text", FieldValue::String(text.to_string()));
        rec.insert("Sentiment", FieldValue::String(sentiment.to_string()));
        rec.insert("Likes", likes);
        rec
    }

    fn dataset(records: Vec<Record>) -> Dataset {
        Dataset::new(
            vec!["Text".into(), "Sentiment".into(), "Likes".into()],
            records,
        )
    }

    #[test]
    fn missing_required_column_is_a_schema_error() {
        let ds = Dataset::new(
            vec!["Text".into()],
            vec![Record::new(
                [("Text".to_string(), FieldValue::String("hi".into()))].into(),
            )],
        );
        match clean_data(&ds) {
            Err(PipelineError::MissingColumn(col)) => assert_eq!(col, "Sentiment"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn trims_whitespace_from_string_cells() {
        let ds = dataset(vec![row("  spaced out  ", "Happy ", FieldValue::Integer(1))]);
        let clean = clean_data(&ds).unwrap();
        assert_eq!(
            clean.records[0].get("Text"),
            &FieldValue::String("spaced out".into())
        );
        assert_eq!(
            clean.records[0].get("Sentiment"),
            &FieldValue::String("Happy".into())
        );
    }

    #[test]
    fn rows_with_missing_required_fields_are_dropped() {
        let ds = dataset(vec![
            row("first", "joy", FieldValue::Integer(1)),
            row("   ", "joy", FieldValue::Integer(2)),
            row("third", "joy", FieldValue::Null),
        ]);
        let clean = clean_data(&ds).unwrap();
        // Whitespace-only text trims to Null and the row goes; a missing
        // optional column (Likes) does not drop anything.
        assert_eq!(clean.len(), 2);
        assert_eq!(
            clean.records[0].get("Text"),
            &FieldValue::String("first".into())
        );
        assert_eq!(
            clean.records[1].get("Text"),
            &FieldValue::String("third".into())
        );
    }

    #[test]
    fn duplicates_are_removed_keeping_the_first() {
        let ds = dataset(vec![
            row("bad day", "happy", FieldValue::Integer(1)),
            row("other", "sad", FieldValue::Integer(2)),
            row("bad day", "happy", FieldValue::Integer(1)),
        ]);
        let clean = clean_data(&ds).unwrap();
        assert_eq!(clean.len(), 2);
        assert_eq!(
            clean.records[0].get("Text"),
            &FieldValue::String("bad day".into())
        );
        assert_eq!(
            clean.records[1].get("Text"),
            &FieldValue::String("other".into())
        );
    }

    #[test]
    fn padded_duplicates_collapse_after_trimming() {
        let ds = dataset(vec![
            row("bad day", "happy", FieldValue::Integer(1)),
            row("bad day ", " happy", FieldValue::Integer(1)),
        ]);
        let clean = clean_data(&ds).unwrap();
        assert_eq!(clean.len(), 1);
    }

    #[test]
    fn numeric_looking_strings_are_coerced() {
        let ds = dataset(vec![
            row("a", "joy", FieldValue::String("42".into())),
            row("b", "joy", FieldValue::String("3.5".into())),
            row("c", "joy", FieldValue::String("n/a".into())),
        ]);
        let clean = clean_data(&ds).unwrap();
        assert_eq!(clean.records[0].get("Likes"), &FieldValue::Integer(42));
        assert_eq!(clean.records[1].get("Likes"), &FieldValue::Float(3.5));
        // Likes is optional, so the junk cell becomes Null but the row stays.
        assert_eq!(clean.records[2].get("Likes"), &FieldValue::Null);
        assert_eq!(clean.len(), 3);
    }

    #[test]
    fn mostly_text_columns_are_left_alone() {
        let ds = dataset(vec![
            row("1", "joy", FieldValue::Integer(0)),
            row("two", "joy", FieldValue::Integer(0)),
            row("three", "joy", FieldValue::Integer(0)),
        ]);
        let clean = clean_data(&ds).unwrap();
        assert_eq!(clean.records[0].get("Text"), &FieldValue::String("1".into()));
    }

    #[test]
    fn cleaning_is_idempotent() {
        let ds = dataset(vec![
            row(" pad ", "Happy ", FieldValue::String("10".into())),
            row("dup", "sad", FieldValue::Integer(1)),
            row("dup", "sad", FieldValue::Integer(1)),
            row("   ", "sad", FieldValue::Integer(2)),
        ]);
        let once = clean_data(&ds).unwrap();
        let twice = clean_data(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn cleaning_never_increases_row_count() {
        let ds = dataset(vec![
            row("a", "joy", FieldValue::Integer(1)),
            row("b", "sad", FieldValue::Integer(2)),
        ]);
        let clean = clean_data(&ds).unwrap();
        assert!(clean.len() <= ds.len());
    }

    #[test]
    fn quality_report_counts_problems_without_failing() {
        let ds = dataset(vec![
            row("post", "joy", FieldValue::Integer(1)),
            row("post", "joy", FieldValue::Integer(1)),
            row("", "sad", FieldValue::Null),
        ]);
        let report = assess_quality(&ds);
        assert_eq!(report.rows, 3);
        assert_eq!(report.duplicate_rows, 1);
        assert_eq!(report.empty_text_rows, 1);
        assert_eq!(report.missing_values["Likes"], 1);
        assert_eq!(report.invalid_timestamps, 0);
    }
}
