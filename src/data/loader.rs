use std::collections::BTreeMap;
use std::path::Path;

use log::info;
use serde_json::Value as JsonValue;

use super::model::{Dataset, FieldValue, Record};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a posts dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – delimited text with a header row (the shipped datasets)
/// * `.json` – records-oriented array, the default `df.to_json(orient='records')`
///
/// The path is checked before anything else: a missing file fails here and
/// no later stage runs.
pub fn load_data(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::FileNotFound(path.to_path_buf()));
    }
    if std::fs::metadata(path)?.len() == 0 {
        return Err(PipelineError::EmptyData(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(PipelineError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one post per row.
/// Cell types are guessed per value; empty cells become `Null`.
/// Rows with a column count different from the header surface the csv
/// reader's error.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    // Index columns resurrected by a previous save ("Unnamed: 0" and
    // friends) carry no data and are dropped up front.
    let keep: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !h.contains("Unnamed"))
        .map(|(i, _)| i)
        .collect();
    if keep.len() < headers.len() {
        info!(
            "dropped {} unnamed index column(s)",
            headers.len() - keep.len()
        );
    }
    let column_names: Vec<String> = keep.iter().map(|&i| headers[i].clone()).collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut fields = BTreeMap::new();
        for &i in &keep {
            fields.insert(headers[i].clone(), guess_field_value(row.get(i).unwrap_or("")));
        }
        records.push(Record::new(fields));
    }

    info!(
        "loaded {} rows x {} columns from {}",
        records.len(),
        column_names.len(),
        path.display()
    );
    Ok(Dataset::new(column_names, records))
}

/// Guess a cell's type from its text: empty → Null, then integer, float,
/// bool, and finally plain string.  No trimming happens here; whitespace
/// normalization is the cleaner's job.
fn guess_field_value(s: &str) -> FieldValue {
    if s.is_empty() {
        return FieldValue::Null;
    }
    if let Some(v) = FieldValue::parse_number(s) {
        return v;
    }
    if s == "true" || s == "false" {
        return FieldValue::Bool(s == "true");
    }
    FieldValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "Text": "loved it", "Sentiment": "Joy", "Likes": 42 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root.as_array().ok_or_else(|| {
        PipelineError::Parse("expected a top-level JSON array of records".to_string())
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| PipelineError::Parse(format!("row {i} is not a JSON object")))?;

        let mut fields = BTreeMap::new();
        for (key, val) in obj {
            fields.insert(key.clone(), json_to_field_value(val));
        }
        records.push(Record::new(fields));
    }

    info!("loaded {} rows from {}", records.len(), path.display());
    Ok(Dataset::from_records(records))
}

fn json_to_field_value(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::String(other.to_string()),
    }
}
