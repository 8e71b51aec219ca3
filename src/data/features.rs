use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use log::{info, warn};

use super::model::{Dataset, FieldValue, Record};
use crate::error::{PipelineError, Result};

/// Column holding the post timestamp.
pub const TIMESTAMP_COLUMN: &str = "Timestamp";

/// Derived calendar columns, in the order they are appended.
pub const TIME_FEATURE_COLUMNS: &[&str] =
    &["year", "month", "day", "hour", "day_of_week", "is_weekend"];

/// Stamp formats observed in the source datasets.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub(crate) fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    // Date-only stamps read as midnight.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Derive calendar feature columns from the `Timestamp` column:
/// `year`, `month`, `day`, `hour`, `day_of_week` (Monday = 0) and
/// `is_weekend` (0/1).  The timestamp cells themselves are converted from
/// text to parsed timestamps.
///
/// Rows whose stamp does not parse keep their original cell and get `Null`
/// feature values; they are counted and logged, not raised.
pub fn add_time_features(dataset: &Dataset) -> Result<Dataset> {
    if !dataset.has_column(TIMESTAMP_COLUMN) {
        return Err(PipelineError::MissingColumn(TIMESTAMP_COLUMN.to_string()));
    }

    let mut unparseable = 0usize;
    let records: Vec<Record> = dataset
        .records
        .iter()
        .map(|rec| {
            let ts = match rec.get(TIMESTAMP_COLUMN) {
                FieldValue::Timestamp(ts) => Some(*ts),
                FieldValue::String(s) => parse_timestamp(s),
                _ => None,
            };

            let mut rec = rec.clone();
            match ts {
                Some(ts) => {
                    let dow = i64::from(ts.weekday().num_days_from_monday());
                    rec.insert(TIMESTAMP_COLUMN, FieldValue::Timestamp(ts));
                    rec.insert("year", FieldValue::Integer(i64::from(ts.year())));
                    rec.insert("month", FieldValue::Integer(i64::from(ts.month())));
                    rec.insert("day", FieldValue::Integer(i64::from(ts.day())));
                    rec.insert("hour", FieldValue::Integer(i64::from(ts.hour())));
                    rec.insert("day_of_week", FieldValue::Integer(dow));
                    rec.insert("is_weekend", FieldValue::Integer(i64::from(dow >= 5)));
                }
                None => {
                    unparseable += 1;
                    for col in TIME_FEATURE_COLUMNS {
                        rec.insert(*col, FieldValue::Null);
                    }
                }
            }
            rec
        })
        .collect();

    if unparseable > 0 {
        warn!("{unparseable} row(s) have unparseable timestamps");
    }
    info!("added time feature columns: {}", TIME_FEATURE_COLUMNS.join(", "));

    let mut column_names = dataset.column_names.clone();
    for col in TIME_FEATURE_COLUMNS {
        if !column_names.iter().any(|c| c == col) {
            column_names.push((*col).to_string());
        }
    }
    Ok(Dataset::new(column_names, records))
}
