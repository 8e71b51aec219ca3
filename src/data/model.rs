use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// FieldValue – a single cell in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// Rows are deduplicated through set membership and column values are
/// indexed in `BTreeSet`s, so `FieldValue` must be `Eq + Ord + Hash`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Null,
}

// -- Manual Eq/Ord/Hash so FieldValue can live in BTreeSet/HashSet --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Timestamp(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::String(s) => s.hash(state),
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Bool(b) => b.hash(state),
            FieldValue::Timestamp(ts) => ts.hash(state),
            FieldValue::Null => {}
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Timestamp(ts) => write!(f, "{ts}"),
            FieldValue::Null => write!(f, "<null>"),
        }
    }
}

impl FieldValue {
    /// Whether the cell holds no value.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Borrow the inner string, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a string as a number: integer if lossless, float otherwise.
    pub fn parse_number(s: &str) -> Option<FieldValue> {
        if let Ok(i) = s.parse::<i64>() {
            return Some(FieldValue::Integer(i));
        }
        if let Ok(v) = s.parse::<f64>() {
            return Some(FieldValue::Float(v));
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single social-media post (one row of the source file).
/// Two records are equal when every column holds an equal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// Dynamic columns: column_name → value.
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Record { fields }
    }

    /// Value of a column; absent columns read as `Null`.
    pub fn get(&self, column: &str) -> &FieldValue {
        self.fields.get(column).unwrap_or(&FieldValue::Null)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: FieldValue) {
        self.fields.insert(column.into(), value);
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
/// Record order reflects file order; `column_names` keeps header order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All posts (rows).
    pub records: Vec<Record>,
    /// Ordered list of column names.
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<FieldValue>>,
}

impl Dataset {
    /// Build a dataset from a known column order (the file header) and rows.
    /// Columns present only in the records are appended after the header ones.
    pub fn new(column_names: Vec<String>, records: Vec<Record>) -> Self {
        let mut column_names = column_names;
        for rec in &records {
            for col in rec.fields.keys() {
                if !column_names.iter().any(|c| c == col) {
                    column_names.push(col.clone());
                }
            }
        }
        let unique_values = build_unique_values(&records);
        Dataset {
            records,
            column_names,
            unique_values,
        }
    }

    /// Build a dataset when no header order exists (e.g. JSON records);
    /// columns come out in sorted order.
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.fields.keys().cloned())
            .collect();
        Self::new(columns.into_iter().collect(), records)
    }

    /// Same columns, new rows: used by the cleaning stages, which filter or
    /// rewrite records without touching the schema.
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        let unique_values = build_unique_values(&records);
        Dataset {
            records,
            column_names: self.column_names.clone(),
            unique_values,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), self.column_names.len())
    }

    /// Number of posts.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn build_unique_values(records: &[Record]) -> BTreeMap<String, BTreeSet<FieldValue>> {
    let mut unique_values: BTreeMap<String, BTreeSet<FieldValue>> = BTreeMap::new();
    for rec in records {
        for (col, val) in &rec.fields {
            unique_values
                .entry(col.clone())
                .or_default()
                .insert(val.clone());
        }
    }
    unique_values
}
