use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("empty dataset file: {0}")]
    EmptyData(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing expected column '{0}'")]
    MissingColumn(String),

    #[error("sentiment label '{label}' maps to both '{first}' and '{second}'")]
    TaxonomyConflict {
        label: String,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
