use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort loading the investment table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: cannot parse '{value}' in {column} as a date")]
    ParseDate {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: cannot parse '{value}' in {column} as a number")]
    ParseNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("column {column} has unsupported type {data_type}")]
    UnsupportedType {
        column: &'static str,
        data_type: String,
    },

    #[error("malformed JSON input: {0}")]
    MalformedJson(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type LoadResult<T> = Result<T, LoadError>;
