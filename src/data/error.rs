use std::path::PathBuf;

use thiserror::Error;

/// Failure to bring a source table into memory. Always fatal for that source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow decode failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("{0}")]
    Malformed(String),
}

/// Failure of a filter or aggregation. These point at a bad query, not bad data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    /// Numeric treatment was requested for a column that still holds text,
    /// e.g. grouping by draft number without excluding "Undrafted" first.
    #[error("type error: column `{column}` cannot be treated as numeric (found `{value}`)")]
    TypeMismatch { column: String, value: String },
}
