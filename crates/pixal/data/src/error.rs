use thiserror::Error;

/// Errors raised while building datasets, masks and candidate tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("invalid bin count {bins} for column {column} ({distinct} distinct values)")]
    InvalidBinCount {
        column: String,
        bins: usize,
        distinct: usize,
    },

    #[error("column {column} has {got} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("malformed constraint on {attribute}: {reason}")]
    MalformedConstraint { attribute: String, reason: String },

    #[error("mask length {got} does not match row count {expected}")]
    MaskLengthMismatch { expected: usize, got: usize },

    #[error("invalid row mask: {0}")]
    InvalidMask(String),

    #[error("row {row} out of range for dataset of {len} rows")]
    RowOutOfRange { row: usize, len: usize },

    #[error("invalid row records: {0}")]
    InvalidRecords(String),
}

impl DataError {
    pub(crate) fn malformed(attribute: &str, reason: impl Into<String>) -> Self {
        DataError::MalformedConstraint {
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for data results.
pub type DataResult<T> = Result<T, DataError>;
