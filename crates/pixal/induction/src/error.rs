use pixal_data::{DataError, Dtype};
use thiserror::Error;

/// Errors from predicate construction, scoring and search.
#[derive(Debug, Error)]
pub enum InductionError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("predicate has no clauses")]
    EmptyPredicate,

    #[error("attribute already constrained: {0}")]
    DuplicateAttribute(String),

    #[error("attribute not constrained: {0}")]
    MissingAttribute(String),

    #[error("constraint on {attribute} does not fit dtype {dtype}")]
    ConstraintKindMismatch { attribute: String, dtype: Dtype },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl InductionError {
    /// Caller-side mistakes: bad bin counts, unknown columns, malformed
    /// constraints, bad parameters. Never worth retrying.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            InductionError::Data(_)
                | InductionError::EmptyPredicate
                | InductionError::ConstraintKindMismatch { .. }
                | InductionError::InvalidConfig(_)
        )
    }
}

impl From<serde_json::Error> for InductionError {
    fn from(e: serde_json::Error) -> Self {
        InductionError::Serialization(e.to_string())
    }
}

/// Convenience type alias for induction results.
pub type InductionResult<T> = Result<T, InductionError>;
