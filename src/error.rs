//! Error taxonomy for the scheduling engine.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `Validation` | A single input record is malformed (strict policy, duplicate ids) |
//! | `Config` | The run as a whole is misconfigured (empty input, bad quantum, bad comm) |
//! | `Graph` | The HEFT task graph is cyclic or references an unknown task |
//! | `Invariant` | An internal invariant was broken (never caused by user input) |
//!
//! Validation and configuration errors are raised before any scheduling
//! work begins. Graph errors abort a HEFT run; no partial schedule is
//! returned.

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A malformed input record.
    #[error("validation error: {0}")]
    Validation(ValidationError),

    /// An invalid run configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A cyclic or dangling task graph.
    #[error("graph error: {0}")]
    Graph(String),

    /// An internal invariant violation.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl Error {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a graph error.
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph(msg.into())
    }

    /// Creates an invariant violation.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Whether this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether this is a graph error.
    pub fn is_graph(&self) -> bool {
        matches!(self, Self::Graph(_))
    }

    /// Whether this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// Folds a list of validation errors into the first one.
///
/// Validators collect every problem they find; the engine boundary
/// surfaces the first.
impl From<Vec<ValidationError>> for Error {
    fn from(mut errors: Vec<ValidationError>) -> Self {
        if errors.is_empty() {
            Self::invariant("empty validation error list")
        } else {
            Self::Validation(errors.swap_remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::config("quantum must be positive");
        assert_eq!(err.to_string(), "configuration error: quantum must be positive");
        assert!(err.is_config());
        assert!(!err.is_graph());
    }

    #[test]
    fn test_from_validation_list_keeps_first() {
        let errors = vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "first"),
            ValidationError::new(ValidationErrorKind::InvalidBurst, "second"),
        ];
        let err = Error::from(errors);
        match err {
            Error::Validation(v) => assert_eq!(v.message, "first"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_empty_validation_list() {
        let err = Error::from(Vec::<ValidationError>::new());
        assert!(matches!(err, Error::Invariant(_)));
    }
}
