//! Error types for projector validation
//!
//! Every projector validates its inputs before computing and reports the
//! offending field by name, so callers can show the message inline next to
//! the form field that caused it.

use thiserror::Error;

/// Why a single input field was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputIssue {
    #[error("not a number")]
    NotNumeric,

    #[error("must be a finite number")]
    NotFinite,

    #[error("must be greater than zero")]
    NotPositive,

    #[error("must not be negative")]
    Negative,

    #[error("must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },

    #[error("{0}")]
    Inconsistent(String),
}

/// Errors returned by the projection engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// A caller-supplied field failed validation
    #[error("invalid {field}: {issue}")]
    InvalidInput {
        field: &'static str,
        issue: InputIssue,
    },

    /// Validated inputs still produced NaN or infinity
    #[error("projection produced a non-finite {0}")]
    NonFinite(&'static str),
}

impl ProjectionError {
    pub fn invalid(field: &'static str, issue: InputIssue) -> Self {
        ProjectionError::InvalidInput { field, issue }
    }

    /// Name of the rejected field, if this is a validation failure
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ProjectionError::InvalidInput { field, .. } => Some(field),
            ProjectionError::NonFinite(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
