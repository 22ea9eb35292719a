//! Error types for structural misuse of a form
//!
//! Validation failures are not errors; they are reported as data through
//! [`crate::ValidationResult`].

use crate::control::{ControlId, ControlType};
use thiserror::Error;

/// Errors returned by fallible form operations
#[derive(Debug, Error)]
pub enum FormError {
    /// The id does not name a live control of this form
    #[error("unknown control {0:?}")]
    UnknownControl(ControlId),

    /// The operation needs a different kind of control
    #[error("expected a {expected} control, found a {found}")]
    WrongKind {
        expected: ControlType,
        found: ControlType,
    },

    /// A sequence index past the end
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A typed read or write could not convert the value
    #[error("JSON conversion failed: {0}")]
    Conversion(#[from] serde_json::Error),

    /// Reading or writing a configuration file failed
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FormError>;
