//! Validator pipeline
//!
//! A validator is a pure check of a value. Validators attach to leaves and
//! to sequences (checking the whole built array), never to groups.

mod result;
pub mod validators;

pub use result::{ValidationError, ValidationErrors, ValidationResult};
pub use validators::{
    email, from_fn, max, max_items, max_length, min, min_items, min_length, pattern, required,
    required_true,
};

use serde_json::Value;
use std::sync::Arc;

/// A pure check of a control value
#[cfg_attr(test, mockall::automock)]
pub trait Validator: Send + Sync {
    /// Identifier used as the error key
    fn id(&self) -> String;

    /// `Err` carries the failure message
    fn validate(&self, value: &Value) -> Result<(), String>;
}

/// Validators are shared between a template and the controls built from it
pub type BoxedValidator = Arc<dyn Validator>;

/// Run every validator in order, collecting each failure
pub(crate) fn run_all(validators: &[BoxedValidator], value: &Value) -> Vec<ValidationError> {
    validators
        .iter()
        .filter_map(|v| {
            v.validate(value)
                .err()
                .map(|message| ValidationError::new(v.id(), message))
        })
        .collect()
}
