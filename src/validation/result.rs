//! Validation outcomes

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A single failed validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Path of the failing control relative to the validated one (empty for itself)
    pub path: String,

    /// Identifier of the validator that failed
    pub validator: String,

    /// Error message
    pub message: String,
}

impl ValidationError {
    /// Create an error reported by the validated control itself
    pub fn new(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            validator: validator.into(),
            message: message.into(),
        }
    }

    /// Set the path of the failing control
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Lookup key: the validator id, prefixed with `path:` below the validated control
    pub fn key(&self) -> String {
        if self.path.is_empty() {
            self.validator.clone()
        } else {
            format!("{}:{}", self.path, self.validator)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.validator, self.message)
        } else {
            write!(f, "{} ({}): {}", self.path, self.validator, self.message)
        }
    }
}

/// Collection of validation errors in traversal order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Message for a key as produced by [`ValidationError::key`]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.key() == key)
            .map(|e| e.message.as_str())
    }

    /// Errors reported for one control
    pub fn for_path(&self, path: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.path == path).collect()
    }

    /// Key to message mapping
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.errors
            .iter()
            .map(|e| (e.key(), e.message.clone()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Outcome of validating a control subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// Present only when invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: None,
        }
    }

    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        if errors.is_empty() {
            Self::valid()
        } else {
            Self {
                valid: false,
                errors: Some(errors.into()),
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Message for a key, see [`ValidationErrors::get`]
    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.as_ref().and_then(|errors| errors.get(key))
    }

    /// First message reported for the control at `path`
    pub fn first_message(&self, path: &str) -> Option<&str> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.iter().find(|e| e.path == path))
            .map(|e| e.message.as_str())
    }
}
