//! Built-in validators
//!
//! Every validator here passes values of a kind it does not apply to, and
//! the length/pattern checks pass empty values, leaving emptiness to
//! [`required`]. That keeps validators composable in a single list.

use super::{BoxedValidator, Validator};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
        .expect("email pattern is valid")
});

/// Whether a value counts as absent for [`required`]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Fails on null, empty strings, empty arrays and empty objects
pub struct Required;

impl Validator for Required {
    fn id(&self) -> String {
        "required".to_string()
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        if is_empty_value(value) {
            Err("value is required".to_string())
        } else {
            Ok(())
        }
    }
}

/// Fails unless the value is `true` (checkbox acceptance)
pub struct RequiredTrue;

impl Validator for RequiredTrue {
    fn id(&self) -> String {
        "required_true".to_string()
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        if value == &Value::Bool(true) {
            Ok(())
        } else {
            Err("value must be checked".to_string())
        }
    }
}

/// Minimum string length in characters
pub struct MinLength(pub usize);

impl Validator for MinLength {
    fn id(&self) -> String {
        "min_length".to_string()
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        match value {
            Value::String(s) if !s.is_empty() && s.chars().count() < self.0 => {
                Err(format!("must be at least {} characters", self.0))
            }
            _ => Ok(()),
        }
    }
}

/// Maximum string length in characters
pub struct MaxLength(pub usize);

impl Validator for MaxLength {
    fn id(&self) -> String {
        "max_length".to_string()
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        match value {
            Value::String(s) if s.chars().count() > self.0 => {
                Err(format!("must be at most {} characters", self.0))
            }
            _ => Ok(()),
        }
    }
}

/// Inclusive numeric lower bound
pub struct Min(pub f64);

impl Validator for Min {
    fn id(&self) -> String {
        "min".to_string()
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        match value.as_f64() {
            Some(n) if n < self.0 => Err(format!("must be at least {}", self.0)),
            _ => Ok(()),
        }
    }
}

/// Inclusive numeric upper bound
pub struct Max(pub f64);

impl Validator for Max {
    fn id(&self) -> String {
        "max".to_string()
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        match value.as_f64() {
            Some(n) if n > self.0 => Err(format!("must be at most {}", self.0)),
            _ => Ok(()),
        }
    }
}

/// Whole-string regex match
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `pattern` anchored at both ends, so substrings never match
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: pattern.to_string(),
            regex: Regex::new(&format!("^(?:{pattern})$"))?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Validator for Pattern {
    fn id(&self) -> String {
        "pattern".to_string()
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        match value {
            Value::String(s) if !s.is_empty() && !self.regex.is_match(s) => {
                Err(format!("must match pattern {}", self.source))
            }
            _ => Ok(()),
        }
    }
}

/// Email address format
pub struct Email;

impl Validator for Email {
    fn id(&self) -> String {
        "email".to_string()
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        match value {
            Value::String(s) if !s.is_empty() && !EMAIL_REGEX.is_match(s) => {
                Err("must be a valid email".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Minimum number of array items
pub struct MinItems(pub usize);

impl Validator for MinItems {
    fn id(&self) -> String {
        "min_items".to_string()
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        match value {
            Value::Array(items) if items.len() < self.0 => {
                Err(format!("must contain at least {} items", self.0))
            }
            _ => Ok(()),
        }
    }
}

/// Maximum number of array items
pub struct MaxItems(pub usize);

impl Validator for MaxItems {
    fn id(&self) -> String {
        "max_items".to_string()
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        match value {
            Value::Array(items) if items.len() > self.0 => {
                Err(format!("must contain at most {} items", self.0))
            }
            _ => Ok(()),
        }
    }
}

type CheckFn = dyn Fn(&Value) -> Result<(), String> + Send + Sync;

/// Validator backed by a closure
pub struct FnValidator {
    id: String,
    check: Box<CheckFn>,
}

impl Validator for FnValidator {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        (self.check)(value)
    }
}

pub fn required() -> BoxedValidator {
    Arc::new(Required)
}

pub fn required_true() -> BoxedValidator {
    Arc::new(RequiredTrue)
}

pub fn min_length(len: usize) -> BoxedValidator {
    Arc::new(MinLength(len))
}

pub fn max_length(len: usize) -> BoxedValidator {
    Arc::new(MaxLength(len))
}

pub fn min(bound: f64) -> BoxedValidator {
    Arc::new(Min(bound))
}

pub fn max(bound: f64) -> BoxedValidator {
    Arc::new(Max(bound))
}

/// Whole-string match against `pattern`; fails when the pattern does not compile
pub fn pattern(pattern: &str) -> Result<BoxedValidator, regex::Error> {
    Ok(Arc::new(Pattern::new(pattern)?))
}

pub fn email() -> BoxedValidator {
    Arc::new(Email)
}

pub fn min_items(count: usize) -> BoxedValidator {
    Arc::new(MinItems(count))
}

pub fn max_items(count: usize) -> BoxedValidator {
    Arc::new(MaxItems(count))
}

/// Wrap a closure as a validator with the given identifier
pub fn from_fn<F>(id: impl Into<String>, check: F) -> BoxedValidator
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
{
    Arc::new(FnValidator {
        id: id.into(),
        check: Box::new(check),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_rejects_empty_values() {
        let v = required();
        assert!(v.validate(&Value::Null).is_err());
        assert!(v.validate(&json!("")).is_err());
        assert!(v.validate(&json!([])).is_err());
        assert!(v.validate(&json!({})).is_err());
    }

    #[test]
    fn test_required_accepts_present_values() {
        let v = required();
        assert!(v.validate(&json!("x")).is_ok());
        assert!(v.validate(&json!(0)).is_ok());
        assert!(v.validate(&json!(false)).is_ok());
        assert!(v.validate(&json!([1])).is_ok());
    }

    #[test]
    fn test_required_true() {
        let v = required_true();
        assert!(v.validate(&json!(true)).is_ok());
        assert!(v.validate(&json!(false)).is_err());
        assert!(v.validate(&Value::Null).is_err());
    }

    #[test]
    fn test_min_length_counts_chars() {
        let v = min_length(3);
        assert!(v.validate(&json!("héé")).is_ok());
        assert!(v.validate(&json!("ab")).is_err());
    }

    #[test]
    fn test_min_length_leaves_empty_to_required() {
        assert!(min_length(3).validate(&json!("")).is_ok());
    }

    #[test]
    fn test_max_length() {
        let v = max_length(2);
        assert!(v.validate(&json!("ab")).is_ok());
        assert_eq!(
            v.validate(&json!("abc")),
            Err("must be at most 2 characters".to_string())
        );
    }

    #[test]
    fn test_min_and_max_bounds_are_inclusive() {
        assert!(min(18.0).validate(&json!(18)).is_ok());
        assert!(min(18.0).validate(&json!(17)).is_err());
        assert!(max(99.5).validate(&json!(99.5)).is_ok());
        assert!(max(99.5).validate(&json!(100)).is_err());
    }

    #[test]
    fn test_numeric_validators_ignore_strings() {
        assert!(min(10.0).validate(&json!("5")).is_ok());
    }

    #[test]
    fn test_pattern() {
        let v = pattern(r"^[a-z]+$").unwrap();
        assert!(v.validate(&json!("abc")).is_ok());
        assert!(v.validate(&json!("ABC")).is_err());
        assert_eq!(v.id(), "pattern");
    }

    #[test]
    fn test_pattern_must_cover_whole_string() {
        let v = pattern("[a-z]+").unwrap();
        assert!(v.validate(&json!("abc")).is_ok());
        assert_eq!(
            v.validate(&json!("ABCa")),
            Err("must match pattern [a-z]+".to_string())
        );
        assert!(v.validate(&json!("abc1")).is_err());
    }

    #[test]
    fn test_pattern_alternation_is_anchored_as_a_whole() {
        let v = pattern("a|ab").unwrap();
        assert!(v.validate(&json!("ab")).is_ok());
        assert!(v.validate(&json!("abc")).is_err());
        assert_eq!(Pattern::new("a|ab").unwrap().as_str(), "a|ab");
    }

    #[test]
    fn test_pattern_invalid_regex_is_an_error() {
        assert!(pattern("[a-").is_err());
    }

    #[test]
    fn test_email() {
        let v = email();
        assert!(v.validate(&json!("alice@example.com")).is_ok());
        assert!(v.validate(&json!("not-an-email")).is_err());
        assert!(v.validate(&json!("")).is_ok());
    }

    #[test]
    fn test_item_counts() {
        assert!(min_items(1).validate(&json!([])).is_err());
        assert!(min_items(1).validate(&json!([1])).is_ok());
        assert!(max_items(1).validate(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_from_fn_uses_given_id() {
        let v = from_fn("even", |value| match value.as_i64() {
            Some(n) if n % 2 == 0 => Ok(()),
            _ => Err("must be even".to_string()),
        });
        assert_eq!(v.id(), "even");
        assert!(v.validate(&json!(4)).is_ok());
        assert_eq!(v.validate(&json!(3)), Err("must be even".to_string()));
    }
}
