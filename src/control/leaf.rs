//! Leaf controls: an opaque value plus its validators

use crate::validation::{self, BoxedValidator, ValidationError};
use serde_json::Value;
use std::fmt;

#[derive(Clone)]
pub(crate) struct LeafControl {
    value: Value,
    initial: Value,
    validators: Vec<BoxedValidator>,
}

impl LeafControl {
    pub fn new(value: Value, validators: Vec<BoxedValidator>) -> Self {
        Self {
            initial: value.clone(),
            value,
            validators,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn initial(&self) -> &Value {
        &self.initial
    }

    /// Store `value`, returning whether it differed from the current one
    pub fn replace(&mut self, value: &Value) -> bool {
        if same_value(&self.value, value) {
            return false;
        }
        self.value = value.clone();
        true
    }

    pub fn restore(&mut self) {
        self.value = self.initial.clone();
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validation::run_all(&self.validators, &self.value)
    }
}

/// Structural equality where numbers compare by value, so `28` equals `28.0`
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_value(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| same_value(x, y)))
        }
        _ => a == b,
    }
}

impl fmt::Debug for LeafControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.validators.iter().map(|v| v.id()).collect();
        f.debug_struct("LeafControl")
            .field("value", &self.value)
            .field("initial", &self.initial)
            .field("validators", &ids)
            .finish()
    }
}
