//! Templates describing the shape of a form
//!
//! Each field of a template is one of a small closed set of kinds, resolved
//! once when the form is built.

use crate::form::Form;
use crate::validation::BoxedValidator;
use serde_json::Value;
use std::fmt;

/// Shape, initial value and validators of one control
pub enum Template {
    /// Plain value, becomes a leaf without validators
    Value(Value),
    /// `(value, validators)`, becomes a leaf
    Validated(Value, Vec<BoxedValidator>),
    /// A previously built form, grafted in as a nested group
    Form(Form),
    /// Named fields, becomes a group
    Group(Vec<(String, Template)>),
    /// Elements plus validators for the whole array, becomes a sequence
    Array(Vec<Template>, Vec<BoxedValidator>),
}

impl Template {
    pub fn value(value: impl Into<Value>) -> Self {
        Template::Value(value.into())
    }

    pub fn validated(value: impl Into<Value>, validators: Vec<BoxedValidator>) -> Self {
        Template::Validated(value.into(), validators)
    }

    pub fn group<K: Into<String>>(fields: impl IntoIterator<Item = (K, Template)>) -> Self {
        Template::Group(
            fields
                .into_iter()
                .map(|(name, template)| (name.into(), template))
                .collect(),
        )
    }

    pub fn array(items: impl IntoIterator<Item = Template>) -> Self {
        Template::Array(items.into_iter().collect(), Vec::new())
    }

    pub fn array_validated(
        items: impl IntoIterator<Item = Template>,
        validators: Vec<BoxedValidator>,
    ) -> Self {
        Template::Array(items.into_iter().collect(), validators)
    }

    /// Infer a template from plain JSON: objects become groups, arrays
    /// become sequences and everything else becomes a leaf.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(fields) => Template::Group(
                fields
                    .into_iter()
                    .map(|(name, v)| (name, Template::from_json(v)))
                    .collect(),
            ),
            Value::Array(items) => {
                Template::Array(items.into_iter().map(Template::from_json).collect(), vec![])
            }
            other => Template::Value(other),
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Template::Validated(v, validators) => f
                .debug_tuple("Validated")
                .field(v)
                .field(&validators.len())
                .finish(),
            Template::Form(form) => f.debug_tuple("Form").field(form).finish(),
            Template::Group(fields) => f.debug_tuple("Group").field(fields).finish(),
            Template::Array(items, validators) => f
                .debug_tuple("Array")
                .field(items)
                .field(&validators.len())
                .finish(),
        }
    }
}

impl From<Value> for Template {
    fn from(value: Value) -> Self {
        Template::Value(value)
    }
}

impl From<Form> for Template {
    fn from(form: Form) -> Self {
        Template::Form(form)
    }
}

impl From<Vec<Template>> for Template {
    fn from(items: Vec<Template>) -> Self {
        Template::array(items)
    }
}

impl<V: Into<Value>> From<(V, Vec<BoxedValidator>)> for Template {
    fn from((value, validators): (V, Vec<BoxedValidator>)) -> Self {
        Template::Validated(value.into(), validators)
    }
}

macro_rules! literal_templates {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Template {
                fn from(value: $ty) -> Self {
                    Template::Value(Value::from(value))
                }
            }
        )*
    };
}

literal_templates!(&str, String, bool, i32, i64, u32, u64, f64);
