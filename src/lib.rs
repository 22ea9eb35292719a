//! formtree - reactive form state
//!
//! Builds a tree of controls from a template of primitives, nested groups
//! and arrays, then tracks value, dirty/touched state and validity per
//! control while keeping composite controls consistent with their
//! descendants.
//!
//! ```
//! use formtree::{form_group, Template};
//! use serde_json::json;
//!
//! let user = form_group([("name", Template::from("Alice")), ("age", 28.into())]);
//! let mut form = form_group([("version", Template::from(0)), ("user", user.into())]);
//!
//! let user = form.get("user").unwrap();
//! form.patch_at(user, json!({ "age": 29 }));
//! assert!(form.dirty());
//! assert_eq!(form.build()["user"]["age"], 29);
//!
//! form.reset();
//! assert!(!form.dirty());
//! assert_eq!(form.build()["user"]["age"], 28);
//! ```

mod builder;
pub mod config;
mod control;
mod error;
mod event;
mod form;
pub mod handle;
pub mod path;
mod template;
pub mod validation;

pub use builder::{form_group, form_group_with, FormBuilder};
pub use config::FormConfig;
pub use control::{ControlId, ControlType};
pub use error::{FormError, Result};
pub use event::{FormEvent, SubscriptionId};
pub use form::Form;
pub use handle::{Group, Leaf, Sequence};
pub use path::PathStyle;
pub use template::Template;
pub use validation::{
    BoxedValidator, ValidationError, ValidationErrors, ValidationResult, Validator,
};
