//! Building forms from templates

use crate::config::FormConfig;
use crate::control::{
    ControlId, ControlKind, ControlTree, GroupControl, LeafControl, Node, SequenceControl,
};
use crate::form::Form;
use crate::template::Template;
use crate::validation::BoxedValidator;
use indexmap::IndexMap;
use serde_json::Value;

/// Build a form from `(field name, template)` pairs
///
/// ```
/// use formtree::{form_group, Template};
///
/// let user = form_group([("name", Template::from("Alice")), ("age", 28.into())]);
/// let form = form_group([("version", Template::from(0)), ("user", user.into())]);
///
/// assert_eq!(form.build()["user"]["age"], 28);
/// ```
pub fn form_group<K: Into<String>>(fields: impl IntoIterator<Item = (K, Template)>) -> Form {
    form_group_with(fields, FormConfig::default())
}

/// [`form_group`] with explicit configuration
pub fn form_group_with<K: Into<String>>(
    fields: impl IntoIterator<Item = (K, Template)>,
    config: FormConfig,
) -> Form {
    let mut tree = ControlTree::new();
    let root = instantiate(&mut tree, Template::group(fields));
    tracing::debug!(controls = tree.len(), "form built");
    Form::from_parts(tree, root, config)
}

/// Create the controls described by `template`; the result has no parent
pub(crate) fn instantiate(tree: &mut ControlTree, template: Template) -> ControlId {
    match template {
        Template::Value(value) => leaf(tree, value, Vec::new()),
        Template::Validated(value, validators) => leaf(tree, value, validators),
        Template::Form(form) => {
            let (other, root) = form.into_tree();
            tree.graft(other, root)
        }
        Template::Group(fields) => {
            let mut children = IndexMap::with_capacity(fields.len());
            for (name, template) in fields {
                let child = instantiate(tree, template);
                // A repeated name keeps the last definition
                if let Some(replaced) = children.insert(name, child) {
                    tree.free(replaced);
                }
            }
            let ids: Vec<ControlId> = children.values().copied().collect();
            let id = tree.insert(Node::new(ControlKind::Group(GroupControl::new(children))));
            adopt(tree, id, ids);
            id
        }
        Template::Array(items, validators) => {
            let ids: Vec<ControlId> = items
                .into_iter()
                .map(|item| instantiate(tree, item))
                .collect();
            let id = tree.insert(Node::new(ControlKind::Sequence(SequenceControl::new(
                ids.clone(),
                validators,
            ))));
            adopt(tree, id, ids);
            id
        }
    }
}

fn leaf(tree: &mut ControlTree, value: Value, validators: Vec<BoxedValidator>) -> ControlId {
    tree.insert(Node::new(ControlKind::Leaf(LeafControl::new(
        value, validators,
    ))))
}

fn adopt(tree: &mut ControlTree, parent: ControlId, children: Vec<ControlId>) {
    for child in children {
        tree.set_parent(child, Some(parent));
    }
}

/// Explicit schema API, an alternative to [`form_group`] tuples
///
/// ```
/// use formtree::{validation, FormBuilder, Template};
///
/// let form = FormBuilder::new()
///     .validated("email", "", vec![validation::required(), validation::email()])
///     .group("address", FormBuilder::new().field("city", "Berlin"))
///     .array("tags", vec![Template::from("rust")])
///     .build();
///
/// assert!(!form.validate().valid);
/// assert_eq!(form.build()["address"]["city"], "Berlin");
/// ```
#[derive(Debug, Default)]
pub struct FormBuilder {
    fields: Vec<(String, Template)>,
    config: FormConfig,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Any template kind
    pub fn template(mut self, name: impl Into<String>, template: impl Into<Template>) -> Self {
        self.fields.push((name.into(), template.into()));
        self
    }

    /// Leaf without validators
    pub fn field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.template(name, Template::value(value))
    }

    /// Leaf with validators
    pub fn validated(
        self,
        name: impl Into<String>,
        value: impl Into<Value>,
        validators: Vec<BoxedValidator>,
    ) -> Self {
        self.template(name, Template::validated(value, validators))
    }

    /// Inline nested group
    pub fn group(self, name: impl Into<String>, group: FormBuilder) -> Self {
        self.template(name, Template::Group(group.fields))
    }

    /// Previously built form as a nested group
    pub fn nested(self, name: impl Into<String>, form: Form) -> Self {
        self.template(name, Template::Form(form))
    }

    pub fn array(self, name: impl Into<String>, items: Vec<Template>) -> Self {
        self.template(name, Template::array(items))
    }

    pub fn array_validated(
        self,
        name: impl Into<String>,
        items: Vec<Template>,
        validators: Vec<BoxedValidator>,
    ) -> Self {
        self.template(name, Template::array_validated(items, validators))
    }

    pub fn build(self) -> Form {
        form_group_with(self.fields, self.config)
    }
}

impl From<FormBuilder> for Template {
    fn from(builder: FormBuilder) -> Self {
        Template::Group(builder.fields)
    }
}
