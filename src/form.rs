//! The form facade
//!
//! A [`Form`] owns every control of its tree. Controls are addressed by
//! [`ControlId`] (or a typed handle, see [`crate::handle`]), and every
//! mutation goes through a `Form` method so dirty state and observers stay
//! consistent.

use crate::builder::instantiate;
use crate::config::FormConfig;
use crate::control::{ControlId, ControlTree, ControlType};
use crate::error::{FormError, Result};
use crate::event::{FormEvent, Observer, SubscriptionId};
use crate::path;
use crate::template::Template;
use crate::validation::ValidationResult;
use serde_json::Value;
use std::fmt;

pub struct Form {
    tree: ControlTree,
    root: ControlId,
    config: FormConfig,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Form {
    pub(crate) fn from_parts(tree: ControlTree, root: ControlId, config: FormConfig) -> Self {
        Self {
            tree,
            root,
            config,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Give up the facade; observers are dropped
    pub(crate) fn into_tree(self) -> (ControlTree, ControlId) {
        (self.tree, self.root)
    }

    pub fn root(&self) -> ControlId {
        self.root
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Named children of the root group
    pub fn controls(&self) -> Vec<(String, ControlId)> {
        self.tree
            .group(self.root)
            .map(|group| {
                group
                    .iter()
                    .map(|(name, id)| (name.to_string(), id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Field `name` of a group
    pub fn child(&self, group: impl Into<ControlId>, name: &str) -> Option<ControlId> {
        self.tree.group(group.into())?.child(name)
    }

    /// Element `index` of a sequence
    pub fn at(&self, sequence: impl Into<ControlId>, index: usize) -> Option<ControlId> {
        self.tree.sequence(sequence.into())?.child(index)
    }

    /// Number of children of a group or sequence
    pub fn len_of(&self, control: impl Into<ControlId>) -> Option<usize> {
        let id = control.into();
        if let Some(seq) = self.tree.sequence(id) {
            return Some(seq.len());
        }
        self.tree.group(id).map(|group| group.len())
    }

    pub fn kind(&self, control: impl Into<ControlId>) -> Option<ControlType> {
        self.tree.get(control.into()).map(|node| node.control_type())
    }

    pub fn parent(&self, control: impl Into<ControlId>) -> Option<ControlId> {
        self.tree.get(control.into())?.parent
    }

    /// Whether the id names a live control (attached or detached)
    pub fn contains(&self, control: impl Into<ControlId>) -> bool {
        self.tree.get(control.into()).is_some()
    }

    /// Live controls, including detached sequence elements kept for reset
    pub fn control_count(&self) -> usize {
        self.tree.len()
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Collapse the whole tree into plain values
    pub fn build(&self) -> Value {
        self.tree.build(self.root)
    }

    pub fn value(&self) -> Value {
        self.build()
    }

    pub fn value_at(&self, control: impl Into<ControlId>) -> Option<Value> {
        let id = control.into();
        self.tree.get(id)?;
        Some(self.tree.build(id))
    }

    /// The value captured when the form was built
    pub fn initial_value(&self) -> Value {
        self.tree.build_initial(self.root)
    }

    pub fn initial_value_at(&self, control: impl Into<ControlId>) -> Option<Value> {
        let id = control.into();
        self.tree.get(id)?;
        Some(self.tree.build_initial(id))
    }

    pub fn dirty(&self) -> bool {
        self.tree.is_dirty(self.root)
    }

    pub fn pristine(&self) -> bool {
        !self.dirty()
    }

    pub fn is_dirty(&self, control: impl Into<ControlId>) -> bool {
        self.tree.is_dirty(control.into())
    }

    pub fn touched(&self) -> bool {
        self.tree.is_touched(self.root)
    }

    pub fn is_touched(&self, control: impl Into<ControlId>) -> bool {
        self.tree.is_touched(control.into())
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Set the value of a control.
    ///
    /// A leaf takes `value` as is; a group or sequence delegates to its
    /// children like [`Form::patch_at`]. Returns whether anything changed;
    /// only then are the control and its ancestors marked dirty.
    pub fn set_value(&mut self, control: impl Into<ControlId>, value: impl Into<Value>) -> bool {
        let id = control.into();
        let value = value.into();
        let changed = self.tree.assign(id, &value);
        if changed {
            if self.config.trace_mutations {
                tracing::trace!(path = ?self.path_of(id), value = %value, "value changed");
            }
            self.emit(FormEvent::ValueChanged { control: id });
        }
        changed
    }

    /// Merge `partial` into the root group
    pub fn patch_value(&mut self, partial: Value) -> bool {
        self.patch_at(self.root, partial)
    }

    /// Merge `partial` into a control: keys absent from `partial` are left
    /// alone, unknown keys are ignored, sequences are updated index by index
    /// and never resized.
    pub fn patch_at(&mut self, control: impl Into<ControlId>, partial: Value) -> bool {
        self.set_value(control, partial)
    }

    /// Restore every control to its initial value and clear dirty/touched
    pub fn reset(&mut self) {
        self.reset_at(self.root);
    }

    pub fn reset_at(&mut self, control: impl Into<ControlId>) {
        let id = control.into();
        if self.tree.get(id).is_none() {
            return;
        }
        self.tree.reset(id);
        tracing::debug!(path = ?self.path_of(id), "reset");
        self.emit(FormEvent::Reset { control: id });
    }

    pub fn mark_dirty(&mut self, control: impl Into<ControlId>) {
        let id = control.into();
        if self.tree.get(id).is_none() {
            return;
        }
        self.tree.mark_dirty(id);
        self.emit(FormEvent::MarkedDirty { control: id });
    }

    pub fn mark_touched(&mut self, control: impl Into<ControlId>) {
        let id = control.into();
        if self.tree.get(id).is_none() {
            return;
        }
        self.tree.mark_touched(id);
        self.emit(FormEvent::Touched { control: id });
    }

    /// Append an element to a sequence, returning its id
    pub fn push(
        &mut self,
        sequence: impl Into<ControlId>,
        element: impl Into<Template>,
    ) -> Result<ControlId> {
        let seq_id = sequence.into();
        self.expect_kind(seq_id, ControlType::Sequence)?;

        let element = instantiate(&mut self.tree, element.into());
        self.tree.set_parent(element, Some(seq_id));
        let index = self
            .tree
            .sequence_mut(seq_id)
            .map(|seq| seq.push(element))
            .ok_or(FormError::UnknownControl(seq_id))?;
        self.tree.mark_dirty(seq_id);

        tracing::debug!(path = ?self.path_of(seq_id), index, "element pushed");
        self.emit(FormEvent::Pushed {
            sequence: seq_id,
            index,
            element,
        });
        Ok(element)
    }

    /// Remove the element at `index`, shifting later elements down.
    ///
    /// The removed control is detached: it no longer reports to the
    /// sequence. Elements present at construction are kept so that
    /// [`Form::reset`] can put them back; elements pushed later are dropped
    /// and their ids stop resolving, even once the slot is reused.
    pub fn remove_at(&mut self, sequence: impl Into<ControlId>, index: usize) -> Result<ControlId> {
        let seq_id = sequence.into();
        self.expect_kind(seq_id, ControlType::Sequence)?;

        let seq = self
            .tree
            .sequence_mut(seq_id)
            .ok_or(FormError::UnknownControl(seq_id))?;
        let len = seq.len();
        let element = seq
            .remove(index)
            .ok_or(FormError::IndexOutOfBounds { index, len })?;
        if seq.is_initial(element) {
            self.tree.set_parent(element, None);
        } else {
            self.tree.free(element);
        }
        self.tree.mark_dirty(seq_id);

        tracing::debug!(path = ?self.path_of(seq_id), index, "element removed");
        self.emit(FormEvent::Removed {
            sequence: seq_id,
            index,
            element,
        });
        Ok(element)
    }

    fn expect_kind(&self, id: ControlId, expected: ControlType) -> Result<()> {
        let found = self.kind(id).ok_or(FormError::UnknownControl(id))?;
        if found == expected {
            Ok(())
        } else {
            Err(FormError::WrongKind { expected, found })
        }
    }

    // ------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------

    /// Resolve `user.name`, `users[0].age` or `users.0.age` from the root
    pub fn get(&self, path: &str) -> Option<ControlId> {
        self.get_from(self.root, path)
    }

    /// Resolve a path relative to another control
    pub fn get_from(&self, from: impl Into<ControlId>, path: &str) -> Option<ControlId> {
        let segments = path::parse(path)?;
        self.tree.resolve(from.into(), &segments)
    }

    /// Path from the root in the configured style; `None` when detached
    pub fn path_of(&self, control: impl Into<ControlId>) -> Option<String> {
        let segments = self.tree.path_between(self.root, control.into())?;
        Some(path::render(&segments, self.config.path_style))
    }

    /// Every attached leaf with its path, in traversal order
    pub fn leaves(&self) -> Vec<(String, ControlId)> {
        let mut out = Vec::new();
        self.tree.leaves(self.root, &mut Vec::new(), &mut out);
        out.into_iter()
            .map(|(segments, id)| (path::render(&segments, self.config.path_style), id))
            .collect()
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    pub fn validate(&self) -> ValidationResult {
        self.validate_at(self.root)
    }

    /// Validate a subtree; error paths are relative to `control`
    pub fn validate_at(&self, control: impl Into<ControlId>) -> ValidationResult {
        let mut errors = Vec::new();
        self.tree.validate(
            control.into(),
            &mut Vec::new(),
            self.config.path_style,
            &mut errors,
        );
        ValidationResult::from_errors(errors)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().valid
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Call `observer` after every mutating call that changed something
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&FormEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }

    fn emit(&mut self, event: FormEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("root", &self.root)
            .field("value", &self.build())
            .field("dirty", &self.dirty())
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::form_group;
    use crate::path::PathStyle;
    use crate::validation::{max_items, min, required};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn profile() -> Form {
        form_group([
            ("version", Template::from(0)),
            (
                "user",
                form_group([("name", Template::from("Alice")), ("age", 28.into())]).into(),
            ),
        ])
    }

    fn users() -> Form {
        let users = [("User1", 20), ("User2", 25), ("User3", 30)]
            .into_iter()
            .map(|(name, age)| {
                form_group([("name", Template::from(name)), ("age", age.into())]).into()
            })
            .collect::<Vec<Template>>();
        form_group([("users", Template::from(users))])
    }

    mod scenarios {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_nested_patch_then_reset() {
            let mut form = profile();
            let user = form.get("user").unwrap();
            let age = form.child(user, "age").unwrap();

            assert!(form.patch_at(user, json!({ "age": 29 })));
            assert_eq!(form.value_at(age), Some(json!(29)));
            assert!(form.dirty());

            form.reset();
            assert_eq!(form.value_at(age), Some(json!(28)));
            assert!(!form.dirty());
        }

        #[test]
        fn test_sequence_of_forms() {
            let mut form = users();
            let users = form.get("users").unwrap();
            let first_age = form.get("users[0].age").unwrap();

            form.set_value(first_age, 21);
            assert!(form.dirty());

            form.push(
                users,
                form_group([("name", Template::from("User4")), ("age", 40.into())]),
            )
            .unwrap();
            assert_eq!(form.len_of(users), Some(4));
            assert_eq!(form.build()["users"][3]["name"], "User4");
        }
    }

    mod values {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_build_matches_template() {
            assert_eq!(
                profile().build(),
                json!({ "version": 0, "user": { "name": "Alice", "age": 28 } })
            );
        }

        #[test]
        fn test_controls_lists_root_fields_in_order() {
            let names: Vec<String> = profile().controls().into_iter().map(|(n, _)| n).collect();
            assert_eq!(names, vec!["version", "user"]);
        }

        #[test]
        fn test_patch_leaves_siblings_alone() {
            let mut form = profile();
            let version = form.get("version").unwrap();
            form.set_value(version, 3);
            let name = form.get("user.name").unwrap();

            form.patch_value(json!({ "user": { "age": 30 } }));

            assert_eq!(form.value_at(version), Some(json!(3)));
            assert_eq!(form.value_at(name), Some(json!("Alice")));
            assert!(!form.is_dirty(name));
            assert!(form.is_dirty(version));
        }

        #[test]
        fn test_patch_unknown_key_is_ignored() {
            let mut form = profile();
            assert!(!form.patch_value(json!({ "missing": 1 })));
            assert!(form.pristine());
        }

        #[test]
        fn test_set_same_value_keeps_pristine() {
            let mut form = profile();
            let age = form.get("user.age").unwrap();
            assert!(!form.set_value(age, 28));
            assert!(!form.dirty());
        }

        #[test]
        fn test_set_numerically_equal_value_keeps_pristine() {
            let mut form = profile();
            let age = form.get("user.age").unwrap();
            assert!(!form.set_value(age, json!(28.0)));
            assert!(!form.patch_value(json!({ "user": { "age": 28.0 } })));
            assert!(form.pristine());
            assert_eq!(form.build()["user"]["age"], 28);
        }

        #[test]
        fn test_set_value_on_stale_id_is_noop() {
            let mut form = users();
            let users = form.get("users").unwrap();
            let pushed = form
                .push(users, form_group([("name", Template::from("X"))]))
                .unwrap();
            form.remove_at(users, 3).unwrap();
            assert!(!form.contains(pushed));
            assert!(!form.set_value(pushed, json!({ "name": "Y" })));
        }

        #[test]
        fn test_initial_value_survives_mutation() {
            let mut form = profile();
            form.patch_value(json!({ "version": 9 }));
            assert_eq!(form.initial_value()["version"], 0);
            assert_eq!(form.build()["version"], 9);
        }

        #[test]
        fn test_dirty_propagates_through_every_ancestor() {
            let mut form = users();
            let age = form.get("users[2].age").unwrap();
            form.set_value(age, 31);
            let users = form.get("users").unwrap();
            let third = form.get("users[2]").unwrap();
            let first = form.get("users[0]").unwrap();
            assert!(form.is_dirty(third));
            assert!(form.is_dirty(users));
            assert!(!form.is_dirty(first));
        }

        #[test]
        fn test_mark_dirty_without_value_change() {
            let mut form = profile();
            let name = form.get("user.name").unwrap();
            form.mark_dirty(name);
            assert!(form.dirty());
            assert_eq!(form.build(), form.initial_value());
        }

        #[test]
        fn test_touched_propagates_and_resets() {
            let mut form = profile();
            let name = form.get("user.name").unwrap();
            form.mark_touched(name);
            assert!(form.touched());
            assert!(!form.dirty());
            form.reset();
            assert!(!form.touched());
        }

        #[test]
        fn test_reset_subtree_keeps_ancestor_flag_after_single_patch() {
            let mut form = profile();
            let user = form.get("user").unwrap();
            form.patch_value(json!({ "user": { "age": 29 } }));

            form.reset_at(user);

            // Nothing below the root differs any more, but its own flag stays
            assert_eq!(form.build(), form.initial_value());
            assert!(!form.is_dirty(user));
            assert!(form.dirty());

            form.reset();
            assert!(form.pristine());
        }

        #[test]
        fn test_reset_subtree_leaves_ancestors() {
            let mut form = profile();
            let user = form.get("user").unwrap();
            form.patch_value(json!({ "version": 1, "user": { "age": 50 } }));
            form.reset_at(user);
            assert_eq!(form.build()["user"]["age"], 28);
            assert_eq!(form.build()["version"], 1);
            assert!(!form.is_dirty(user));
            assert!(form.dirty());
        }
    }

    mod sequences {
        use super::*;
        use pretty_assertions::assert_eq;

        fn tags() -> Form {
            form_group([(
                "tags",
                Template::array_validated(
                    [Template::from("a"), "b".into(), "c".into()],
                    vec![max_items(3)],
                ),
            )])
        }

        #[test]
        fn test_push_marks_dirty_without_other_changes() {
            let mut form = tags();
            let seq = form.get("tags").unwrap();
            let added = form.push(seq, "d").unwrap();
            assert_eq!(form.at(seq, 3), Some(added));
            assert!(form.is_dirty(seq));
            assert!(form.dirty());
            assert_eq!(form.path_of(added), Some("tags[3]".to_string()));
        }

        #[test]
        fn test_remove_shifts_and_detaches() {
            let mut form = tags();
            let seq = form.get("tags").unwrap();
            let removed = form.remove_at(seq, 0).unwrap();

            assert_eq!(form.build()["tags"], json!(["b", "c"]));
            assert_eq!(form.parent(removed), None);
            assert_eq!(form.path_of(removed), None);
            assert!(form.is_dirty(seq));

            // Writes to a detached control stay out of the tree
            assert!(form.set_value(removed, "zzz"));
            assert_eq!(form.build()["tags"], json!(["b", "c"]));

            form.reset();
            assert_eq!(form.build()["tags"], json!(["a", "b", "c"]));
            assert_eq!(form.parent(removed), Some(seq));
        }

        #[test]
        fn test_reset_restores_length_and_elements() {
            let mut form = tags();
            let seq = form.get("tags").unwrap();
            form.remove_at(seq, 1).unwrap();
            form.push(seq, "x").unwrap();
            form.push(seq, "y").unwrap();
            let first = form.at(seq, 0).unwrap();
            form.set_value(first, "changed");

            form.reset();

            assert_eq!(form.build()["tags"], json!(["a", "b", "c"]));
            assert!(!form.dirty());
            assert_eq!(form.control_count(), 5);
        }

        #[test]
        fn test_reused_slot_does_not_revive_removed_id() {
            let mut form = tags();
            let seq = form.get("tags").unwrap();
            let count = form.control_count();
            let mut stale = Vec::new();
            for i in 0..20 {
                let pushed = form.push(seq, format!("t{i}")).unwrap();
                form.remove_at(seq, 3).unwrap();
                stale.push(pushed);
            }
            let kept = form.push(seq, "kept").unwrap();

            assert_eq!(form.control_count(), count + 1);
            assert!(stale.iter().all(|id| !form.contains(*id) && *id != kept));
            assert!(!form.set_value(stale[0], "revived"));
            assert_eq!(form.build()["tags"], json!(["a", "b", "c", "kept"]));
        }

        #[test]
        fn test_remove_out_of_bounds() {
            let mut form = tags();
            let seq = form.get("tags").unwrap();
            let err = form.remove_at(seq, 7).unwrap_err();
            assert!(matches!(err, FormError::IndexOutOfBounds { index: 7, len: 3 }));
            assert!(!form.dirty());
        }

        #[test]
        fn test_push_on_leaf_is_wrong_kind() {
            let mut form = tags();
            let leaf = form.get("tags[0]").unwrap();
            let err = form.push(leaf, "x").unwrap_err();
            assert!(matches!(
                err,
                FormError::WrongKind {
                    expected: ControlType::Sequence,
                    found: ControlType::Leaf
                }
            ));
            assert_eq!(form.control_count(), 5);
        }

        #[test]
        fn test_patch_sequence_updates_existing_indices_only() {
            let mut form = tags();
            form.patch_value(json!({ "tags": ["A", "B", "C", "D"] }));
            assert_eq!(form.build()["tags"], json!(["A", "B", "C"]));
        }

        #[test]
        fn test_sequence_validators_see_whole_array() {
            let mut form = tags();
            let seq = form.get("tags").unwrap();
            assert!(form.is_valid());
            form.push(seq, "d").unwrap();
            let result = form.validate();
            assert!(!result.valid);
            assert!(result.error("tags:max_items").is_some());
        }
    }

    mod paths {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_get_dotted_and_bracketed() {
            let form = users();
            assert_eq!(form.get("users[1].name"), form.get("users.1.name"));
            assert!(form.get("users[1].name").is_some());
        }

        #[test]
        fn test_get_unresolved_is_none() {
            let form = users();
            assert_eq!(form.get("users[9]"), None);
            assert_eq!(form.get("nobody"), None);
            assert_eq!(form.get("users..x"), None);
        }

        #[test]
        fn test_empty_path_is_root() {
            let form = users();
            assert_eq!(form.get(""), Some(form.root()));
            assert_eq!(form.path_of(form.root()), Some(String::new()));
        }

        #[test]
        fn test_get_from_nested_control() {
            let form = users();
            let second = form.get("users[1]").unwrap();
            assert_eq!(form.get_from(second, "age"), form.get("users[1].age"));
        }

        #[test]
        fn test_dotted_style() {
            let form = crate::builder::form_group_with(
                [("a", Template::array([Template::from(1)]))],
                FormConfig {
                    path_style: PathStyle::Dotted,
                    ..Default::default()
                },
            );
            let leaves: Vec<String> = form.leaves().into_iter().map(|(p, _)| p).collect();
            assert_eq!(leaves, vec!["a.0"]);
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        fn signup() -> Form {
            form_group([
                ("name", ("", vec![required()]).into()),
                ("age", (10, vec![required(), min(18.0)]).into()),
                (
                    "address",
                    form_group([("city", ("", vec![required()]).into())]).into(),
                ),
            ])
        }

        #[test]
        fn test_every_failure_is_reported() {
            let result = signup().validate();
            assert!(!result.valid);
            let keys: Vec<String> = result
                .errors
                .as_ref()
                .unwrap()
                .iter()
                .map(|e| e.key())
                .collect();
            assert_eq!(
                keys,
                vec!["name:required", "age:min", "address.city:required"]
            );
        }

        #[test]
        fn test_validate_subtree_uses_relative_paths() {
            let form = signup();
            let address = form.get("address").unwrap();
            let result = form.validate_at(address);
            assert_eq!(result.error("city:required"), Some("value is required"));
            let city = form.get("address.city").unwrap();
            assert_eq!(form.validate_at(city).error("required"), Some("value is required"));
        }

        #[test]
        fn test_invalid_form_stays_mutable() {
            let mut form = signup();
            assert!(form.patch_value(json!({ "name": "Bob", "age": 30, "address": { "city": "Oslo" } })));
            assert!(form.is_valid());
            assert!(form.validate().errors.is_none());
        }
    }

    mod observers {
        use super::*;
        use pretty_assertions::assert_eq;

        fn recorder(form: &mut Form) -> (Arc<Mutex<Vec<FormEvent>>>, SubscriptionId) {
            let events = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&events);
            let id = form.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
            (events, id)
        }

        #[test]
        fn test_one_event_per_effective_mutation() {
            let mut form = profile();
            let (events, _) = recorder(&mut form);

            form.patch_value(json!({ "version": 1, "user": { "age": 2 } }));
            form.patch_value(json!({ "version": 1 }));
            form.reset();

            let events = events.lock().unwrap();
            assert_eq!(
                *events,
                vec![
                    FormEvent::ValueChanged {
                        control: form.root()
                    },
                    FormEvent::Reset {
                        control: form.root()
                    },
                ]
            );
        }

        #[test]
        fn test_sequence_events() {
            let mut form = users();
            let (events, _) = recorder(&mut form);
            let seq = form.get("users").unwrap();

            let pushed = form
                .push(seq, form_group([("name", Template::from("X"))]))
                .unwrap();
            let removed = form.remove_at(seq, 0).unwrap();

            let events = events.lock().unwrap();
            assert_eq!(
                events[0],
                FormEvent::Pushed {
                    sequence: seq,
                    index: 3,
                    element: pushed
                }
            );
            assert_eq!(
                events[1],
                FormEvent::Removed {
                    sequence: seq,
                    index: 0,
                    element: removed
                }
            );
        }

        #[test]
        fn test_unsubscribe_stops_notifications() {
            let mut form = profile();
            let (events, id) = recorder(&mut form);
            assert!(form.unsubscribe(id));
            assert!(!form.unsubscribe(id));
            form.patch_value(json!({ "version": 5 }));
            assert!(events.lock().unwrap().is_empty());
        }

        #[test]
        fn test_nested_form_observers_are_dropped() {
            let mut inner = form_group([("x", Template::from(1))]);
            let (events, _) = recorder(&mut inner);
            let mut outer = form_group([("inner", Template::from(inner))]);
            outer.patch_value(json!({ "inner": { "x": 2 } }));
            assert!(events.lock().unwrap().is_empty());
        }
    }
}
