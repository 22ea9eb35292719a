//! Sequence controls: an ordered, resizable list of children

use super::ControlId;
use crate::validation::{self, BoxedValidator, ValidationError};
use serde_json::Value;
use std::fmt;

#[derive(Clone)]
pub(crate) struct SequenceControl {
    children: Vec<ControlId>,
    /// Elements present at construction, kept alive for reset even once removed
    initial_children: Vec<ControlId>,
    validators: Vec<BoxedValidator>,
}

impl SequenceControl {
    pub fn new(children: Vec<ControlId>, validators: Vec<BoxedValidator>) -> Self {
        Self {
            initial_children: children.clone(),
            children,
            validators,
        }
    }

    pub fn child(&self, index: usize) -> Option<ControlId> {
        self.children.get(index).copied()
    }

    pub fn ids(&self) -> &[ControlId] {
        &self.children
    }

    pub fn initial_ids(&self) -> &[ControlId] {
        &self.initial_children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn index_of(&self, id: ControlId) -> Option<usize> {
        self.children.iter().position(|child| *child == id)
    }

    pub fn is_initial(&self, id: ControlId) -> bool {
        self.initial_children.contains(&id)
    }

    pub fn push(&mut self, id: ControlId) -> usize {
        self.children.push(id);
        self.children.len() - 1
    }

    /// Remove the child at `index`, shifting later children down
    pub fn remove(&mut self, index: usize) -> Option<ControlId> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    /// Put the initial children back, returning the ones added since
    pub fn restore(&mut self) -> Vec<ControlId> {
        let added = self
            .children
            .iter()
            .copied()
            .filter(|id| !self.initial_children.contains(id))
            .collect();
        self.children = self.initial_children.clone();
        added
    }

    /// Current children followed by detached initial ones
    pub fn owned(&self) -> Vec<ControlId> {
        let mut owned = self.children.clone();
        owned.extend(
            self.initial_children
                .iter()
                .filter(|id| !self.children.contains(id)),
        );
        owned
    }

    /// Run the sequence-level validators against the built array
    pub fn validate(&self, built: &Value) -> Vec<ValidationError> {
        validation::run_all(&self.validators, built)
    }

    pub fn shift_ids(&mut self, offset: usize) {
        for id in self
            .children
            .iter_mut()
            .chain(self.initial_children.iter_mut())
        {
            *id = id.shifted(offset);
        }
    }
}

impl fmt::Debug for SequenceControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.validators.iter().map(|v| v.id()).collect();
        f.debug_struct("SequenceControl")
            .field("children", &self.children)
            .field("initial_children", &self.initial_children)
            .field("validators", &ids)
            .finish()
    }
}
