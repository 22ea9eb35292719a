//! Typed handles
//!
//! A handle is a [`ControlId`] that has been checked to name a control of
//! a given kind. Leaf handles also carry the Rust type of the leaf value, so
//! reads and writes convert through serde instead of raw JSON.

use crate::control::{ControlId, ControlType};
use crate::error::{FormError, Result};
use crate::form::Form;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// A leaf holding values of type `T`
pub struct Leaf<T> {
    id: ControlId,
    _value: PhantomData<fn() -> T>,
}

impl<T> Leaf<T> {
    pub fn id(&self) -> ControlId {
        self.id
    }
}

impl<T> Clone for Leaf<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Leaf<T> {}

impl<T> PartialEq for Leaf<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Leaf<T> {}

impl<T> fmt::Debug for Leaf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Leaf").field(&self.id).finish()
    }
}

impl<T> From<Leaf<T>> for ControlId {
    fn from(leaf: Leaf<T>) -> Self {
        leaf.id
    }
}

/// A group control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group(ControlId);

/// A sequence control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence(ControlId);

impl Group {
    pub fn id(&self) -> ControlId {
        self.0
    }
}

impl Sequence {
    pub fn id(&self) -> ControlId {
        self.0
    }
}

impl From<Group> for ControlId {
    fn from(group: Group) -> Self {
        group.0
    }
}

impl From<Sequence> for ControlId {
    fn from(sequence: Sequence) -> Self {
        sequence.0
    }
}

impl Form {
    fn resolve_kind(&self, path: &str, kind: ControlType) -> Option<ControlId> {
        let id = self.get(path)?;
        (self.kind(id)? == kind).then_some(id)
    }

    /// Typed handle to the leaf at `path`
    pub fn leaf<T>(&self, path: &str) -> Option<Leaf<T>> {
        self.resolve_kind(path, ControlType::Leaf).map(|id| Leaf {
            id,
            _value: PhantomData,
        })
    }

    /// Handle to the group at `path`
    pub fn group(&self, path: &str) -> Option<Group> {
        self.resolve_kind(path, ControlType::Group).map(Group)
    }

    /// Handle to the sequence at `path`
    pub fn sequence(&self, path: &str) -> Option<Sequence> {
        self.resolve_kind(path, ControlType::Sequence).map(Sequence)
    }

    /// Current value of a typed leaf
    pub fn read<T: DeserializeOwned>(&self, leaf: Leaf<T>) -> Result<T> {
        self.read_as(leaf.id)
    }

    /// Built value of any control, converted to `T`
    pub fn read_as<T: DeserializeOwned>(&self, control: impl Into<ControlId>) -> Result<T> {
        let id = control.into();
        let value = self.value_at(id).ok_or(FormError::UnknownControl(id))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Store a typed value, returning whether it changed
    pub fn write<T: Serialize>(&mut self, leaf: Leaf<T>, value: T) -> Result<bool> {
        if !self.contains(leaf.id) {
            return Err(FormError::UnknownControl(leaf.id));
        }
        let value = serde_json::to_value(value)?;
        Ok(self.set_value(leaf.id, value))
    }
}
