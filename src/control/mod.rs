//! Control tree nodes
//!
//! Controls live in an arena owned by their [`crate::Form`]. A node refers
//! to its parent and children by [`ControlId`]; the parent's container of
//! children decides how long a child lives.

mod group;
mod leaf;
mod sequence;
mod tree;

pub(crate) use group::GroupControl;
pub(crate) use leaf::LeafControl;
pub(crate) use sequence::SequenceControl;
pub(crate) use tree::ControlTree;

use std::fmt;

/// Handle to a control inside one form
///
/// Ids are only meaningful for the form that produced them. Once a control
/// is dropped from the tree its id never resolves again, even after its
/// arena slot has been reused: the slot's generation moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl ControlId {
    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Same slot generation, moved `offset` slots along
    pub(crate) fn shifted(self, offset: usize) -> Self {
        Self::new(self.index + offset, self.generation)
    }
}

/// The kind of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlType {
    Leaf,
    Group,
    Sequence,
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControlType::Leaf => "leaf",
            ControlType::Group => "group",
            ControlType::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

/// State shared by every control
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// Absent for the root and for detached controls
    pub parent: Option<ControlId>,
    pub dirty: bool,
    pub touched: bool,
    pub kind: ControlKind,
}

#[derive(Debug, Clone)]
pub(crate) enum ControlKind {
    Leaf(LeafControl),
    Group(GroupControl),
    Sequence(SequenceControl),
}

impl Node {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            parent: None,
            dirty: false,
            touched: false,
            kind,
        }
    }

    pub fn control_type(&self) -> ControlType {
        match self.kind {
            ControlKind::Leaf(_) => ControlType::Leaf,
            ControlKind::Group(_) => ControlType::Group,
            ControlKind::Sequence(_) => ControlType::Sequence,
        }
    }

    /// Current children in order
    pub fn children(&self) -> Vec<ControlId> {
        match &self.kind {
            ControlKind::Leaf(_) => Vec::new(),
            ControlKind::Group(group) => group.ids().collect(),
            ControlKind::Sequence(seq) => seq.ids().to_vec(),
        }
    }

    /// Every child this node keeps alive, including detached initial elements
    pub fn owned(&self) -> Vec<ControlId> {
        match &self.kind {
            ControlKind::Sequence(seq) => seq.owned(),
            _ => self.children(),
        }
    }

    /// Move every id this node refers to by `offset`
    pub fn shift_ids(&mut self, offset: usize) {
        self.parent = self.parent.map(|p| p.shifted(offset));
        match &mut self.kind {
            ControlKind::Leaf(_) => {}
            ControlKind::Group(group) => group.shift_ids(offset),
            ControlKind::Sequence(seq) => seq.shift_ids(offset),
        }
    }
}
