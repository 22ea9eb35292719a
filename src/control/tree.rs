//! Arena of controls and the propagation rules between them

use super::{ControlId, ControlKind, GroupControl, LeafControl, Node, SequenceControl};
use crate::path::{self, PathSegment, PathStyle};
use crate::validation::ValidationError;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena of controls. Freed slots are reused; bumping the slot generation
/// on free keeps stale ids from resolving to the new occupant.
#[derive(Debug, Clone, Default)]
pub(crate) struct ControlTree {
    slots: Vec<Slot>,
    vacant: Vec<usize>,
}

impl ControlTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: Node) -> ControlId {
        if let Some(index) = self.vacant.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return ControlId::new(index, slot.generation);
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        ControlId::new(self.slots.len() - 1, 0)
    }

    fn slot_mut(&mut self, id: ControlId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
    }

    pub fn get(&self, id: ControlId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Node> {
        self.slot_mut(id).and_then(|slot| slot.node.as_mut())
    }

    /// Number of live controls, detached ones included
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn set_parent(&mut self, child: ControlId, parent: Option<ControlId>) {
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
    }

    pub fn group(&self, id: ControlId) -> Option<&GroupControl> {
        match &self.get(id)?.kind {
            ControlKind::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn sequence(&self, id: ControlId) -> Option<&SequenceControl> {
        match &self.get(id)?.kind {
            ControlKind::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn sequence_mut(&mut self, id: ControlId) -> Option<&mut SequenceControl> {
        match &mut self.get_mut(id)?.kind {
            ControlKind::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    fn leaf_mut(&mut self, id: ControlId) -> Option<&mut LeafControl> {
        match &mut self.get_mut(id)?.kind {
            ControlKind::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Drop a control and everything it keeps alive
    pub fn free(&mut self, id: ControlId) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        let Some(node) = slot.node.take() else {
            return;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(id.index);
        for child in node.owned() {
            self.free(child);
        }
    }

    /// Move every control of `other` into this arena, returning the new id of `root`
    pub fn graft(&mut self, other: ControlTree, root: ControlId) -> ControlId {
        let offset = self.slots.len();
        self.slots.extend(other.slots.into_iter().map(|mut slot| {
            if let Some(node) = slot.node.as_mut() {
                node.shift_ids(offset);
            }
            slot
        }));
        self.vacant
            .extend(other.vacant.into_iter().map(|index| index + offset));
        root.shifted(offset)
    }

    /// Walk from `id` to the topmost attached ancestor
    fn ancestors_and_self(&self, id: ControlId) -> Vec<ControlId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(cid) = current {
            let Some(node) = self.get(cid) else { break };
            chain.push(cid);
            current = node.parent;
        }
        chain
    }

    pub fn mark_dirty(&mut self, id: ControlId) {
        for cid in self.ancestors_and_self(id) {
            if let Some(node) = self.get_mut(cid) {
                node.dirty = true;
            }
        }
    }

    pub fn mark_touched(&mut self, id: ControlId) {
        for cid in self.ancestors_and_self(id) {
            if let Some(node) = self.get_mut(cid) {
                node.touched = true;
            }
        }
    }

    /// Own flag or any dirty descendant
    pub fn is_dirty(&self, id: ControlId) -> bool {
        self.get(id).is_some_and(|node| {
            node.dirty || node.children().into_iter().any(|c| self.is_dirty(c))
        })
    }

    pub fn is_touched(&self, id: ControlId) -> bool {
        self.get(id).is_some_and(|node| {
            node.touched || node.children().into_iter().any(|c| self.is_touched(c))
        })
    }

    /// Collapse a subtree into plain values
    pub fn build(&self, id: ControlId) -> Value {
        self.collapse(id, false)
    }

    /// Collapse a subtree as it was at construction
    pub fn build_initial(&self, id: ControlId) -> Value {
        self.collapse(id, true)
    }

    fn collapse(&self, id: ControlId, initial: bool) -> Value {
        let Some(node) = self.get(id) else {
            return Value::Null;
        };
        match &node.kind {
            ControlKind::Leaf(leaf) if initial => leaf.initial().clone(),
            ControlKind::Leaf(leaf) => leaf.value().clone(),
            ControlKind::Group(group) => Value::Object(
                group
                    .iter()
                    .map(|(name, child)| (name.to_string(), self.collapse(child, initial)))
                    .collect::<Map<String, Value>>(),
            ),
            ControlKind::Sequence(seq) => {
                let ids = if initial {
                    seq.initial_ids()
                } else {
                    seq.ids()
                };
                Value::Array(ids.iter().map(|c| self.collapse(*c, initial)).collect())
            }
        }
    }

    /// Write `value` into a subtree with merge semantics.
    ///
    /// Leaves replace their value. Groups delegate each known key and ignore
    /// the rest. Sequences delegate by index and never resize. Returns
    /// whether any leaf changed.
    pub fn assign(&mut self, id: ControlId, value: &Value) -> bool {
        let targets: Vec<(ControlId, &Value)> = match (self.get(id).map(|n| &n.kind), value) {
            (None, _) => return false,
            (Some(ControlKind::Leaf(_)), _) => {
                let changed = self.leaf_mut(id).is_some_and(|leaf| leaf.replace(value));
                if changed {
                    self.mark_dirty(id);
                }
                return changed;
            }
            (Some(ControlKind::Group(group)), Value::Object(fields)) => fields
                .iter()
                .filter_map(|(name, v)| group.child(name).map(|child| (child, v)))
                .collect(),
            (Some(ControlKind::Sequence(seq)), Value::Array(items)) => {
                seq.ids().iter().copied().zip(items.iter()).collect()
            }
            _ => return false,
        };

        let mut changed = false;
        for (child, v) in targets {
            changed |= self.assign(child, v);
        }
        changed
    }

    /// Restore a subtree to its construction snapshot and clear its flags
    pub fn reset(&mut self, id: ControlId) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        node.dirty = false;
        node.touched = false;

        let children = match &mut node.kind {
            ControlKind::Leaf(leaf) => {
                leaf.restore();
                return;
            }
            ControlKind::Group(group) => group.ids().collect::<Vec<_>>(),
            ControlKind::Sequence(seq) => {
                let added = seq.restore();
                let initial = seq.ids().to_vec();
                for dropped in added {
                    self.free(dropped);
                }
                initial
            }
        };

        for child in children {
            self.set_parent(child, Some(id));
            self.reset(child);
        }
    }

    /// Validate a subtree, every child included, appending to `out`
    pub fn validate(
        &self,
        id: ControlId,
        prefix: &mut Vec<PathSegment>,
        style: PathStyle,
        out: &mut Vec<ValidationError>,
    ) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.kind {
            ControlKind::Leaf(leaf) => {
                let here = path::render(prefix, style);
                out.extend(leaf.validate().into_iter().map(|e| e.at(here.clone())));
            }
            ControlKind::Group(group) => {
                for (name, child) in group.iter() {
                    prefix.push(PathSegment::Key(name.to_string()));
                    self.validate(child, prefix, style, out);
                    prefix.pop();
                }
            }
            ControlKind::Sequence(seq) => {
                let here = path::render(prefix, style);
                let built = self.build(id);
                out.extend(seq.validate(&built).into_iter().map(|e| e.at(here.clone())));
                for (index, child) in seq.ids().iter().enumerate() {
                    prefix.push(PathSegment::Index(index));
                    self.validate(*child, prefix, style, out);
                    prefix.pop();
                }
            }
        }
    }

    /// Follow `segments` down from `from`
    pub fn resolve(&self, from: ControlId, segments: &[PathSegment]) -> Option<ControlId> {
        let mut current = from;
        for segment in segments {
            let node = self.get(current)?;
            current = match (&node.kind, segment) {
                (ControlKind::Group(group), PathSegment::Key(name)) => group.child(name)?,
                (ControlKind::Group(group), PathSegment::Index(i)) => {
                    group.child(&i.to_string())?
                }
                (ControlKind::Sequence(seq), PathSegment::Index(i)) => seq.child(*i)?,
                (ControlKind::Sequence(seq), PathSegment::Key(key)) => {
                    seq.child(key.parse().ok()?)?
                }
                (ControlKind::Leaf(_), _) => return None,
            };
        }
        Some(current)
    }

    /// Segments leading from `root` to `id`; `None` if `id` is not attached below `root`
    pub fn path_between(&self, root: ControlId, id: ControlId) -> Option<Vec<PathSegment>> {
        let mut segments = Vec::new();
        let mut current = id;
        while current != root {
            let parent = self.get(current)?.parent?;
            let segment = match &self.get(parent)?.kind {
                ControlKind::Group(group) => {
                    PathSegment::Key(group.name_of(current)?.to_string())
                }
                ControlKind::Sequence(seq) => PathSegment::Index(seq.index_of(current)?),
                ControlKind::Leaf(_) => return None,
            };
            segments.push(segment);
            current = parent;
        }
        segments.reverse();
        Some(segments)
    }

    /// Every leaf below `id` in traversal order
    pub fn leaves(
        &self,
        id: ControlId,
        prefix: &mut Vec<PathSegment>,
        out: &mut Vec<(Vec<PathSegment>, ControlId)>,
    ) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.kind {
            ControlKind::Leaf(_) => out.push((prefix.clone(), id)),
            ControlKind::Group(group) => {
                for (name, child) in group.iter() {
                    prefix.push(PathSegment::Key(name.to_string()));
                    self.leaves(child, prefix, out);
                    prefix.pop();
                }
            }
            ControlKind::Sequence(seq) => {
                for (index, child) in seq.ids().iter().enumerate() {
                    prefix.push(PathSegment::Index(index));
                    self.leaves(*child, prefix, out);
                    prefix.pop();
                }
            }
        }
    }
}
