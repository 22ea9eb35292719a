//! Group controls: named children in insertion order

use super::ControlId;
use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
pub(crate) struct GroupControl {
    children: IndexMap<String, ControlId>,
}

impl GroupControl {
    pub fn new(children: IndexMap<String, ControlId>) -> Self {
        Self { children }
    }

    pub fn child(&self, name: &str) -> Option<ControlId> {
        self.children.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ControlId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn ids(&self) -> impl Iterator<Item = ControlId> + '_ {
        self.children.values().copied()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn name_of(&self, id: ControlId) -> Option<&str> {
        self.children
            .iter()
            .find(|(_, child)| **child == id)
            .map(|(name, _)| name.as_str())
    }

    pub fn shift_ids(&mut self, offset: usize) {
        for id in self.children.values_mut() {
            *id = id.shifted(offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> GroupControl {
        let mut children = IndexMap::new();
        children.insert("name".to_string(), ControlId::new(0, 0));
        children.insert("age".to_string(), ControlId::new(1, 0));
        GroupControl::new(children)
    }

    #[test]
    fn test_child_lookup() {
        let g = group();
        assert_eq!(g.child("age"), Some(ControlId::new(1, 0)));
        assert_eq!(g.child("missing"), None);
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let g = group();
        let names: Vec<&str> = g.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["name", "age"]);
    }

    #[test]
    fn test_name_of() {
        let g = group();
        assert_eq!(g.name_of(ControlId::new(0, 0)), Some("name"));
        assert_eq!(g.name_of(ControlId::new(7, 0)), None);
    }

    #[test]
    fn test_shift_ids() {
        let mut g = group();
        g.shift_ids(10);
        assert_eq!(g.child("name"), Some(ControlId::new(10, 0)));
        assert_eq!(g.child("age"), Some(ControlId::new(11, 0)));
        assert_eq!(g.len(), 2);
    }
}
