//! In-memory node store.
//!
//! This is the reference implementation of `NodeStore`: a plain hash map.
//! It does no locking of its own; wrap the whole graph in a
//! [`crate::SharedGraph`] when several threads need it.

use hashbrown::HashMap;

use super::NodeStore;
use crate::model::{ElementId, Node};

// ============================================================================
// MemoryStore
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    nodes: HashMap<ElementId, Node>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { nodes: HashMap::with_capacity(capacity) }
    }
}

// ============================================================================
// NodeStore impl
// ============================================================================

impl NodeStore for MemoryStore {
    fn contains(&self, id: &ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    fn get(&self, id: &ElementId) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn get_mut(&mut self, id: &ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    fn put(&mut self, id: ElementId, node: Node, replace: bool) -> bool {
        if !replace && self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, node);
        true
    }

    fn remove(&mut self, id: &ElementId) -> Option<Node> {
        self.nodes.remove(id)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn ids(&self) -> Vec<ElementId> {
        self.nodes.keys().cloned().collect()
    }

    fn nodes<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Node> + 'a> {
        Box::new(self.nodes.values())
    }

    fn nodes_mut<'a>(&'a mut self) -> Box<dyn Iterator<Item = &'a mut Node> + 'a> {
        Box::new(self.nodes.values_mut())
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&Node) -> bool) {
        self.nodes.retain(|_, node| keep(&*node));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContainerKind;

    fn node(id: i64) -> Node {
        Node::new(id, ContainerKind::List)
    }

    #[test]
    fn test_put_and_get() {
        let mut store = MemoryStore::new();
        assert!(store.put(ElementId::from(1), node(1), false));
        assert!(store.contains(&ElementId::from(1)));
        assert_eq!(store.get(&ElementId::from(1)).map(Node::id), Some(&ElementId::from(1)));
        assert!(store.get(&ElementId::from(2)).is_none());
    }

    #[test]
    fn test_put_without_replace_keeps_occupant() {
        let mut store = MemoryStore::new();
        store.put(ElementId::from(1), node(1).with_label("old"), false);
        assert!(!store.put(ElementId::from(1), node(1).with_label("new"), false));
        let kept = store.get(&ElementId::from(1)).and_then(Node::label).cloned();
        assert_eq!(kept, Some("old".into()));

        assert!(store.put(ElementId::from(1), node(1).with_label("new"), true));
        let replaced = store.get(&ElementId::from(1)).and_then(Node::label).cloned();
        assert_eq!(replaced, Some("new".into()));
    }

    #[test]
    fn test_remove_and_retain() {
        let mut store = MemoryStore::with_capacity(4);
        for i in 1..=4 {
            store.put(ElementId::from(i), node(i), false);
        }
        assert!(store.remove(&ElementId::from(4)).is_some());
        assert!(store.remove(&ElementId::from(4)).is_none());

        store.retain(&mut |n| n.id().as_int().is_some_and(|i| i % 2 == 1));
        let mut ids = store.ids();
        ids.sort_by_key(|id| id.as_int());
        assert_eq!(ids, vec![ElementId::from(1), ElementId::from(3)]);
        assert_eq!(store.nodes().count(), 2);
    }
}
