//! Hash-set-backed adjacency.

use hashbrown::HashSet;

use super::AdjacencySet;
use crate::config::ContainerKind;
use crate::model::ElementId;
use crate::Result;

/// Neighbors in a hash set: constant-time membership, no ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct SetAdjacency {
    owner: ElementId,
    ids: HashSet<ElementId>,
}

impl SetAdjacency {
    pub fn new(owner: ElementId) -> Self {
        Self { owner, ids: HashSet::new() }
    }
}

impl AdjacencySet for SetAdjacency {
    fn owner(&self) -> &ElementId {
        &self.owner
    }

    fn kind(&self) -> ContainerKind {
        ContainerKind::Set
    }

    fn insert(&mut self, id: &ElementId) -> Result<bool> {
        if self.ids.contains(id) {
            return Ok(false);
        }
        Ok(self.ids.insert(id.clone()))
    }

    fn contains(&self, id: &ElementId) -> bool {
        self.ids.contains(id)
    }

    fn remove(&mut self, id: &ElementId) -> bool {
        self.ids.remove(id)
    }

    fn ids(&self) -> Vec<ElementId> {
        self.ids.iter().cloned().collect()
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn reset(&mut self) {
        self.ids.clear();
    }
}
