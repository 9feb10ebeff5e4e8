//! List-backed adjacency: ordered, linear dedup.

use smallvec::SmallVec;

use super::AdjacencySet;
use crate::config::ContainerKind;
use crate::model::ElementId;
use crate::Result;

/// Neighbors kept in insertion order. Small fan-outs stay inline.
#[derive(Debug, Clone, PartialEq)]
pub struct ListAdjacency {
    owner: ElementId,
    ids: SmallVec<[ElementId; 4]>,
}

impl ListAdjacency {
    pub fn new(owner: ElementId) -> Self {
        Self { owner, ids: SmallVec::new() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementId> {
        self.ids.iter()
    }
}

impl AdjacencySet for ListAdjacency {
    fn owner(&self) -> &ElementId {
        &self.owner
    }

    fn kind(&self) -> ContainerKind {
        ContainerKind::List
    }

    fn insert(&mut self, id: &ElementId) -> Result<bool> {
        if self.ids.contains(id) {
            return Ok(false);
        }
        self.ids.push(id.clone());
        Ok(true)
    }

    fn contains(&self, id: &ElementId) -> bool {
        self.ids.contains(id)
    }

    fn remove(&mut self, id: &ElementId) -> bool {
        match self.ids.iter().position(|x| x == id) {
            Some(pos) => {
                self.ids.remove(pos);
                true
            }
            None => false,
        }
    }

    fn ids(&self) -> Vec<ElementId> {
        self.ids.to_vec()
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn reset(&mut self) {
        self.ids.clear();
    }
}
