//! # Node Store Trait
//!
//! The contract between the graph container and whatever keeps its nodes.
//! The graph owns the store; every node lives in exactly one slot keyed by
//! its [`ElementId`].
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | Hash map, for embedding and tests |

pub mod memory;

use crate::model::{ElementId, Node};

pub use memory::MemoryStore;

// ============================================================================
// NodeStore Trait
// ============================================================================

/// Indexed object store keyed by node id.
///
/// Stores never interpret nodes and never touch adjacency; keeping
/// neighbors consistent is the graph's job.
pub trait NodeStore: Send + Sync {
    fn contains(&self, id: &ElementId) -> bool;

    fn get(&self, id: &ElementId) -> Option<&Node>;

    fn get_mut(&mut self, id: &ElementId) -> Option<&mut Node>;

    /// Install `node` under `id`.
    ///
    /// Returns false without touching the store when `id` is occupied and
    /// `replace` is false.
    fn put(&mut self, id: ElementId, node: Node, replace: bool) -> bool;

    /// Remove and return the node under `id`.
    fn remove(&mut self, id: &ElementId) -> Option<Node>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of every stored node, in no particular order.
    fn ids(&self) -> Vec<ElementId>;

    fn nodes<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Node> + 'a>;

    fn nodes_mut<'a>(&'a mut self) -> Box<dyn Iterator<Item = &'a mut Node> + 'a>;

    /// Drop every node for which `keep` returns false.
    ///
    /// Default: collect the doomed ids, then remove them one by one.
    fn retain(&mut self, keep: &mut dyn FnMut(&Node) -> bool) {
        let doomed: Vec<ElementId> = self
            .nodes()
            .filter(|n| !keep(*n))
            .map(|n| n.id().clone())
            .collect();
        for id in &doomed {
            self.remove(id);
        }
    }
}
