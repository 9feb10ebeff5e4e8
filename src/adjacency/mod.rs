//! # Adjacency Sets
//!
//! The neighbor ids of one node for one edge type. Three representations
//! satisfy the same [`AdjacencySet`] contract, so a graph can switch between
//! them without touching call sites.
//!
//! | Backend | Module | Trade-off |
//! |---------|--------|-----------|
//! | `ListAdjacency` | `list` | Insertion order, linear dedup, accepts every id |
//! | `SetAdjacency` | `set` | O(1) average membership, no order |
//! | `StringAdjacency` | `string` | One delimited buffer, smallest footprint |
//!
//! `insert` is idempotent and `remove` of an absent id is a no-op on every
//! backend.

pub mod list;
pub mod set;
pub mod string;
pub mod narrow;

use crate::config::{ContainerKind, DEFAULT_SEPARATOR};
use crate::model::ElementId;
use crate::Result;

pub use list::ListAdjacency;
pub use narrow::narrow_down;
pub use set::SetAdjacency;
pub use string::StringAdjacency;

// ============================================================================
// AdjacencySet Trait
// ============================================================================

/// Membership contract shared by every adjacency representation.
pub trait AdjacencySet {
    /// Id of the node this set belongs to. Informational only.
    fn owner(&self) -> &ElementId;

    /// Representation of this set.
    fn kind(&self) -> ContainerKind;

    /// Whether this representation can hold `id` at all.
    fn accepts(&self, _id: &ElementId) -> bool {
        true
    }

    /// Add `id`. Returns `Ok(true)` if it was not present before.
    ///
    /// Fails only with [`crate::Error::IncompatibleId`] when `accepts(id)`
    /// is false.
    fn insert(&mut self, id: &ElementId) -> Result<bool>;

    fn contains(&self, id: &ElementId) -> bool;

    /// Remove `id`. Returns whether it was present.
    fn remove(&mut self, id: &ElementId) -> bool;

    /// All neighbor ids. Insertion order for lists, unspecified otherwise.
    fn ids(&self) -> Vec<ElementId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every neighbor.
    fn reset(&mut self);
}

/// Whether a slot of `kind` can hold `id`, without building one.
pub fn representable(kind: ContainerKind, sep: char, id: &ElementId) -> bool {
    match kind {
        ContainerKind::String => !id.encode().contains(sep),
        ContainerKind::List | ContainerKind::Set => true,
    }
}

// ============================================================================
// Adjacency (runtime-selected backend)
// ============================================================================

/// An adjacency set whose representation was picked from a [`ContainerKind`]
/// at graph construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Adjacency {
    List(ListAdjacency),
    Set(SetAdjacency),
    String(StringAdjacency),
}

impl Adjacency {
    pub fn new(kind: ContainerKind, owner: ElementId) -> Self {
        Self::with_separator(kind, owner, DEFAULT_SEPARATOR)
    }

    /// Like [`Adjacency::new`]; `sep` is only used by the string backend.
    pub fn with_separator(kind: ContainerKind, owner: ElementId, sep: char) -> Self {
        match kind {
            ContainerKind::List => Adjacency::List(ListAdjacency::new(owner)),
            ContainerKind::Set => Adjacency::Set(SetAdjacency::new(owner)),
            ContainerKind::String => Adjacency::String(StringAdjacency::new(owner, sep)),
        }
    }

    fn inner(&self) -> &dyn AdjacencySet {
        match self {
            Adjacency::List(a) => a,
            Adjacency::Set(a) => a,
            Adjacency::String(a) => a,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn AdjacencySet {
        match self {
            Adjacency::List(a) => a,
            Adjacency::Set(a) => a,
            Adjacency::String(a) => a,
        }
    }
}

impl AdjacencySet for Adjacency {
    fn owner(&self) -> &ElementId { self.inner().owner() }
    fn kind(&self) -> ContainerKind { self.inner().kind() }
    fn accepts(&self, id: &ElementId) -> bool { self.inner().accepts(id) }
    fn insert(&mut self, id: &ElementId) -> Result<bool> { self.inner_mut().insert(id) }
    fn contains(&self, id: &ElementId) -> bool { self.inner().contains(id) }
    fn remove(&mut self, id: &ElementId) -> bool { self.inner_mut().remove(id) }
    fn ids(&self) -> Vec<ElementId> { self.inner().ids() }
    fn len(&self) -> usize { self.inner().len() }
    fn reset(&mut self) { self.inner_mut().reset() }
}
