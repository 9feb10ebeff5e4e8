//! Node: identity plus one adjacency slot per edge-type token.

use hashbrown::{HashMap, HashSet};

use super::{ElementId, Label};
use crate::adjacency::{self, Adjacency, AdjacencySet};
use crate::config::{ContainerKind, DEFAULT_SEPARATOR};
use crate::Result;

/// Outcome of [`Node::relate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relate {
    Added,
    AlreadyPresent,
    /// The node carries no slot for the token.
    NoSuchRelationType,
}

/// Outcome of [`Node::unrelate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unrelate {
    Removed,
    NotPresent,
    NoSuchRelationType,
}

/// A graph vertex.
///
/// Slots are registered lazily: a node only knows the tokens it has been told
/// about. A slot may be declared without a concrete adjacency set; the set is
/// built on first write.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: ElementId,
    label: Option<Label>,
    kind: ContainerKind,
    sep: char,
    slots: HashMap<String, Option<Adjacency>>,
    provisional: bool,
}

impl Node {
    pub fn new(id: impl Into<ElementId>, kind: ContainerKind) -> Self {
        Self {
            id: id.into(),
            label: None,
            kind,
            sep: DEFAULT_SEPARATOR,
            slots: HashMap::new(),
            provisional: false,
        }
    }

    pub fn with_separator(mut self, sep: char) -> Self {
        self.sep = sep;
        self
    }

    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_relation_types<'a>(mut self, tokens: impl IntoIterator<Item = &'a str>) -> Self {
        for token in tokens {
            self.create_relation_type(token);
        }
        self
    }

    pub(crate) fn mark_provisional(mut self) -> Self {
        self.provisional = true;
        self
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Replace the label, returning the previous one.
    pub fn set_label(&mut self, label: Option<Label>) -> Option<Label> {
        std::mem::replace(&mut self.label, label)
    }

    pub fn container_kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn separator(&self) -> char {
        self.sep
    }

    /// True when the node was materialized by an edge operation rather than
    /// created directly.
    pub fn is_provisional(&self) -> bool {
        self.provisional
    }

    /// Whether this node's representation can store `id` as a neighbor.
    pub fn accepts(&self, id: &ElementId) -> bool {
        adjacency::representable(self.kind, self.sep, id)
    }

    // ========================================================================
    // Slots
    // ========================================================================

    pub fn has_relation_type(&self, token: &str) -> bool {
        self.slots.contains_key(token)
    }

    /// Declare an empty slot. Returns false if one already existed, which is
    /// left untouched.
    pub fn create_relation_type(&mut self, token: &str) -> bool {
        if self.slots.contains_key(token) {
            return false;
        }
        self.slots.insert(token.to_string(), None);
        true
    }

    /// Empty the slot, declaring it first if needed.
    pub fn clear_relation_type(&mut self, token: &str) {
        match self.slots.get_mut(token) {
            Some(Some(adj)) => adj.reset(),
            Some(None) => {}
            None => {
                self.slots.insert(token.to_string(), None);
            }
        }
    }

    /// Tokens this node carries a slot for, sorted.
    pub fn relation_type_tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.slots.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }

    /// Ensure a concrete adjacency set exists for `token`, declaring the slot
    /// if needed.
    pub(crate) fn materialize(&mut self, token: &str) -> &mut Adjacency {
        let (kind, sep, owner) = (self.kind, self.sep, &self.id);
        self.slots
            .entry_ref(token)
            .or_insert(None)
            .get_or_insert_with(|| Adjacency::with_separator(kind, owner.clone(), sep))
    }

    // ========================================================================
    // Per-slot pass-through
    // ========================================================================

    /// Neighbors under `token`, or `None` if the node has no such slot.
    pub fn related(&self, token: &str) -> Option<Vec<ElementId>> {
        match self.slots.get(token)? {
            Some(adj) => Some(adj.ids()),
            None => Some(Vec::new()),
        }
    }

    /// Add `id` to an existing slot. Never creates the slot.
    pub fn relate(&mut self, token: &str, id: &ElementId) -> Result<Relate> {
        if !self.slots.contains_key(token) {
            return Ok(Relate::NoSuchRelationType);
        }
        if self.materialize(token).insert(id)? {
            Ok(Relate::Added)
        } else {
            Ok(Relate::AlreadyPresent)
        }
    }

    pub fn unrelate(&mut self, token: &str, id: &ElementId) -> Unrelate {
        match self.slots.get_mut(token) {
            None => Unrelate::NoSuchRelationType,
            Some(Some(adj)) => {
                if adj.remove(id) { Unrelate::Removed } else { Unrelate::NotPresent }
            }
            Some(None) => Unrelate::NotPresent,
        }
    }

    /// False both when `id` is absent and when the slot does not exist.
    pub fn is_related(&self, token: &str, id: &ElementId) -> bool {
        matches!(self.slots.get(token), Some(Some(adj)) if adj.contains(id))
    }

    pub fn degree(&self, token: &str) -> usize {
        match self.slots.get(token) {
            Some(Some(adj)) => adj.len(),
            _ => 0,
        }
    }

    /// Total number of neighbor entries across all slots.
    pub fn total_degree(&self) -> usize {
        self.slots.values().flatten().map(|adj| adj.len()).sum()
    }

    // ========================================================================
    // Pruning
    // ========================================================================

    /// Narrow one slot. `None` if the slot does not exist.
    pub fn narrow_relation(
        &mut self,
        token: &str,
        reference: &HashSet<ElementId>,
        keep: bool,
    ) -> Option<usize> {
        match self.slots.get_mut(token)? {
            Some(adj) => Some(adjacency::narrow_down(adj, reference, keep)),
            None => Some(0),
        }
    }

    /// Narrow every materialized slot. Returns the number of ids removed.
    pub fn narrow_down(&mut self, reference: &HashSet<ElementId>, keep: bool) -> usize {
        self.slots
            .values_mut()
            .flatten()
            .map(|adj| adjacency::narrow_down(adj, reference, keep))
            .sum()
    }
}
