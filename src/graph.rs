//! # Graph Container
//!
//! Owns the configuration, the node store and the set of edge-type tokens
//! in use. Every mutation that could leave a neighbor id pointing at a
//! missing node goes through here.
//!
//! ## Consistency
//!
//! Outside a deletion in progress, every id held in any adjacency slot names
//! a node present in the store. [`Graph::del_node`] keeps this by narrowing
//! every surviving node before the store entry is dropped.
//!
//! ## Concurrency
//!
//! `Graph` does no locking. Callers sharing a graph across threads must
//! serialize mutations, e.g. through [`SharedGraph`].

use std::fmt;
use std::sync::Arc;

use hashbrown::HashSet;
use parking_lot::RwLock;
use serde_json::json;

use crate::adjacency::{self, AdjacencySet};
use crate::config::GraphConfig;
use crate::diagnostics::{DiagnosticSink, Severity, TracingSink};
use crate::model::{EdgeType, ElementId, Label, Node, Unrelate};
use crate::storage::{MemoryStore, NodeStore};
use crate::{Error, Result};

/// A graph behind one reader/writer lock.
pub type SharedGraph<S = MemoryStore> = Arc<RwLock<Graph<S>>>;

// ============================================================================
// Outcomes
// ============================================================================

/// Outcome of [`Graph::create_node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCreation {
    Created,
    /// An existing node under the same id was replaced.
    Replaced,
    /// The id was taken and replacement was not allowed. Nothing changed.
    AlreadyExists,
}

impl NodeCreation {
    pub fn is_success(&self) -> bool {
        !matches!(self, NodeCreation::AlreadyExists)
    }
}

/// Outcome of [`Graph::add_edge`]. Hard validation failures are `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    /// Both endpoints existed before the call.
    Existing,
    /// At least one endpoint was created by the call.
    Created,
    /// An endpoint was missing and creation was not allowed. Nothing changed.
    MissingEndpoint,
}

impl EdgeInsert {
    pub fn is_success(&self) -> bool {
        !matches!(self, EdgeInsert::MissingEndpoint)
    }
}

/// Outcome of [`Graph::del_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRemoval {
    /// At least one side of the relation was removed.
    Removed,
    NotPresent,
    /// The source node does not exist.
    MissingEndpoint,
}

/// Per-call overrides for [`Graph::add_edge_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeOptions {
    /// Record the converse relation at the target. `None` uses the
    /// configuration's callback default.
    pub add_to_both: Option<bool>,
    /// Create missing endpoints as provisional nodes.
    pub create_missing: bool,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self { add_to_both: None, create_missing: true }
    }
}

impl EdgeOptions {
    pub fn add_to_both(mut self, on: bool) -> Self {
        self.add_to_both = Some(on);
        self
    }

    pub fn create_missing(mut self, on: bool) -> Self {
        self.create_missing = on;
        self
    }
}

// ============================================================================
// Graph
// ============================================================================

/// An edge-type token declared after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AdHocEdgeType {
    token: String,
    converse: String,
    directed: bool,
}

pub struct Graph<S: NodeStore = MemoryStore> {
    config: GraphConfig,
    store: S,
    ad_hoc: Vec<AdHocEdgeType>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Graph<MemoryStore> {
    /// In-memory graph.
    pub fn new(config: GraphConfig) -> Self {
        Self::with_store(config, MemoryStore::new())
    }
}

impl Default for Graph<MemoryStore> {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl<S: NodeStore> fmt::Debug for Graph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("graph_id", &self.config.graph_id())
            .field("container_kind", &self.config.container_kind())
            .field("nodes", &self.store.len())
            .field("ad_hoc_edge_types", &self.ad_hoc)
            .finish()
    }
}

impl<S: NodeStore> Graph<S> {
    pub fn with_store(config: GraphConfig, store: S) -> Self {
        Self {
            config,
            store,
            ad_hoc: Vec::new(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink (defaults to [`TracingSink`]).
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn into_shared(self) -> SharedGraph<S> {
        Arc::new(RwLock::new(self))
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn report(&self, message: &str, severity: Severity, data: serde_json::Value) {
        self.sink.log(message, severity, &data);
    }

    /// Whether `owner`'s slots can hold `id`. Owners not yet in the store
    /// are judged by the representation a fresh node would get.
    fn check_accepts(&self, owner: &ElementId, id: &ElementId) -> Result<()> {
        let (kind, sep) = match self.store.get(owner) {
            Some(node) if node.accepts(id) => return Ok(()),
            Some(node) => (node.container_kind(), node.separator()),
            None => {
                let (kind, sep) = (self.config.container_kind(), self.config.string_separator());
                if adjacency::representable(kind, sep, id) {
                    return Ok(());
                }
                (kind, sep)
            }
        };
        Err(Error::IncompatibleId {
            id: id.to_string(),
            kind,
            reason: format!("text form contains the separator {sep:?}"),
        })
    }

    fn report_missing_slot(&self, id: &ElementId, token: &str) {
        self.report(
            "relation type not declared on node",
            Severity::Debug,
            json!({ "id": id.to_string(), "token": token }),
        );
    }

    fn fresh_node(&self, id: ElementId) -> Node {
        let default = self.config.default_edge_type();
        let mut node = Node::new(id, self.config.container_kind())
            .with_separator(self.config.string_separator());
        node.create_relation_type(default);
        if let Some(converse) = self.converse(default) {
            node.create_relation_type(converse);
        }
        node
    }

    // ========================================================================
    // Edge types
    // ========================================================================

    /// `Some(true)` directed, `Some(false)` non-directed, `None` unknown.
    pub fn is_directed(&self, token: &str) -> Option<bool> {
        self.config
            .is_directed(token)
            .or_else(|| self.ad_hoc(token).map(|e| e.directed))
    }

    /// Token naming the same relation from the other endpoint.
    pub fn converse(&self, token: &str) -> Option<&str> {
        self.config
            .converse(token)
            .or_else(|| self.ad_hoc(token).map(|e| e.converse.as_str()))
    }

    fn ad_hoc(&self, token: &str) -> Option<&AdHocEdgeType> {
        self.ad_hoc.iter().find(|e| e.token == token)
    }

    /// Configured tokens followed by tokens declared at runtime.
    pub fn edge_types(&self) -> Vec<&str> {
        self.config
            .edge_types()
            .chain(self.ad_hoc.iter().map(|e| e.token.as_str()))
            .collect()
    }

    /// Allow a new token. `converse` makes it directed, possibly with itself
    /// as converse; without it the token is non-directed.
    ///
    /// Returns `Ok(false)` if the token was already known. The pairing is
    /// recorded both ways, so a converse already paired with another token
    /// is rejected.
    pub fn declare_edge_type(&mut self, token: &str, converse: Option<&str>) -> Result<bool> {
        if self.is_directed(token).is_some() {
            return Ok(false);
        }
        let directed = converse.is_some();
        let converse = converse.unwrap_or(token);
        if converse != token {
            if let Some(existing) = self.converse(converse) {
                return Err(Error::ConverseConflict {
                    token: token.to_string(),
                    converse: converse.to_string(),
                    existing: existing.to_string(),
                });
            }
        }
        self.ad_hoc.push(AdHocEdgeType {
            token: token.to_string(),
            converse: converse.to_string(),
            directed,
        });
        if converse != token {
            self.ad_hoc.push(AdHocEdgeType {
                token: converse.to_string(),
                converse: token.to_string(),
                directed,
            });
        }
        tracing::debug!(token, converse, directed, "edge type declared");
        Ok(true)
    }

    /// Validate one token. Unknown tokens are errors under strict validation
    /// and self-converse ad hoc tokens otherwise.
    fn check_token(&self, token: &str) -> Result<()> {
        if self.is_directed(token).is_some() || !self.config.strict_edge_types() {
            Ok(())
        } else {
            Err(Error::InvalidEdgeType { token: token.to_string() })
        }
    }

    /// Resolve an edge-type selector to `(from_token, to_token)`.
    pub fn resolve_edge_type(&self, edge_type: &EdgeType) -> Result<(String, String)> {
        let (from, to) = match edge_type {
            EdgeType::Default => {
                let t = self.config.default_edge_type();
                (t.to_string(), self.converse(t).unwrap_or(t).to_string())
            }
            EdgeType::Single(t) => {
                self.check_token(t)?;
                (t.clone(), self.converse(t).unwrap_or(t).to_string())
            }
            EdgeType::Pair(a, b) => {
                self.check_token(a)?;
                self.check_token(b)?;
                (a.clone(), b.clone())
            }
        };
        Ok((from, to))
    }

    fn track(&mut self, token: &str) {
        if self.is_directed(token).is_none() {
            self.ad_hoc.push(AdHocEdgeType {
                token: token.to_string(),
                converse: token.to_string(),
                directed: false,
            });
            tracing::debug!(token, "ad hoc edge type tracked");
        }
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    pub fn check_node(&self, id: &ElementId) -> bool {
        self.store.contains(id)
    }

    /// The node under `id`. A miss is reported to the sink.
    pub fn get_node(&self, id: &ElementId) -> Option<&Node> {
        let node = self.store.get(id);
        if node.is_none() {
            self.report("node not found", Severity::Debug, json!({ "id": id.to_string() }));
        }
        node
    }

    /// Mutable access. Use the node's slot operations only; removing a node
    /// must go through [`Graph::del_node`].
    pub fn get_node_mut(&mut self, id: &ElementId) -> Option<&mut Node> {
        if !self.store.contains(id) {
            self.report("node not found", Severity::Debug, json!({ "id": id.to_string() }));
        }
        self.store.get_mut(id)
    }

    /// Like [`Graph::get_node_mut`], creating the node first if it is absent.
    pub fn get_or_create_node(&mut self, id: impl Into<ElementId>) -> Option<&mut Node> {
        let id = id.into();
        if !self.store.contains(&id) {
            self.create_node(id.clone(), false);
        }
        self.store.get_mut(&id)
    }

    /// Create a node with slots declared for the default token and its
    /// converse.
    pub fn create_node(&mut self, id: impl Into<ElementId>, replace: bool) -> NodeCreation {
        let id = id.into();
        let node = self.fresh_node(id.clone());
        self.install(id, node, replace)
    }

    /// Create a node with a label and extra declared slots.
    ///
    /// Extra tokens go through the same validation as edge types; nothing is
    /// installed if one is rejected.
    pub fn create_node_with(
        &mut self,
        id: impl Into<ElementId>,
        label: Option<Label>,
        extra_tokens: &[&str],
        replace: bool,
    ) -> Result<NodeCreation> {
        for token in extra_tokens {
            self.check_token(token)?;
        }
        let id = id.into();
        let mut node = self.fresh_node(id.clone());
        node.set_label(label);
        for token in extra_tokens {
            node.create_relation_type(token);
        }
        let outcome = self.install(id, node, replace);
        if outcome.is_success() {
            for token in extra_tokens {
                self.track(token);
            }
        }
        Ok(outcome)
    }

    fn install(&mut self, id: ElementId, node: Node, replace: bool) -> NodeCreation {
        let existed = self.store.contains(&id);
        if existed && !replace {
            self.report("node already exists", Severity::Debug, json!({ "id": id.to_string() }));
            return NodeCreation::AlreadyExists;
        }
        tracing::debug!(id = %id, replaced = existed, "node created");
        self.store.put(id, node, true);
        if existed { NodeCreation::Replaced } else { NodeCreation::Created }
    }

    /// Delete a node, first stripping its id from every other node.
    pub fn del_node(&mut self, id: &ElementId) -> bool {
        self.del_node_with(id, true)
    }

    /// Delete a node. With `clear_relations` false the neighbors of other
    /// nodes are left alone and may dangle.
    pub fn del_node_with(&mut self, id: &ElementId, clear_relations: bool) -> bool {
        if !self.store.contains(id) {
            self.report("cannot delete missing node", Severity::Debug, json!({ "id": id.to_string() }));
            return false;
        }
        let mut pruned = 0;
        if clear_relations {
            let reference: HashSet<ElementId> = [id.clone()].into_iter().collect();
            for node in self.store.nodes_mut() {
                if node.id() != id {
                    pruned += node.narrow_down(&reference, false);
                }
            }
        }
        self.store.remove(id);
        tracing::debug!(id = %id, pruned, "node deleted");
        true
    }

    // ========================================================================
    // Edges
    // ========================================================================

    /// Insert an edge using the configuration's defaults.
    pub fn add_edge(
        &mut self,
        from: impl Into<ElementId>,
        to: impl Into<ElementId>,
        edge_type: impl Into<EdgeType>,
    ) -> Result<EdgeInsert> {
        self.add_edge_with(from, to, edge_type, EdgeOptions::default())
    }

    /// Insert `to` under `from`'s from-token and, when `add_to_both`, `from`
    /// under `to`'s to-token.
    ///
    /// Validation runs before anything is touched: a rejected edge type or
    /// an id the representation cannot hold leaves the graph unchanged.
    pub fn add_edge_with(
        &mut self,
        from: impl Into<ElementId>,
        to: impl Into<ElementId>,
        edge_type: impl Into<EdgeType>,
        opts: EdgeOptions,
    ) -> Result<EdgeInsert> {
        let (from, to) = (from.into(), to.into());
        let (from_token, to_token) = self.resolve_edge_type(&edge_type.into())?;
        let both = opts.add_to_both.unwrap_or(self.config.callback());

        let pending = [Some((&from, &to)), both.then_some((&to, &from))];
        for (owner, id) in pending.into_iter().flatten() {
            self.check_accepts(owner, id)?;
        }

        let mut missing: Vec<&ElementId> = [&from, &to]
            .into_iter()
            .filter(|id| !self.store.contains(id))
            .collect();
        missing.dedup();
        if !missing.is_empty() && !opts.create_missing {
            self.report(
                "edge endpoint missing",
                Severity::Warning,
                json!({
                    "from": from.to_string(),
                    "to": to.to_string(),
                    "missing": missing.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
                }),
            );
            return Ok(EdgeInsert::MissingEndpoint);
        }
        let created = !missing.is_empty();
        let missing: Vec<ElementId> = missing.into_iter().cloned().collect();
        for id in missing {
            let node = self.fresh_node(id.clone()).mark_provisional();
            tracing::debug!(id = %id, "provisional node created");
            self.store.put(id, node, false);
        }

        if let Some(node) = self.store.get_mut(&from) {
            node.materialize(&from_token).insert(&to)?;
        }
        if both {
            if let Some(node) = self.store.get_mut(&to) {
                node.materialize(&to_token).insert(&from)?;
            }
        }
        self.track(&from_token);
        self.track(&to_token);

        tracing::debug!(from = %from, to = %to, from_token = %from_token, to_token = %to_token, both, "edge added");
        Ok(if created { EdgeInsert::Created } else { EdgeInsert::Existing })
    }

    /// Check an edge using the configuration's callback default.
    pub fn check_edge(
        &self,
        from: impl Into<ElementId>,
        to: impl Into<ElementId>,
        edge_type: impl Into<EdgeType>,
    ) -> Result<bool> {
        self.check_edge_with(from, to, edge_type, self.config.callback())
    }

    /// With `both`, the converse entry at `to` must be present as well.
    pub fn check_edge_with(
        &self,
        from: impl Into<ElementId>,
        to: impl Into<ElementId>,
        edge_type: impl Into<EdgeType>,
        both: bool,
    ) -> Result<bool> {
        let (from, to) = (from.into(), to.into());
        let (from_token, to_token) = self.resolve_edge_type(&edge_type.into())?;
        let Some(source) = self.store.get(&from) else {
            self.report("edge source missing", Severity::Debug, json!({ "from": from.to_string() }));
            return Ok(false);
        };
        if !source.has_relation_type(&from_token) {
            self.report_missing_slot(&from, &from_token);
            return Ok(false);
        }
        if !source.is_related(&from_token, &to) {
            return Ok(false);
        }
        if !both {
            return Ok(true);
        }
        Ok(self
            .store
            .get(&to)
            .is_some_and(|target| target.is_related(&to_token, &from)))
    }

    /// Remove an edge using the configuration's callback default.
    pub fn del_edge(
        &mut self,
        from: impl Into<ElementId>,
        to: impl Into<ElementId>,
        edge_type: impl Into<EdgeType>,
    ) -> Result<EdgeRemoval> {
        let both = self.config.callback();
        self.del_edge_with(from, to, edge_type, both)
    }

    /// Remove `to` from `from`'s slot and, with `both`, the converse entry.
    pub fn del_edge_with(
        &mut self,
        from: impl Into<ElementId>,
        to: impl Into<ElementId>,
        edge_type: impl Into<EdgeType>,
        both: bool,
    ) -> Result<EdgeRemoval> {
        let (from, to) = (from.into(), to.into());
        let (from_token, to_token) = self.resolve_edge_type(&edge_type.into())?;
        if !self.store.contains(&from) {
            self.report("edge source missing", Severity::Debug, json!({ "from": from.to_string() }));
            return Ok(EdgeRemoval::MissingEndpoint);
        }

        let mut removed = false;
        if let Some(node) = self.store.get_mut(&from) {
            removed |= node.unrelate(&from_token, &to) == Unrelate::Removed;
        }
        if both {
            if let Some(node) = self.store.get_mut(&to) {
                removed |= node.unrelate(&to_token, &from) == Unrelate::Removed;
            }
        }
        tracing::debug!(from = %from, to = %to, from_token = %from_token, to_token = %to_token, removed, "edge removed");
        Ok(if removed { EdgeRemoval::Removed } else { EdgeRemoval::NotPresent })
    }

    // ========================================================================
    // Enumeration
    // ========================================================================

    /// Neighbors of `id` under `token`. `None` if the node or slot is missing.
    pub fn related(&self, id: &ElementId, token: &str) -> Option<Vec<ElementId>> {
        let related = self.get_node(id)?.related(token);
        if related.is_none() {
            self.report_missing_slot(id, token);
        }
        related
    }

    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    pub fn node_ids(&self) -> Vec<ElementId> {
        self.store.ids()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.store.nodes()
    }

    /// Number of neighbor entries across all nodes and slots. A symmetric
    /// edge counts twice.
    pub fn adjacency_entries(&self) -> usize {
        self.store.nodes().map(Node::total_degree).sum()
    }

    /// Every `(owner, token, neighbor)` whose neighbor is not in the store.
    /// Empty whenever deletions ran with `clear_relations`.
    pub fn dangling_references(&self) -> Vec<(ElementId, String, ElementId)> {
        let mut out = Vec::new();
        for node in self.store.nodes() {
            for token in node.relation_type_tokens() {
                for neighbor in node.related(token).unwrap_or_default() {
                    if !self.store.contains(&neighbor) {
                        out.push((node.id().clone(), token.to_string(), neighbor));
                    }
                }
            }
        }
        out
    }

    // ========================================================================
    // Compaction
    // ========================================================================

    /// Keep only the nodes in `ids` and strip every neighbor outside that set.
    /// Returns the number of nodes dropped.
    pub fn retain_nodes<I, T>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: Into<ElementId>,
    {
        let keep: HashSet<ElementId> = ids.into_iter().map(Into::into).collect();
        let before = self.store.len();
        self.store.retain(&mut |node| keep.contains(node.id()));
        let pruned: usize = self
            .store
            .nodes_mut()
            .map(|node| node.narrow_down(&keep, true))
            .sum();
        let dropped = before - self.store.len();
        tracing::debug!(kept = keep.len(), dropped, pruned, "graph compacted");
        dropped
    }

    /// Copy the nodes in `ids` into a new in-memory graph, keeping only the
    /// edges between them.
    pub fn subgraph<I, T>(&self, ids: I) -> Graph<MemoryStore>
    where
        I: IntoIterator<Item = T>,
        T: Into<ElementId>,
    {
        let keep: HashSet<ElementId> = ids.into_iter().map(Into::into).collect();
        let mut store = MemoryStore::with_capacity(keep.len());
        for id in &keep {
            if let Some(node) = self.store.get(id) {
                let mut copy = node.clone();
                copy.narrow_down(&keep, true);
                store.put(id.clone(), copy, true);
            }
        }
        Graph {
            config: self.config.clone(),
            store,
            ad_hoc: self.ad_hoc.clone(),
            sink: Arc::clone(&self.sink),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContainerKind;
    use crate::diagnostics::MemorySink;
    use pretty_assertions::assert_eq;

    fn id(v: i64) -> ElementId {
        ElementId::from(v)
    }

    fn directed(kind: ContainerKind) -> Graph {
        let config = GraphConfig::builder()
            .directed(["f", "t"])
            .non_directed(["likes"])
            .container_kind(kind)
            .build()
            .unwrap();
        Graph::new(config)
    }

    #[test]
    fn test_default_edge_uses_converse() {
        let mut g = directed(ContainerKind::List);
        assert_eq!(g.add_edge(1, 2, EdgeType::Default).unwrap(), EdgeInsert::Created);
        assert!(g.check_edge(1, 2, EdgeType::Default).unwrap());
        assert_eq!(g.related(&id(2), "t"), Some(vec![id(1)]));
        assert_eq!(g.related(&id(1), "f"), Some(vec![id(2)]));
        assert_eq!(g.add_edge(1, 2, EdgeType::Default).unwrap(), EdgeInsert::Existing);
        assert_eq!(g.adjacency_entries(), 2);
    }

    #[test]
    fn test_created_endpoints_are_provisional() {
        let mut g = directed(ContainerKind::Set);
        g.create_node(1, false);
        g.add_edge(1, 2, "likes").unwrap();
        assert!(!g.get_node(&id(1)).unwrap().is_provisional());
        assert!(g.get_node(&id(2)).unwrap().is_provisional());
    }

    #[test]
    fn test_invalid_edge_type_changes_nothing() {
        let mut g = directed(ContainerKind::List);
        let err = g.add_edge(1, 2, "hates").unwrap_err();
        assert!(matches!(err, Error::InvalidEdgeType { ref token } if token == "hates"));
        assert_eq!(g.node_count(), 0);

        let err = g.add_edge(1, 2, ("f", "nope")).unwrap_err();
        assert!(matches!(err, Error::InvalidEdgeType { .. }));
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn test_incompatible_id_changes_nothing() {
        let config = GraphConfig::builder().container_kind(ContainerKind::String).build().unwrap();
        let mut g = Graph::new(config);
        g.create_node(1, false);
        let err = g.add_edge(1, "x,y", EdgeType::Default).unwrap_err();
        assert!(matches!(err, Error::IncompatibleId { kind: ContainerKind::String, .. }));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.adjacency_entries(), 0);
    }

    #[test]
    fn test_incompatible_back_reference_changes_nothing() {
        let config = GraphConfig::builder().container_kind(ContainerKind::String).build().unwrap();
        let mut g = Graph::new(config);
        g.create_node(1, false);
        assert!(g.get_node(&id(1)).unwrap().accepts(&id(2)));
        assert!(!g.get_node(&id(1)).unwrap().accepts(&ElementId::from("x,y")));

        let err = g.add_edge("x,y", 1, EdgeType::Default).unwrap_err();
        assert!(matches!(err, Error::IncompatibleId { ref id, .. } if id == "\"x,y\""));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.adjacency_entries(), 0);
    }

    #[test]
    fn test_missing_endpoint_is_soft() {
        let sink = Arc::new(MemorySink::new());
        let mut g = directed(ContainerKind::List).with_sink(sink.clone());
        g.create_node(1, false);
        let outcome = g
            .add_edge_with(1, 2, "likes", EdgeOptions::default().create_missing(false))
            .unwrap();
        assert_eq!(outcome, EdgeInsert::MissingEndpoint);
        assert!(!g.check_node(&id(2)));
        assert_eq!(g.related(&id(1), "likes"), None);
        assert_eq!(sink.records()[0].severity, Severity::Warning);
    }

    #[test]
    fn test_create_node_without_replace() {
        let mut g = directed(ContainerKind::List);
        g.add_edge(1, 2, "likes").unwrap();
        let before = g.get_node(&id(1)).cloned();
        assert_eq!(g.create_node(1, false), NodeCreation::AlreadyExists);
        assert_eq!(g.get_node(&id(1)).cloned(), before);
        assert_eq!(g.create_node(1, true), NodeCreation::Replaced);
        assert_eq!(g.related(&id(1), "likes"), None);
    }

    #[test]
    fn test_del_node_prunes_every_slot() {
        let mut g = directed(ContainerKind::String);
        g.add_edge(1, 2, EdgeType::Default).unwrap();
        g.add_edge(3, 1, "likes").unwrap();
        g.add_edge(2, 3, ("f", "likes")).unwrap();

        assert!(g.del_node(&id(1)));
        assert!(!g.del_node(&id(1)));
        assert!(g.dangling_references().is_empty());
        assert_eq!(g.related(&id(2), "t"), Some(vec![]));
        assert_eq!(g.related(&id(3), "likes"), Some(vec![id(2)]));
    }

    #[test]
    fn test_del_node_without_clearing_leaves_dangling() {
        let mut g = directed(ContainerKind::List);
        g.add_edge(1, 2, EdgeType::Default).unwrap();
        assert!(g.del_node_with(&id(1), false));
        assert_eq!(g.dangling_references(), vec![(id(2), "t".to_string(), id(1))]);
    }

    #[test]
    fn test_one_sided_edges() {
        let mut g = directed(ContainerKind::Set);
        g.add_edge_with(1, 2, "likes", EdgeOptions::default().add_to_both(false)).unwrap();
        assert!(g.check_edge_with(1, 2, "likes", false).unwrap());
        assert!(!g.check_edge_with(1, 2, "likes", true).unwrap());
        assert!(!g.get_node(&id(2)).unwrap().is_related("likes", &id(1)));
    }

    #[test]
    fn test_del_edge_mirrors_insertion() {
        let mut g = directed(ContainerKind::List);
        g.add_edge(1, 2, EdgeType::Default).unwrap();
        assert_eq!(g.del_edge(1, 2, EdgeType::Default).unwrap(), EdgeRemoval::Removed);
        assert_eq!(g.related(&id(1), "f"), Some(vec![]));
        assert_eq!(g.related(&id(2), "t"), Some(vec![]));
        assert_eq!(g.del_edge(1, 2, EdgeType::Default).unwrap(), EdgeRemoval::NotPresent);
        assert_eq!(g.del_edge(9, 2, EdgeType::Default).unwrap(), EdgeRemoval::MissingEndpoint);
    }

    #[test]
    fn test_ad_hoc_tokens_when_lenient() {
        let config = GraphConfig::builder()
            .non_directed(["near"])
            .strict_edge_types(false)
            .build()
            .unwrap();
        let mut g = Graph::new(config);
        g.add_edge("a", "b", "knows").unwrap();
        assert_eq!(g.edge_types(), vec!["near", "knows"]);
        assert_eq!(g.is_directed("knows"), Some(false));
        assert!(g.check_edge("b", "a", "knows").unwrap());
    }

    #[test]
    fn test_declare_directed_edge_type() {
        let mut g = directed(ContainerKind::List);
        assert!(g.declare_edge_type("boss", Some("report")).unwrap());
        assert!(!g.declare_edge_type("report", None).unwrap());
        g.add_edge("ann", "bob", "boss").unwrap();
        assert_eq!(g.related(&"bob".into(), "report"), Some(vec![ElementId::from("ann")]));
        assert_eq!(g.is_directed("report"), Some(true));
        assert!(g.check_edge("ann", "bob", "boss").unwrap());
    }

    #[test]
    fn test_declare_rejects_one_way_pairing() {
        let mut g = directed(ContainerKind::List);
        let err = g.declare_edge_type("boss", Some("likes")).unwrap_err();
        assert!(matches!(
            err,
            Error::ConverseConflict { ref converse, ref existing, .. }
                if converse == "likes" && existing == "likes"
        ));
        assert_eq!(g.is_directed("boss"), None);
        assert!(g.add_edge("ann", "bob", "boss").is_err());

        assert!(g.declare_edge_type("up", Some("t")).is_err());
        assert_eq!(g.converse("t"), Some("f"));
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn test_declare_directed_self_converse() {
        let mut g = directed(ContainerKind::Set);
        assert!(g.declare_edge_type("sibling", Some("sibling")).unwrap());
        assert_eq!(g.is_directed("sibling"), Some(true));
        assert_eq!(g.converse("sibling"), Some("sibling"));

        assert!(g.declare_edge_type("near", None).unwrap());
        assert_eq!(g.is_directed("near"), Some(false));
        assert_eq!(g.converse("near"), Some("near"));
        assert_eq!(g.edge_types(), vec!["f", "t", "likes", "sibling", "near"]);
    }

    #[test]
    fn test_create_node_with_rejects_unknown_token() {
        let mut g = directed(ContainerKind::List);
        assert!(g.create_node_with(1, None, &["bogus"], false).is_err());
        assert!(!g.check_node(&id(1)));

        let created = g.create_node_with(1, Some("one".into()), &["likes"], false).unwrap();
        assert_eq!(created, NodeCreation::Created);
        let node = g.get_node(&id(1)).unwrap();
        assert_eq!(node.relation_type_tokens(), vec!["f", "likes", "t"]);
        assert_eq!(node.label(), Some(&Label::from("one")));
    }

    #[test]
    fn test_retain_and_subgraph() {
        let mut g = directed(ContainerKind::List);
        for (a, b) in [(1, 2), (2, 3), (3, 4), (4, 1)] {
            g.add_edge(a, b, "likes").unwrap();
        }

        let sub = g.subgraph([1, 2, 3]);
        assert_eq!(sub.node_count(), 3);
        assert!(sub.dangling_references().is_empty());
        assert_eq!(g.node_count(), 4);

        assert_eq!(g.retain_nodes([1, 2]), 2);
        assert!(g.dangling_references().is_empty());
        assert_eq!(g.related(&id(1), "likes"), Some(vec![id(2)]));
    }

    #[test]
    fn test_get_or_create_node() {
        let mut g = directed(ContainerKind::Set);
        let node = g.get_or_create_node(5).unwrap();
        assert!(!node.is_provisional());
        assert!(g.check_node(&id(5)));
    }

    #[test]
    fn test_get_node_mut_edits_slots() {
        let sink = Arc::new(MemorySink::new());
        let mut g = directed(ContainerKind::List).with_sink(sink.clone());
        g.create_node(1, false);

        let node = g.get_node_mut(&id(1)).unwrap();
        node.set_label(Some("edited".into()));
        assert!(node.create_relation_type("likes"));
        assert!(g.get_node(&id(1)).unwrap().has_relation_type("likes"));
        assert!(sink.is_empty());

        assert!(g.get_node_mut(&id(2)).is_none());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_lookup_misses_are_reported() {
        let sink = Arc::new(MemorySink::new());
        let mut g = directed(ContainerKind::List).with_sink(sink.clone());
        g.create_node(1, false);
        g.create_node(2, false);

        assert!(!g.check_edge(9, 2, "likes").unwrap());
        assert_eq!(g.related(&id(1), "likes"), None);
        assert!(!g.check_edge(1, 2, "likes").unwrap());
        assert_eq!(g.related(&id(1), "f"), Some(vec![]));

        let records = sink.drain();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.severity == Severity::Debug));
        assert_eq!(records[0].data["from"], "9");
        assert_eq!(records[1].data["token"], "likes");
        assert_eq!(records[2].data["id"], "1");
    }

    #[test]
    fn test_shared_graph() {
        let shared = directed(ContainerKind::Set).into_shared();
        shared.write().add_edge(1, 2, "likes").unwrap();
        assert!(shared.read().check_edge(2, 1, "likes").unwrap());
    }
}
