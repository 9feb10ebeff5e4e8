//! # relgraph — In-Memory Typed-Relation Graph
//!
//! A container of nodes keyed by opaque ids, connected by typed, optionally
//! directed relations. Each node keeps one adjacency slot per edge-type
//! token, stored in one of three interchangeable representations.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `AdjacencySet` and `NodeStore` are the seams; the
//!    graph never reaches into a representation directly
//! 2. **No dangling ids**: deleting a node narrows every survivor first
//! 3. **Explicit outcomes**: expected misses are enum variants, usage
//!    defects are `Err`
//! 4. **Lazy slots**: a node only pays for the edge types it uses
//!
//! ## Quick Start
//!
//! ```rust
//! use relgraph::{EdgeType, ElementId, Graph, GraphConfig};
//!
//! # fn example() -> relgraph::Result<()> {
//! let config = GraphConfig::builder()
//!     .directed(["parent", "child"])
//!     .non_directed(["likes"])
//!     .build()?;
//! let mut graph = Graph::new(config);
//!
//! graph.add_edge("ada", "byron", EdgeType::pair("child", "parent"))?;
//! graph.add_edge("ada", "babbage", "likes")?;
//!
//! let parents = graph.related(&ElementId::from("ada"), "child");
//! assert_eq!(parents, Some(vec![ElementId::from("byron")]));
//!
//! graph.del_node(&ElementId::from("babbage"));
//! assert!(graph.dangling_references().is_empty());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Adjacency Representations
//!
//! | Kind | Type | Description |
//! |------|------|-------------|
//! | `list` | `ListAdjacency` | Ordered, linear dedup (default) |
//! | `set` | `SetAdjacency` | Hash set, O(1) membership |
//! | `string` | `StringAdjacency` | Delimited text buffer, most compact |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod adjacency;
pub mod storage;
pub mod diagnostics;
pub mod graph;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{EdgeType, ElementId, Label, Node, Relate, Unrelate};

// ============================================================================
// Re-exports: Configuration and adjacency
// ============================================================================

pub use config::{ContainerKind, GraphConfig, GraphConfigBuilder};
pub use adjacency::{
    narrow_down, Adjacency, AdjacencySet, ListAdjacency, SetAdjacency, StringAdjacency,
};

// ============================================================================
// Re-exports: Storage and diagnostics
// ============================================================================

pub use storage::{MemoryStore, NodeStore};
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, NullSink, Severity, TracingSink};

// ============================================================================
// Re-exports: Graph
// ============================================================================

pub use graph::{EdgeInsert, EdgeOptions, EdgeRemoval, Graph, NodeCreation, SharedGraph};

// ============================================================================
// Error Types
// ============================================================================

/// Hard failures: configuration or usage defects. Expected misses (absent
/// node, absent slot, missing endpoint) are reported through outcome enums
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid edge type: {token:?} is not an allowed token")]
    InvalidEdgeType { token: String },

    #[error("Cannot pair {token:?} with {converse:?}: {converse:?} already pairs with {existing:?}")]
    ConverseConflict { token: String, converse: String, existing: String },

    #[error("Edge type must be one token or a from/to pair, got {0} tokens")]
    EdgeTypeArity(usize),

    #[error("Unknown container kind: {0:?} (expected list, set or string)")]
    UnknownContainerKind(String),

    #[error("Invalid string separator {0:?}: it collides with the id text form")]
    InvalidSeparator(char),

    #[error("Id {id} cannot be stored in a {kind} adjacency set: {reason}")]
    IncompatibleId { id: String, kind: ContainerKind, reason: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
