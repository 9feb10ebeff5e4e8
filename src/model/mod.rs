//! # Graph Model
//!
//! Identifiers, nodes and edge-type selectors. This module is pure data:
//! no I/O, no shared state.

pub mod element_id;
pub mod node;
pub mod edge_type;

pub use element_id::ElementId;
pub use node::{Node, Relate, Unrelate};
pub use edge_type::EdgeType;

/// Opaque node payload. The engine stores it but never interprets it.
pub type Label = serde_json::Value;
