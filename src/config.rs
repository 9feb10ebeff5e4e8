//! # Graph Configuration
//!
//! Resolves and freezes the edge-type taxonomy and the adjacency
//! representation for one graph instance.
//!
//! Directed tokens are read as consecutive converse pairs:
//! `["parent", "child"]` means an edge that is `parent` as seen from its
//! source is `child` as seen from its target. Non-directed tokens are their
//! own converse.

use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Token used when neither directed nor non-directed tokens are supplied.
pub const FALLBACK_EDGE_TYPE: &str = "related";

/// Separator used by the string-encoded adjacency backend unless overridden.
pub const DEFAULT_SEPARATOR: char = ',';

// ============================================================================
// Container kind
// ============================================================================

/// Representation used for every adjacency slot of a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Ordered vector, linear dedup. Works for every id.
    #[default]
    List,
    /// Hash set. Constant-time membership, no ordering.
    Set,
    /// One delimited text buffer. Compact, linear-time operations.
    String,
}

impl ContainerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::List => "list",
            ContainerKind::Set => "set",
            ContainerKind::String => "string",
        }
    }

    /// Like `FromStr`, but unknown names fall back to [`ContainerKind::List`].
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(kind = name, "unknown container kind, falling back to list");
            ContainerKind::List
        })
    }
}

impl FromStr for ContainerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(ContainerKind::List),
            "set" => Ok(ContainerKind::Set),
            "string" | "str" => Ok(ContainerKind::String),
            _ => Err(Error::UnknownContainerKind(s.to_string())),
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// GraphConfig
// ============================================================================

/// Frozen configuration of one graph. Built with [`GraphConfig::builder`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphConfig {
    graph_id: Option<String>,
    edges_values: bool,
    directed: Vec<String>,
    converse: HashMap<String, String>,
    non_directed: Vec<String>,
    default_edge_type: String,
    callback: bool,
    container_kind: ContainerKind,
    strict_edge_types: bool,
    string_separator: char,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfigBuilder::default().resolve()
    }
}

impl GraphConfig {
    pub fn builder() -> GraphConfigBuilder {
        GraphConfigBuilder::default()
    }

    pub fn graph_id(&self) -> Option<&str> {
        self.graph_id.as_deref()
    }

    /// Reserved for edge payloads; the engine does not interpret it.
    pub fn edges_values(&self) -> bool {
        self.edges_values
    }

    pub fn directed_edge_types(&self) -> &[String] {
        &self.directed
    }

    pub fn non_directed_edge_types(&self) -> &[String] {
        &self.non_directed
    }

    pub fn default_edge_type(&self) -> &str {
        &self.default_edge_type
    }

    /// Default for `add_to_both`: whether inserting A→B records the converse at B.
    pub fn callback(&self) -> bool {
        self.callback
    }

    pub fn container_kind(&self) -> ContainerKind {
        self.container_kind
    }

    pub fn strict_edge_types(&self) -> bool {
        self.strict_edge_types
    }

    pub fn string_separator(&self) -> char {
        self.string_separator
    }

    /// `Some(true)` for directed tokens, `Some(false)` for non-directed ones,
    /// `None` for tokens this configuration does not know.
    pub fn is_directed(&self, token: &str) -> Option<bool> {
        if self.converse.contains_key(token) {
            Some(true)
        } else if self.non_directed.iter().any(|t| t == token) {
            Some(false)
        } else {
            None
        }
    }

    pub fn allows(&self, token: &str) -> bool {
        self.is_directed(token).is_some()
    }

    /// The token that labels the same relation from the other endpoint.
    pub fn converse(&self, token: &str) -> Option<&str> {
        match self.converse.get(token) {
            Some(c) => Some(c.as_str()),
            None => self.non_directed.iter().find(|t| *t == token).map(String::as_str),
        }
    }

    /// Every token known to this configuration, directed first.
    pub fn edge_types(&self) -> impl Iterator<Item = &str> {
        self.directed.iter().chain(self.non_directed.iter()).map(String::as_str)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Raw, unresolved settings. Deserializable so embedders can keep them in
/// their own config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfigBuilder {
    pub graph_id: Option<String>,
    pub edges_values: bool,
    pub directed_edge_types: Vec<String>,
    pub non_directed_edge_types: Vec<String>,
    pub default_edge_type: Option<String>,
    pub callback: bool,
    pub container_kind: ContainerKind,
    pub strict_edge_types: bool,
    pub string_separator: char,
}

impl Default for GraphConfigBuilder {
    fn default() -> Self {
        Self {
            graph_id: None,
            edges_values: false,
            directed_edge_types: Vec::new(),
            non_directed_edge_types: Vec::new(),
            default_edge_type: None,
            callback: true,
            container_kind: ContainerKind::List,
            strict_edge_types: true,
            string_separator: DEFAULT_SEPARATOR,
        }
    }
}

impl GraphConfigBuilder {
    pub fn graph_id(mut self, id: impl Into<String>) -> Self {
        self.graph_id = Some(id.into());
        self
    }

    pub fn edges_values(mut self, on: bool) -> Self {
        self.edges_values = on;
        self
    }

    pub fn directed(mut self, tokens: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.directed_edge_types.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn directed_pair(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.directed_edge_types.push(from.into());
        self.directed_edge_types.push(to.into());
        self
    }

    pub fn non_directed(mut self, tokens: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.non_directed_edge_types.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn default_edge_type(mut self, token: impl Into<String>) -> Self {
        self.default_edge_type = Some(token.into());
        self
    }

    pub fn callback(mut self, add_to_both: bool) -> Self {
        self.callback = add_to_both;
        self
    }

    pub fn container_kind(mut self, kind: ContainerKind) -> Self {
        self.container_kind = kind;
        self
    }

    /// Select the representation by name; unknown names fall back to `list`.
    pub fn container_kind_name(mut self, name: &str) -> Self {
        self.container_kind = ContainerKind::parse_lenient(name);
        self
    }

    pub fn strict_edge_types(mut self, strict: bool) -> Self {
        self.strict_edge_types = strict;
        self
    }

    pub fn string_separator(mut self, sep: char) -> Self {
        self.string_separator = sep;
        self
    }

    /// Resolve overlaps, pair directed tokens and pick the default token.
    ///
    /// Fails only when the string separator collides with the id text form.
    pub fn build(self) -> Result<GraphConfig> {
        let sep = self.string_separator;
        if sep.is_alphanumeric() || matches!(sep, ';' | ':' | '-' | '.' | '+') {
            return Err(Error::InvalidSeparator(sep));
        }
        Ok(self.resolve())
    }

    fn resolve(self) -> GraphConfig {
        let mut directed: Vec<String> = Vec::new();
        for token in self.directed_edge_types {
            if !directed.contains(&token) {
                directed.push(token);
            }
        }

        let mut non_directed: Vec<String> = Vec::new();
        for token in self.non_directed_edge_types {
            if directed.contains(&token) {
                tracing::debug!(token = %token, "edge type declared both ways, keeping it directed");
                continue;
            }
            if !non_directed.contains(&token) {
                non_directed.push(token);
            }
        }

        let mut converse = HashMap::with_capacity(directed.len());
        for pair in directed.chunks(2) {
            match pair {
                [from, to] => {
                    converse.insert(from.clone(), to.clone());
                    converse.insert(to.clone(), from.clone());
                }
                [lone] => {
                    converse.insert(lone.clone(), lone.clone());
                }
                _ => {}
            }
        }

        let explicit = self
            .default_edge_type
            .filter(|t| directed.contains(t) || non_directed.contains(t));
        let default_edge_type = if let Some(t) = explicit {
            t
        } else if let Some(t) = directed.first() {
            t.clone()
        } else if let Some(t) = non_directed.first() {
            t.clone()
        } else {
            non_directed.push(FALLBACK_EDGE_TYPE.to_string());
            FALLBACK_EDGE_TYPE.to_string()
        };

        GraphConfig {
            graph_id: self.graph_id,
            edges_values: self.edges_values,
            directed,
            converse,
            non_directed,
            default_edge_type,
            callback: self.callback,
            container_kind: self.container_kind,
            strict_edge_types: self.strict_edge_types,
            string_separator: self.string_separator,
        }
    }
}
