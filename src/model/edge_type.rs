//! Edge-type selector passed to edge operations.

use crate::{Error, Result};

/// Which relation an edge operation targets.
///
/// `Pair(from, to)` names the relation as seen from each endpoint: `from`
/// labels it at the source node, `to` at the target node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// The graph's default token.
    #[default]
    Default,
    /// One token; the target side uses its converse.
    Single(String),
    Pair(String, String),
}

impl EdgeType {
    pub fn single(token: impl Into<String>) -> Self {
        EdgeType::Single(token.into())
    }

    pub fn pair(from: impl Into<String>, to: impl Into<String>) -> Self {
        EdgeType::Pair(from.into(), to.into())
    }

    /// Build from an untyped token list. Anything but one or two tokens is
    /// a usage error.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        match tokens {
            [] => Ok(EdgeType::Default),
            [one] => Ok(EdgeType::single(one.as_ref())),
            [from, to] => Ok(EdgeType::pair(from.as_ref(), to.as_ref())),
            more => Err(Error::EdgeTypeArity(more.len())),
        }
    }
}

impl From<&str> for EdgeType { fn from(v: &str) -> Self { EdgeType::single(v) } }
impl From<String> for EdgeType { fn from(v: String) -> Self { EdgeType::Single(v) } }
impl From<(&str, &str)> for EdgeType { fn from((a, b): (&str, &str)) -> Self { EdgeType::pair(a, b) } }
impl<T: Into<EdgeType>> From<Option<T>> for EdgeType {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or_default() }
}
