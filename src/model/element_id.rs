//! Opaque node identifiers.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Identifier of a node.
///
/// Any hashable scalar works as a key: text, integers, floats, or a
/// fixed-size composite of those. Floats hash and compare by bit pattern,
/// with `-0.0` folded into `0.0` and every NaN folded into one value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementId {
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<ElementId>),
}

fn canonical_bits(f: f64) -> u64 {
    if f == 0.0 {
        0
    } else if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}

impl PartialEq for ElementId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ElementId::Int(a), ElementId::Int(b)) => a == b,
            (ElementId::Float(a), ElementId::Float(b)) => canonical_bits(*a) == canonical_bits(*b),
            (ElementId::Str(a), ElementId::Str(b)) => a == b,
            (ElementId::Tuple(a), ElementId::Tuple(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ElementId {}

impl Hash for ElementId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            ElementId::Int(v) => v.hash(state),
            ElementId::Float(v) => canonical_bits(*v).hash(state),
            ElementId::Str(v) => v.hash(state),
            ElementId::Tuple(v) => v.hash(state),
        }
    }
}

impl ElementId {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ElementId::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ElementId::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Lossless text form, used by the string-encoded adjacency backend.
    ///
    /// Integers and floats are terminated by `;`, strings are length-prefixed
    /// (`s<len>:<text>`) and tuples carry their arity (`t<n>:` then items).
    pub fn encode(&self) -> String {
        let mut out = String::new();
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut String) {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = match self {
            ElementId::Int(v) => write!(out, "i{v};"),
            ElementId::Float(v) => {
                let v = if *v == 0.0 { 0.0 } else { *v };
                write!(out, "f{v};")
            }
            ElementId::Str(s) => write!(out, "s{}:{s}", s.len()),
            ElementId::Tuple(items) => {
                let r = write!(out, "t{}:", items.len());
                for item in items {
                    item.encode_into(out);
                }
                r
            }
        };
    }

    /// Inverse of [`ElementId::encode`].
    pub fn decode(text: &str) -> Result<ElementId> {
        let mut cursor = Cursor { text, pos: 0 };
        let id = cursor.parse_one()?;
        if cursor.pos != text.len() {
            return Err(Error::Decode(format!(
                "trailing input after id at byte {} in {text:?}",
                cursor.pos
            )));
        }
        Ok(id)
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn fail(&self, what: &str) -> Error {
        Error::Decode(format!("{what} at byte {} in {:?}", self.pos, self.text))
    }

    fn take_until(&mut self, stop: char) -> Result<&'a str> {
        let rest = &self.text[self.pos..];
        let end = rest.find(stop).ok_or_else(|| self.fail("unterminated field"))?;
        self.pos += end + stop.len_utf8();
        Ok(&rest[..end])
    }

    fn parse_count(&mut self) -> Result<usize> {
        let digits = self.take_until(':')?;
        digits.parse().map_err(|_| self.fail("bad length prefix"))
    }

    fn parse_one(&mut self) -> Result<ElementId> {
        let tag = self.text[self.pos..]
            .chars()
            .next()
            .ok_or_else(|| self.fail("unexpected end of input"))?;
        self.pos += tag.len_utf8();
        match tag {
            'i' => {
                let digits = self.take_until(';')?;
                digits.parse().map(ElementId::Int).map_err(|_| self.fail("bad integer"))
            }
            'f' => {
                let digits = self.take_until(';')?;
                digits.parse().map(ElementId::Float).map_err(|_| self.fail("bad float"))
            }
            's' => {
                let len = self.parse_count()?;
                let body = self
                    .pos
                    .checked_add(len)
                    .and_then(|end| self.text.get(self.pos..end))
                    .ok_or_else(|| self.fail("string body out of range"))?;
                self.pos += len;
                Ok(ElementId::Str(body.to_owned()))
            }
            't' => {
                let n = self.parse_count()?;
                let mut items = Vec::with_capacity(n.min(16));
                for _ in 0..n {
                    items.push(self.parse_one()?);
                }
                Ok(ElementId::Tuple(items))
            }
            other => Err(self.fail(&format!("unknown tag {other:?}"))),
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<i32> for ElementId { fn from(v: i32) -> Self { ElementId::Int(v as i64) } }
impl From<i64> for ElementId { fn from(v: i64) -> Self { ElementId::Int(v) } }
impl From<u32> for ElementId { fn from(v: u32) -> Self { ElementId::Int(v as i64) } }
impl From<f64> for ElementId { fn from(v: f64) -> Self { ElementId::Float(v) } }
impl From<String> for ElementId { fn from(v: String) -> Self { ElementId::Str(v) } }
impl From<&str> for ElementId { fn from(v: &str) -> Self { ElementId::Str(v.to_owned()) } }
impl From<&ElementId> for ElementId { fn from(v: &ElementId) -> Self { v.clone() } }
impl<T: Into<ElementId>> From<Vec<T>> for ElementId {
    fn from(v: Vec<T>) -> Self { ElementId::Tuple(v.into_iter().map(Into::into).collect()) }
}
impl<A: Into<ElementId>, B: Into<ElementId>> From<(A, B)> for ElementId {
    fn from((a, b): (A, B)) -> Self { ElementId::Tuple(vec![a.into(), b.into()]) }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Int(i) => write!(f, "{i}"),
            ElementId::Float(v) => write!(f, "{v}"),
            ElementId::Str(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            ElementId::Tuple(items) => {
                write!(f, "(")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
        }
    }
}
