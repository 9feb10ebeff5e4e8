//! String-encoded adjacency.
//!
//! Neighbor ids live in one text buffer, each in its [`ElementId::encode`]
//! form and surrounded by the separator: `,i1;,s3:abc,`. Membership is a
//! substring search for `sep + id + sep`, which is exact because no stored id
//! may contain the separator.
//!
//! Every operation is linear in the buffer length. Use this backend for
//! large fan-outs of short ids where memory matters more than CPU.

use super::AdjacencySet;
use crate::config::ContainerKind;
use crate::model::ElementId;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct StringAdjacency {
    owner: ElementId,
    sep: char,
    buf: String,
    count: usize,
}

impl StringAdjacency {
    pub fn new(owner: ElementId, sep: char) -> Self {
        Self { owner, sep, buf: String::new(), count: 0 }
    }

    pub fn separator(&self) -> char {
        self.sep
    }

    /// The raw delimited buffer.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    fn needle(&self, encoded: &str) -> String {
        let mut needle = String::with_capacity(encoded.len() + 2 * self.sep.len_utf8());
        needle.push(self.sep);
        needle.push_str(encoded);
        needle.push(self.sep);
        needle
    }
}

impl AdjacencySet for StringAdjacency {
    fn owner(&self) -> &ElementId {
        &self.owner
    }

    fn kind(&self) -> ContainerKind {
        ContainerKind::String
    }

    fn accepts(&self, id: &ElementId) -> bool {
        !id.encode().contains(self.sep)
    }

    fn insert(&mut self, id: &ElementId) -> Result<bool> {
        let encoded = id.encode();
        if encoded.contains(self.sep) {
            return Err(Error::IncompatibleId {
                id: id.to_string(),
                kind: ContainerKind::String,
                reason: format!("text form contains the separator {:?}", self.sep),
            });
        }
        if self.buf.contains(&self.needle(&encoded)) {
            return Ok(false);
        }
        if self.buf.is_empty() {
            self.buf.push(self.sep);
        }
        self.buf.push_str(&encoded);
        self.buf.push(self.sep);
        self.count += 1;
        Ok(true)
    }

    fn contains(&self, id: &ElementId) -> bool {
        let encoded = id.encode();
        !encoded.contains(self.sep) && self.buf.contains(&self.needle(&encoded))
    }

    fn remove(&mut self, id: &ElementId) -> bool {
        let encoded = id.encode();
        if encoded.contains(self.sep) {
            return false;
        }
        let needle = self.needle(&encoded);
        let Some(start) = self.buf.find(&needle) else {
            return false;
        };
        // Keep the leading separator so the next entry stays delimited.
        let keep = self.sep.len_utf8();
        self.buf.replace_range(start + keep..start + needle.len(), "");
        self.count -= 1;
        if self.count == 0 {
            self.buf.clear();
        }
        true
    }

    fn ids(&self) -> Vec<ElementId> {
        self.buf
            .split(self.sep)
            .filter(|chunk| !chunk.is_empty())
            .filter_map(|chunk| match ElementId::decode(chunk) {
                Ok(id) => Some(id),
                Err(err) => {
                    tracing::error!(owner = %self.owner, chunk, error = %err, "corrupt adjacency entry");
                    None
                }
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.count
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.count = 0;
    }
}
