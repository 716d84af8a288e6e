//! # JSON Pointer Paths
//!
//! [`JsonPath`] locates a node inside a schema or document tree. It
//! renders as an RFC 6901 JSON Pointer (`/properties/tags/items`), with
//! `~` and `/` in segments escaped as `~0` and `~1`. The root renders
//! as `(root)` so diagnostics never print an empty string.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A path from the root of a JSON tree to one of its nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPath(Vec<String>);

impl JsonPath {
    /// The empty path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path extended by one segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the path as a JSON Pointer; the root is the empty string.
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.0 {
            out.push('/');
            out.push_str(&segment.replace('~', "~0").replace('/', "~1"));
        }
        out
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.to_pointer())
        }
    }
}

impl<S: Into<String>> FromIterator<S> for JsonPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
