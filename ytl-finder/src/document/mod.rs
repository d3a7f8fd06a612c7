//! Structured page documents
//!
//! A [`Document`] is an immutable JSON-like tree: objects keyed by name
//! (kept in document order), ordered sequences, and scalar leaves. Pages
//! embed one as a script variable; [`parser`] pulls it out and
//! [`tree_search`] locates fields inside it without relying on fixed paths.

pub mod parser;
pub mod tree_search;

use std::fmt;

pub use parser::{extract_script_assignment, parse_document, parse_embedded_document, DocumentError};
pub use tree_search::{find_first_by_any_key, find_path_to_key, find_path_to_value, resolve_path};

/// Document tree node
///
/// `serde_json` is built with `preserve_order`, so object fields iterate in
/// the order they appear in the source text.
pub type Document = serde_json::Value;

/// One step of a [`Path`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Descend into an object field
    Key(String),
    /// Descend into a sequence element
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, ".{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Location of a node inside a [`Document`], root first
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// Path with the last `count` segments removed
    ///
    /// Returns `None` when the path is shorter than `count`.
    pub fn trimmed(&self, count: usize) -> Option<Path> {
        let keep = self.0.len().checked_sub(count)?;
        Some(Path(self.0[..keep].to_vec()))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        write!(f, "$")?;
        for segment in &self.0 {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}
