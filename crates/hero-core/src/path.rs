//! # Field Paths
//!
//! Location of a value inside a search response document, rendered in the
//! dotted form used by every validation error: `results[2].appearance.gender`.
//!
//! Paths always use the internal (underscored) field names, never the
//! hyphenated wire keys, so `results[0].biography.full_name` names the same
//! field regardless of which spelling the document used.

use std::fmt;

/// A single step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member by internal field name.
    Key(String),
    /// Array element by position.
    Index(usize),
}

/// Path from the document root to a field.
///
/// The empty path denotes the root itself and displays as `(root)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended by an object key.
    pub fn key(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(name.to_string()));
        Self { segments }
    }

    /// Returns a new path extended by an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(k) if i == 0 => f.write_str(k)?,
                Segment::Key(k) => write!(f, ".{k}")?,
                Segment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}
