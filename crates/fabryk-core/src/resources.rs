//! Hierarchical resource paths.
//!
//! Every addressable resource in a repository lives at a [`ResourcePath`]:
//! `/` is the root, `/collection/item` is a child of `/collection`. Paths are
//! value types; navigating to a parent never touches a store.
//!
//! # Example
//!
//! ```rust
//! use fabryk_core::ResourcePath;
//!
//! let path: ResourcePath = "/archive/letters/1912".parse().unwrap();
//! assert_eq!(path.depth(), 3);
//! assert_eq!(path.parent().unwrap().to_string(), "/archive/letters");
//!
//! let chain: Vec<String> = path.ancestors().map(|p| p.to_string()).collect();
//! assert_eq!(chain, ["/archive/letters/1912", "/archive/letters", "/archive", "/"]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

/// Address of a resource node in the repository hierarchy.
///
/// Empty segments collapse (`//a/` is `/a`). Segments `.` and `..`,
/// whitespace-only segments, and segments containing control characters
/// are rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// The repository root.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a path from its external form.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut segments = Vec::new();
        for segment in raw.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            validate_segment(raw, segment)?;
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    /// Returns `true` for the repository root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments below the root (the root has depth 0).
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Last segment, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    /// Append a single segment.
    pub fn child(&self, segment: &str) -> Result<Self> {
        if segment.is_empty() || segment.contains(PATH_SEPARATOR) {
            return Err(Error::invalid_path(
                segment,
                "a child segment must be non-empty and contain no separator",
            ));
        }
        validate_segment(segment, segment)?;
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }

    /// Returns `true` if `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &ResourcePath) -> bool {
        self.depth() < other.depth() && other.segments.starts_with(&self.segments)
    }

    /// Returns `true` if `self` is a strict descendant of `other`.
    pub fn is_descendant_of(&self, other: &ResourcePath) -> bool {
        other.is_ancestor_of(self)
    }

    /// Iterate from `self` up to and including the root.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: Some(self.clone()),
        }
    }
}

fn validate_segment(raw: &str, segment: &str) -> Result<()> {
    if segment == "." || segment == ".." {
        return Err(Error::invalid_path(
            raw,
            "relative segments are not allowed",
        ));
    }
    if segment.trim().is_empty() {
        return Err(Error::invalid_path(raw, "segments cannot be whitespace"));
    }
    if segment.chars().any(char::is_control) {
        return Err(Error::invalid_path(
            raw,
            "segments cannot contain control characters",
        ));
    }
    Ok(())
}

/// Iterator over a path and its ancestors, nearest first.
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<ResourcePath>,
}

impl Iterator for Ancestors {
    type Item = ResourcePath;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "{PATH_SEPARATOR}");
        }
        for segment in &self.segments {
            write!(f, "{PATH_SEPARATOR}{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for ResourcePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ResourcePath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for ResourcePath {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<ResourcePath> for String {
    fn from(path: ResourcePath) -> Self {
        path.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
