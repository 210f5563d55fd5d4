//! Tolerant lookups into untyped JSON trees.
//!
//! Every step takes an optional container and yields an optional child, so a
//! long path collapses to `None` at the first missing key or type mismatch.

use serde_json::Value;

/// One step of a nested lookup: a mapping key or a sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for PathSegment<'a> {
    fn from(key: &'a str) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment<'_> {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Descend one level. Absent input, missing children and mismatched
/// container types all yield `None`.
pub fn step<'v>(value: Option<&'v Value>, segment: PathSegment<'_>) -> Option<&'v Value> {
    match (value?, segment) {
        (Value::Object(map), PathSegment::Key(key)) => map.get(key),
        (Value::Array(items), PathSegment::Index(index)) => items.get(index),
        _ => None,
    }
}

/// Follow `path` from `root`. An empty path returns the root itself.
pub fn lookup<'v>(root: &'v Value, path: &[PathSegment<'_>]) -> Option<&'v Value> {
    path.iter()
        .copied()
        .fold(Some(root), |current, segment| step(current, segment))
}

/// Like [`lookup`], but the terminal value must be a string.
pub fn lookup_str<'v>(root: &'v Value, path: &[PathSegment<'_>]) -> Option<&'v str> {
    lookup(root, path).and_then(Value::as_str)
}

/// Build a key-only path from string literals.
pub fn keys<'a>(names: &[&'a str]) -> Vec<PathSegment<'a>> {
    names.iter().copied().map(PathSegment::Key).collect()
}
