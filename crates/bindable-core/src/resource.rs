//! Read-only view over one cluster object in its generic structured form.

use crate::error::CoreError;
use crate::path::{self, PathSegment};
use serde_json::Value;
use std::collections::BTreeMap;

/// One cluster object as an arbitrarily nested mapping.
///
/// Nothing about the shape is assumed: every accessor treats a missing or
/// mistyped field as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredResource {
    object: Value,
}

impl StructuredResource {
    /// Wrap any value. A non-mapping root is accepted and simply has no fields.
    pub fn new(object: Value) -> Self {
        Self { object }
    }

    /// Wrap a decoded document, requiring the root to be a mapping.
    pub fn from_value(object: Value) -> Result<Self, CoreError> {
        if !object.is_object() {
            return Err(CoreError::NotAnObject(value_kind(&object).to_string()));
        }
        Ok(Self::new(object))
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// The underlying document.
    pub fn as_value(&self) -> &Value {
        &self.object
    }

    /// Nested lookup by keys and indices.
    pub fn get(&self, segments: &[PathSegment<'_>]) -> Option<&Value> {
        path::lookup(&self.object, segments)
    }

    pub fn get_str(&self, segments: &[PathSegment<'_>]) -> Option<&str> {
        path::lookup_str(&self.object, segments)
    }

    pub fn kind(&self) -> Option<&str> {
        self.get_str(&[PathSegment::Key("kind")])
    }

    pub fn api_version(&self) -> Option<&str> {
        self.get_str(&[PathSegment::Key("apiVersion")])
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str(&path::keys(&["metadata", "name"]))
    }

    /// `metadata.annotations` as string pairs. Entries with non-string values
    /// are skipped; an absent or mistyped mapping yields an empty map.
    pub fn annotations(&self) -> BTreeMap<&str, &str> {
        self.get(&path::keys(&["metadata", "annotations"]))
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .filter_map(|(key, value)| Some((key.as_str(), value.as_str()?)))
            .collect()
    }

    /// Entries of `spec.versions`, yielded lazily. Empty when the field is
    /// absent or not a sequence.
    pub fn versions(&self) -> impl Iterator<Item = &Value> + '_ {
        self.get(&path::keys(&["spec", "versions"]))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
