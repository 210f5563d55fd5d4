//! Binding annotations: explicit opt-in markers on a resource definition.

use crate::resource::StructuredResource;
use serde::Serialize;

/// Annotation key that marks a resource as bindable.
pub const BINDING_ANNOTATION: &str = "service.binding";

/// Prefix for namespaced binding annotations, e.g. `service.binding/host`.
pub const BINDING_ANNOTATION_PREFIX: &str = "service.binding/";

/// A binding annotation entry. The value is an extraction-path expression
/// that is carried through untouched for downstream extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BindingAnnotation<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

pub fn is_binding_key(key: &str) -> bool {
    key == BINDING_ANNOTATION || key.starts_with(BINDING_ANNOTATION_PREFIX)
}

/// All binding annotations on `resource`, ordered by key.
pub fn binding_annotations(resource: &StructuredResource) -> Vec<BindingAnnotation<'_>> {
    resource
        .annotations()
        .into_iter()
        .filter(|(key, _)| is_binding_key(key))
        .map(|(key, value)| BindingAnnotation { key, value })
        .collect()
}
