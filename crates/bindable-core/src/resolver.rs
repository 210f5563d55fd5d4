//! Decides whether a resource definition describes a bindable service.
//!
//! Rules are evaluated in order and the first match wins: an explicit binding
//! annotation takes precedence over the schema convention, which is only
//! consulted when no annotation is present.

use crate::annotation::{self, BindingAnnotation};
use crate::path;
use crate::resource::StructuredResource;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

/// Location of the declared type of `status.binding.name`, relative to one
/// entry of `spec.versions`.
const BINDING_NAME_TYPE_PATH: [&str; 9] = [
    "schema",
    "openAPIV3Schema",
    "properties",
    "status",
    "properties",
    "binding",
    "properties",
    "name",
    "type",
];

/// Outcome of resolution, including which rule fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Bindability {
    /// One or more binding annotations are present (keys sorted).
    Annotated { keys: Vec<String> },
    /// A version schema declares `status.binding.name` as a string.
    SchemaConvention { version: Option<String> },
    NotBindable,
}

impl Bindability {
    pub fn is_bindable(&self) -> bool {
        !matches!(self, Bindability::NotBindable)
    }
}

impl fmt::Display for Bindability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bindability::Annotated { keys } => write!(f, "annotation {}", keys.join(", ")),
            Bindability::SchemaConvention { version: Some(v) } => {
                write!(f, "schema convention in version {}", v)
            }
            Bindability::SchemaConvention { version: None } => f.write_str("schema convention"),
            Bindability::NotBindable => f.write_str("not bindable"),
        }
    }
}

/// A named bindability check. Returns `Some` when the rule matches.
struct Rule {
    name: &'static str,
    check: fn(&StructuredResource) -> Option<Bindability>,
}

/// Checks in precedence order.
const RULES: &[Rule] = &[
    Rule {
        name: "annotation",
        check: annotation_rule,
    },
    Rule {
        name: "schema-convention",
        check: schema_convention_rule,
    },
];

fn annotation_rule(resource: &StructuredResource) -> Option<Bindability> {
    let keys: Vec<String> = annotation::binding_annotations(resource)
        .into_iter()
        .map(|a| a.key.to_string())
        .collect();
    if keys.is_empty() {
        None
    } else {
        Some(Bindability::Annotated { keys })
    }
}

fn schema_convention_rule(resource: &StructuredResource) -> Option<Bindability> {
    let type_path = path::keys(&BINDING_NAME_TYPE_PATH);
    resource
        .versions()
        .find(|version| {
            let declared = path::lookup_str(version, &type_path);
            trace!(
                version = version_name(version).unwrap_or("<unnamed>"),
                declared_type = ?declared,
                "inspecting version schema"
            );
            declared == Some("string")
        })
        .map(|version| Bindability::SchemaConvention {
            version: version_name(version).map(String::from),
        })
}

fn version_name(version: &Value) -> Option<&str> {
    version.get("name").and_then(Value::as_str)
}

/// Answers the bindability question for one resource snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BindabilityResolver<'r> {
    resource: &'r StructuredResource,
}

impl<'r> BindabilityResolver<'r> {
    pub fn new(resource: &'r StructuredResource) -> Self {
        Self { resource }
    }

    pub fn resource(&self) -> &'r StructuredResource {
        self.resource
    }

    /// Whether the resource should be treated as a bindable service.
    pub fn is_bindable(&self) -> bool {
        self.resolve().is_bindable()
    }

    /// Run the rules in order and report the first match.
    pub fn resolve(&self) -> Bindability {
        let name = self.resource.name().unwrap_or("<unnamed>");
        for rule in RULES {
            if let Some(outcome) = (rule.check)(self.resource) {
                debug!(rule = rule.name, resource = name, "binding rule matched");
                return outcome;
            }
        }
        debug!(resource = name, "no binding rule matched");
        Bindability::NotBindable
    }

    /// Raw binding annotation values, for path-expression evaluation downstream.
    pub fn binding_annotations(&self) -> Vec<BindingAnnotation<'r>> {
        annotation::binding_annotations(self.resource)
    }
}
