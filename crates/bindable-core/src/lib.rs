//! Bindability detection for cluster custom resource definitions.
//!
//! A resource definition is a bindable service when it opts in through a
//! `service.binding` annotation, or when its versioned schema declares a
//! string-typed `status.binding.name` field.

pub mod annotation;
pub mod error;
pub mod path;
pub mod resolver;
pub mod resource;

pub use annotation::BindingAnnotation;
pub use error::CoreError;
pub use resolver::{Bindability, BindabilityResolver};
pub use resource::StructuredResource;
