pub mod annotations;
pub mod check;

use bindable_core::StructuredResource;

/// `Kind/name` label for human-readable output.
pub(crate) fn resource_label(resource: &StructuredResource) -> String {
    format!(
        "{}/{}",
        resource.kind().unwrap_or("<unknown kind>"),
        resource.name().unwrap_or("<unnamed>")
    )
}
