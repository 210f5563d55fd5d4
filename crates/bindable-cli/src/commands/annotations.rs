use anyhow::Result;
use bindable_core::{BindabilityResolver, BindingAnnotation};
use serde::Serialize;
use std::path::PathBuf;

use super::resource_label;
use crate::manifest;

#[derive(Serialize)]
struct AnnotationListing<'a> {
    file: &'a str,
    kind: Option<&'a str>,
    name: Option<&'a str>,
    annotations: Vec<BindingAnnotation<'a>>,
}

pub fn run(files: &[PathBuf], json: bool) -> Result<()> {
    let manifests = files
        .iter()
        .map(|path| manifest::load(path))
        .collect::<Result<Vec<_>>>()?;

    let mut listings = Vec::new();
    for m in &manifests {
        for resource in &m.resources {
            let annotations = BindabilityResolver::new(resource).binding_annotations();
            if json {
                listings.push(AnnotationListing {
                    file: &m.source,
                    kind: resource.kind(),
                    name: resource.name(),
                    annotations,
                });
                continue;
            }

            println!("{}", resource_label(resource));
            if annotations.is_empty() {
                println!("  (no binding annotations)");
            }
            for a in &annotations {
                println!("  {} = {}", a.key, a.value);
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
    }

    Ok(())
}
