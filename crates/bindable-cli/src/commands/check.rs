use anyhow::Result;
use bindable_core::{Bindability, BindabilityResolver};
use serde::Serialize;
use std::path::PathBuf;

use super::resource_label;
use crate::manifest;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    file: &'a str,
    kind: Option<&'a str>,
    api_version: Option<&'a str>,
    name: Option<&'a str>,
    bindable: bool,
    #[serde(flatten)]
    outcome: Bindability,
}

/// Print the bindability of every resource in `files`. Returns whether at
/// least one resource was checked and all of them were bindable.
pub fn run(files: &[PathBuf], json: bool) -> Result<bool> {
    let manifests = files
        .iter()
        .map(|path| manifest::load(path))
        .collect::<Result<Vec<_>>>()?;

    let mut reports = Vec::new();
    let mut all_bindable = true;
    let mut checked = 0usize;
    for m in &manifests {
        if m.resources.is_empty() && !json {
            println!("No resources in {}", m.source);
        }
        for resource in &m.resources {
            let outcome = BindabilityResolver::new(resource).resolve();
            all_bindable &= outcome.is_bindable();
            checked += 1;

            if json {
                reports.push(Report {
                    file: &m.source,
                    kind: resource.kind(),
                    api_version: resource.api_version(),
                    name: resource.name(),
                    bindable: outcome.is_bindable(),
                    outcome,
                });
            } else if outcome.is_bindable() {
                println!("BINDABLE      {}  ({})", resource_label(resource), outcome);
            } else {
                println!("NOT BINDABLE  {}", resource_label(resource));
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(checked > 0 && all_bindable)
}
