//! Loading resource snapshots from manifest files.

use anyhow::{Context, Result};
use bindable_core::StructuredResource;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Every resource found in one manifest file.
pub struct Manifest {
    pub source: String,
    pub resources: Vec<StructuredResource>,
}

/// Read `path` (or stdin for `-`). `.json` files hold a single JSON document;
/// anything else is parsed as a YAML stream, which also accepts JSON.
pub fn load(path: &Path) -> Result<Manifest> {
    let source = path.display().to_string();
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", source))?
    };

    let documents = if path.extension().is_some_and(|ext| ext == "json") {
        vec![serde_json::from_str::<Value>(&text)
            .with_context(|| format!("{} is not valid JSON", source))?]
    } else {
        parse_yaml_stream(&text).with_context(|| format!("{} is not valid YAML", source))?
    };

    let mut resources = Vec::new();
    for document in documents {
        expand_document(document, &mut resources)
            .with_context(|| format!("unexpected document in {}", source))?;
    }
    debug!(source = %source, count = resources.len(), "loaded manifest");
    Ok(Manifest { source, resources })
}

/// Split a `---`-separated YAML stream into documents, dropping empty ones.
fn parse_yaml_stream(text: &str) -> Result<Vec<Value>> {
    let mut documents = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value = Value::deserialize(document)
            .with_context(|| format!("document {}", index + 1))?;
        if !value.is_null() {
            documents.push(value);
        }
    }
    Ok(documents)
}

/// Unwrap list containers (as printed by `kubectl get -o yaml`) into their
/// items. A document is a list only when its `kind` ends in `List` and it
/// carries an `items` sequence; any other mapping is a resource on its own.
fn expand_document(document: Value, out: &mut Vec<StructuredResource>) -> Result<()> {
    let is_list = document
        .get("kind")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.ends_with("List"))
        && document.get("items").is_some_and(Value::is_array);
    match document {
        Value::Object(mut map) if is_list => {
            if let Some(Value::Array(items)) = map.remove("items") {
                for item in items {
                    out.push(StructuredResource::from_value(item)?);
                }
            }
        }
        other => out.push(StructuredResource::from_value(other)?),
    }
    Ok(())
}
