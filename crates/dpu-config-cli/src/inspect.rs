//! Helpers behind the CLI subcommands.

use anyhow::{bail, Context, Result};
use dpu_config::{FragmentRegistry, TypeDescriptor};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Read the whole input, treating `-` as stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// One line per fragment: name, then the fragment's tag or `<absent>`.
pub fn list_fragments(blob: &str) -> Result<Vec<String>> {
    let registry = FragmentRegistry::deserialize_all(blob)?;

    let lines = registry
        .names()
        .map(|name| {
            let tag = registry
                .raw(name)
                .map(|raw| leading_tag(raw).unwrap_or_else(|| "<unreadable>".to_string()))
                .unwrap_or_else(|| "<absent>".to_string());
            format!("{}\t{}", name, tag)
        })
        .collect();

    Ok(lines)
}

/// Tag of a single-fragment blob, if it parses as one.
fn leading_tag(raw: &str) -> Option<String> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::Object(map) if map.len() == 1 => map.keys().next().cloned(),
        _ => None,
    }
}

/// Build a descriptor from a `::`-separated type path.
pub fn descriptor_for(path: &str, nested: bool) -> Result<TypeDescriptor> {
    let descriptor = TypeDescriptor::from_type_name(path)
        .with_context(|| format!("Not a plain type path: {}", path))?;

    if !nested {
        return Ok(descriptor);
    }

    let (module, outer) = match descriptor.module().rsplit_once("::") {
        Some((module, outer)) => (module, outer),
        None => ("", descriptor.module()),
    };
    if outer.is_empty() {
        bail!("--nested needs an enclosing type in {}", path);
    }

    Ok(TypeDescriptor::nested(module, &[outer], descriptor.name()))
}
