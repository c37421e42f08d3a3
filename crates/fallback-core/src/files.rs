//! Files-List Updater
//!
//! Adds generated directory names to the manifest's `files` allow-list so
//! they are included when the package is published.

use serde_json::{Map, Value};
use tracing::info;

use crate::error::{json_kind, FallbackError, FallbackResult};
use crate::exports::GeneratedDirs;
use crate::manifest::PackageManifest;
use crate::report::UpdateOutcome;

const FILES_FIELD: &str = "files";

/// Strip one leading `./` (or else one leading `/`) and one trailing `/`
pub fn normalize_entry(entry: &str) -> &str {
    let entry = entry
        .strip_prefix("./")
        .or_else(|| entry.strip_prefix('/'))
        .unwrap_or(entry);
    entry.strip_suffix('/').unwrap_or(entry)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Merge `dirs` into the `files` field of `fields`, in place.
///
/// A missing (or falsy) field becomes the full directory list. An existing
/// array only grows; its entries keep their original spelling and order.
pub fn merge(fields: &mut Map<String, Value>, dirs: &GeneratedDirs) -> FallbackResult<UpdateOutcome> {
    let generated = || dirs.iter().map(|d| Value::String(d.to_string()));

    let files = match fields.get_mut(FILES_FIELD) {
        Some(Value::Array(files)) => files,
        Some(other) if !is_falsy(other) => {
            return Err(FallbackError::InvalidFilesField(json_kind(other)));
        }
        _ => {
            fields.insert(FILES_FIELD.to_string(), Value::Array(generated().collect()));
            return Ok(UpdateOutcome::Created);
        }
    };

    let missing: Vec<String> = dirs
        .iter()
        .filter(|dir| {
            !files
                .iter()
                .filter_map(Value::as_str)
                .any(|entry| normalize_entry(entry) == *dir)
        })
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        return Ok(UpdateOutcome::Unchanged);
    }

    files.extend(missing.iter().cloned().map(Value::String));
    Ok(UpdateOutcome::Appended(missing))
}

/// Apply [`merge`] to the loaded manifest and rewrite it when it changed
pub fn update(manifest: &mut PackageManifest, dirs: &GeneratedDirs) -> FallbackResult<UpdateOutcome> {
    let outcome = merge(manifest.fields_mut(), dirs)?;
    if outcome.is_changed() {
        manifest.save()?;
        info!("Updated `files` in {:?}: {:?}", manifest.path(), outcome);
    }
    Ok(outcome)
}
