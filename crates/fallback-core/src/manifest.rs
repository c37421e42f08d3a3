//! Manifest Loader
//!
//! Reads `package.json` from the package root and keeps it as an ordered JSON
//! object so it can be written back with its key order intact.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{json_kind, FallbackError, FallbackResult};

/// File name of the package manifest, both at the root and inside proxies
pub const MANIFEST_FILE: &str = "package.json";

/// Parsed root manifest
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl PackageManifest {
    pub fn new(path: impl Into<PathBuf>, fields: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    /// Load `package.json` from `root`.
    ///
    /// Returns `Ok(None)` when the file parses to anything other than a JSON
    /// object. There is nothing to generate from such a manifest.
    pub fn load(root: &Path) -> FallbackResult<Option<Self>> {
        let path = root.join(MANIFEST_FILE);

        if !path.exists() {
            return Err(FallbackError::ManifestNotFound(root.to_path_buf()));
        }

        let content = fs::read_to_string(&path).map_err(|source| FallbackError::Read {
            path: path.clone(),
            source,
        })?;

        let value: Value =
            serde_json::from_str(&content).map_err(|source| FallbackError::ManifestParse {
                path: path.clone(),
                source,
            })?;

        match value {
            Value::Object(fields) => {
                info!("Loaded manifest {:?} ({} fields)", path, fields.len());
                Ok(Some(Self { path, fields }))
            }
            other => {
                debug!(
                    "Manifest {:?} is {}, not an object; nothing to do",
                    path,
                    json_kind(&other)
                );
                Ok(None)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.fields
    }

    /// The `exports` map, if it is present and is an object.
    ///
    /// An array is walked by index, so every element surfaces as an invalid
    /// export path (`"0"`, `"1"`, ...) instead of being ignored.
    pub fn exports(&self) -> Option<Cow<'_, Map<String, Value>>> {
        match self.fields.get("exports")? {
            Value::Object(map) => Some(Cow::Borrowed(map)),
            Value::Array(items) => Some(Cow::Owned(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v.clone()))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Serialize the manifest the same way it is written to disk
    pub fn to_pretty_string(&self) -> FallbackResult<String> {
        Ok(serde_json::to_string_pretty(&self.fields)?)
    }

    /// Rewrite the manifest file in place
    pub fn save(&self) -> FallbackResult<()> {
        let content = self.to_pretty_string()?;
        fs::write(&self.path, content).map_err(|source| FallbackError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Rewrote {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(value: Value) -> PackageManifest {
        let Value::Object(fields) = value else {
            panic!("fixture must be an object");
        };
        PackageManifest::new("package.json", fields)
    }

    #[test]
    fn test_exports_requires_object() {
        assert!(manifest(json!({"exports": {"./a": "./a.js"}})).exports().is_some());
        assert!(manifest(json!({"exports": "./index.js"})).exports().is_none());
        assert!(manifest(json!({"exports": null})).exports().is_none());
        assert!(manifest(json!({"name": "pkg"})).exports().is_none());
    }

    #[test]
    fn test_array_exports_are_keyed_by_index() {
        let m = manifest(json!({"exports": ["./a.js", "./b.js"]}));
        let exports = m.exports().unwrap();
        let keys: Vec<&str> = exports.keys().map(String::as_str).collect();
        assert_eq!(keys, ["0", "1"]);
    }

    #[test]
    fn test_pretty_string_keeps_key_order() {
        let m = manifest(json!({"name": "pkg", "exports": {}, "version": "1.0.0"}));
        let out = m.to_pretty_string().unwrap();
        let name = out.find("\"name\"").unwrap();
        let exports = out.find("\"exports\"").unwrap();
        let version = out.find("\"version\"").unwrap();
        assert!(name < exports && exports < version);
        assert!(!out.ends_with('\n'));
    }
}
