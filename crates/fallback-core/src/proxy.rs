//! Proxy Directory Generator
//!
//! Writes `<export path>/package.json` for each accepted export, pointing
//! `main`/`module`/`types`/`typings` back at the real build output.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{FallbackError, FallbackResult};
use crate::exports::ExportEntry;
use crate::manifest::MANIFEST_FILE;
use crate::paths;

/// Minimal manifest understood by resolvers that predate `exports`.
///
/// Absent fields are omitted rather than written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProxyManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typings: Option<String>,
}

impl ProxyManifest {
    /// Re-express the entry's root-relative targets relative to the proxy directory
    pub fn for_entry(entry: &ExportEntry) -> Self {
        let prefix = paths::parent_prefix(entry.depth);
        let relocate = |target: Option<&str>| target.map(|t| paths::join(&prefix, t));
        let c = &entry.conditions;

        Self {
            main: relocate(c.require.as_deref()),
            module: relocate(c.import.as_deref()),
            types: relocate(c.types_or_typings()),
            typings: relocate(c.typings_or_types()),
        }
    }

    pub fn to_pretty_string(&self) -> FallbackResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Create the proxy directory for `entry` under `root` and write its manifest.
///
/// An existing proxy manifest is overwritten.
pub fn write_proxy(root: &Path, entry: &ExportEntry) -> FallbackResult<PathBuf> {
    let dir = root.join(&entry.export_path);
    fs::create_dir_all(&dir).map_err(|source| FallbackError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let path = dir.join(MANIFEST_FILE);
    let content = ProxyManifest::for_entry(entry).to_pretty_string()?;
    fs::write(&path, content).map_err(|source| FallbackError::Write {
        path: path.clone(),
        source,
    })?;

    debug!("Wrote proxy manifest {:?}", path);
    Ok(path)
}
