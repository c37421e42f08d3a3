//! Export Path Normalizer
//!
//! Picks the `exports` keys that name a sub-path of the package and turns each
//! one into an [`ExportEntry`] with its condition targets and depth.

use serde_json::{Map, Value};
use tracing::{debug, warn};

/// First segment every sub-path export key must start with
pub const SELF_REFERENCE: &str = ".";

/// Condition names that can appear as top-level keys of a sugared exports map
const RESERVED_CONDITIONS: [&str; 2] = ["import", "require"];

/// Condition targets of one export entry.
///
/// Only non-empty strings are kept; anything else counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    pub require: Option<String>,
    pub import: Option<String>,
    pub types: Option<String>,
    pub typings: Option<String>,
}

impl Conditions {
    /// Normalize an export value. A bare string is a `require`-only target.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(target) => Self {
                require: non_empty(Some(target.as_str())),
                ..Self::default()
            },
            Value::Object(map) => {
                let get = |name: &str| non_empty(map.get(name).and_then(Value::as_str));
                Self {
                    require: get("require"),
                    import: get("import"),
                    types: get("types"),
                    typings: get("typings"),
                }
            }
            _ => Self::default(),
        }
    }

    /// Declaration target, preferring `types` over `typings`
    pub fn types_or_typings(&self) -> Option<&str> {
        self.types.as_deref().or(self.typings.as_deref())
    }

    /// Declaration target, preferring `typings` over `types`
    pub fn typings_or_types(&self) -> Option<&str> {
        self.typings.as_deref().or(self.types.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// An accepted sub-path export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    /// Key as written in the manifest, e.g. `./utils/fs`
    pub export_path: String,
    pub conditions: Conditions,
    /// Number of segments below the package root
    pub depth: usize,
}

/// Unique directory names in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedDirs(Vec<String>);

impl GeneratedDirs {
    /// Add a name; returns `false` if it was already present
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|d| d == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for GeneratedDirs {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dirs = Self::default();
        for name in iter {
            dirs.insert(name);
        }
        dirs
    }
}

/// Output of [`normalize`]
#[derive(Debug, Clone, Default)]
pub struct NormalizedExports {
    pub entries: Vec<ExportEntry>,
    pub dirs: GeneratedDirs,
    /// Keys rejected because they do not start with `./`
    pub invalid: Vec<String>,
}

enum KeyKind<'a> {
    Ignored,
    Invalid,
    RootOnly,
    SubPath { dir_name: &'a str, depth: usize },
}

fn classify(key: &str) -> KeyKind<'_> {
    if key.contains('*') || RESERVED_CONDITIONS.contains(&key) {
        return KeyKind::Ignored;
    }

    let segments: Vec<&str> = key.split('/').collect();

    if segments[0] != SELF_REFERENCE {
        return KeyKind::Invalid;
    }

    // "." is the package itself. "./" is skipped on purpose: its proxy would
    // be written over the root package.json.
    match segments.get(1) {
        None | Some(&"") => KeyKind::RootOnly,
        Some(&dir_name) => KeyKind::SubPath {
            dir_name,
            depth: segments.len() - 1,
        },
    }
}

/// Filter and normalize an `exports` map, in key order
pub fn normalize(exports: &Map<String, Value>) -> NormalizedExports {
    let mut out = NormalizedExports::default();

    for (key, value) in exports {
        match classify(key) {
            KeyKind::Ignored => debug!("Skipping export key {:?}", key),
            KeyKind::RootOnly => debug!("Skipping root export {:?}", key),
            KeyKind::Invalid => {
                warn!("Invalid export path: \"{}\"", key);
                out.invalid.push(key.clone());
            }
            KeyKind::SubPath { dir_name, depth } => {
                out.dirs.insert(dir_name);
                out.entries.push(ExportEntry {
                    export_path: key.clone(),
                    conditions: Conditions::from_value(value),
                    depth,
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn exports(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_root_entry_is_skipped() {
        let out = normalize(&exports(json!({
            ".": "./index.js",
            "./utils": {"require": "./utils/index.js", "import": "./utils/index.mjs"}
        })));

        assert_eq!(out.entries.len(), 1);
        assert_eq!(out.dirs.as_slice(), ["utils"]);
        assert!(out.invalid.is_empty());

        let entry = &out.entries[0];
        assert_eq!(entry.export_path, "./utils");
        assert_eq!(entry.depth, 1);
        assert_eq!(entry.conditions.require.as_deref(), Some("./utils/index.js"));
        assert_eq!(entry.conditions.import.as_deref(), Some("./utils/index.mjs"));
    }

    #[test]
    fn test_wildcard_and_reserved_keys_are_silent() {
        let out = normalize(&exports(json!({
            "./*": "./dist/*.js",
            "./features/*": "./dist/features/*.js",
            "import": "./index.mjs",
            "require": "./index.js"
        })));

        assert!(out.entries.is_empty());
        assert!(out.dirs.is_empty());
        assert!(out.invalid.is_empty());
    }

    #[test]
    fn test_invalid_key_is_reported() {
        let out = normalize(&exports(json!({
            "bad/path": "./bad.js",
            "types": "./index.d.ts",
            "./ok": "./ok.js"
        })));

        assert_eq!(out.invalid, vec!["bad/path".to_string(), "types".to_string()]);
        assert_eq!(out.dirs.as_slice(), ["ok"]);
    }

    #[test]
    fn test_trailing_slash_root_is_skipped() {
        let out = normalize(&exports(json!({"./": "./index.js"})));
        assert!(out.entries.is_empty());
        assert!(out.invalid.is_empty());
    }

    #[test]
    fn test_depth_and_shared_dir() {
        let out = normalize(&exports(json!({
            "./a/b/c": "./dist/a/b/c.js",
            "./a": "./dist/a.js",
            "./b": "./dist/b.js"
        })));

        let depths: Vec<usize> = out.entries.iter().map(|e| e.depth).collect();
        assert_eq!(depths, vec![3, 1, 1]);
        assert_eq!(out.dirs.as_slice(), ["a", "b"]);
    }

    #[test]
    fn test_string_value_is_require() {
        let c = Conditions::from_value(&json!("./x.js"));
        assert_eq!(
            c,
            Conditions {
                require: Some("./x.js".into()),
                ..Conditions::default()
            }
        );
    }

    #[test]
    fn test_empty_and_nested_conditions_are_absent() {
        let c = Conditions::from_value(&json!({
            "require": "",
            "import": {"default": "./x.mjs"},
            "typings": "./x.d.ts"
        }));
        assert_eq!(c.require, None);
        assert_eq!(c.import, None);
        assert_eq!(c.types_or_typings(), Some("./x.d.ts"));
        assert_eq!(c.typings_or_types(), Some("./x.d.ts"));
    }

    #[test]
    fn test_non_object_value_has_no_conditions() {
        assert_eq!(Conditions::from_value(&Value::Null), Conditions::default());
        assert_eq!(Conditions::from_value(&json!(["./a.js"])), Conditions::default());
    }

    #[test]
    fn test_generated_dirs_dedup_keeps_first_order() {
        let dirs: GeneratedDirs = ["b", "a", "b"].into_iter().collect();
        assert_eq!(dirs.as_slice(), ["b", "a"]);
        assert_eq!(dirs.len(), 2);
        assert!(dirs.contains("a"));
    }
}
