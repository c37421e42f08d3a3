//! Error Types
//!
//! Everything that can abort a run. Soft no-ops (no `exports`, falsy manifest)
//! are not errors and never show up here.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FallbackError {
    #[error("`package.json` is not found in {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Failed to parse {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`files` in package.json must be an array, found {0}")]
    InvalidFilesField(&'static str),

    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type used across the pipeline
pub type FallbackResult<T> = Result<T, FallbackError>;

/// Short JSON type name for error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
