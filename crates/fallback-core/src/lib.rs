//! Legacy proxy generation for `package.json` exports.
//!
//! Resolvers that predate the `exports` field look for `<subpath>/package.json`.
//! This crate writes those proxy manifests and can register the generated
//! directories in `.gitignore` and in the manifest's `files` list.

pub mod error;
pub mod exports;
pub mod files;
pub mod gitignore;
pub mod manifest;
pub mod paths;
pub mod pipeline;
pub mod proxy;
pub mod report;

pub use error::{FallbackError, FallbackResult};
pub use exports::{normalize, Conditions, ExportEntry, GeneratedDirs, NormalizedExports};
pub use manifest::{PackageManifest, MANIFEST_FILE};
pub use pipeline::{run, Options};
pub use proxy::ProxyManifest;
pub use report::{Report, UpdateOutcome};
