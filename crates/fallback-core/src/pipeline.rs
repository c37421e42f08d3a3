//! Pipeline
//!
//! One forward pass: load manifest, normalize exports, write proxies, then
//! run whichever updaters were requested. Nothing is rolled back on failure.

use std::path::Path;

use tracing::{debug, info};

use crate::error::FallbackResult;
use crate::exports;
use crate::files;
use crate::gitignore;
use crate::manifest::PackageManifest;
use crate::proxy;
use crate::report::Report;

/// Which optional side effects to run after generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Add generated directories to `.gitignore`
    pub gitignore: bool,
    /// Add generated directories to `files` in `package.json`
    pub files: bool,
}

/// Run the generator against the package rooted at `root`.
///
/// `Ok(None)` means there was nothing to do: the manifest is not an object
/// or has no `exports` object.
pub fn run(root: &Path, options: Options) -> FallbackResult<Option<Report>> {
    let Some(mut manifest) = PackageManifest::load(root)? else {
        return Ok(None);
    };

    let normalized = {
        let Some(export_map) = manifest.exports() else {
            debug!("No `exports` object in {:?}, nothing to do", manifest.path());
            return Ok(None);
        };
        exports::normalize(&export_map)
    };

    for entry in &normalized.entries {
        proxy::write_proxy(root, entry)?;
    }
    info!(
        "Generated {} proxy manifests in {} directories",
        normalized.entries.len(),
        normalized.dirs.len()
    );

    let mut report = Report::new(normalized.dirs);

    if options.gitignore {
        report.gitignore = Some(gitignore::update(root, &report.generated)?);
    }

    if options.files {
        report.files = Some(files::update(&mut manifest, &report.generated)?);
    }

    Ok(Some(report))
}
