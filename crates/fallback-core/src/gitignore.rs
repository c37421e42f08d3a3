//! Ignore-File Updater
//!
//! Adds generated directory names to `.gitignore`, one rule per line.
//! Existing rules are never removed or reordered.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{FallbackError, FallbackResult};
use crate::exports::GeneratedDirs;
use crate::report::UpdateOutcome;

pub const IGNORE_FILE: &str = ".gitignore";

/// Result of merging generated dirs into ignore-file content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreMerge {
    /// New file content, `None` when nothing needs writing
    pub content: Option<String>,
    pub outcome: UpdateOutcome,
}

/// Merge `dirs` into the current ignore-file content (`None` if the file is absent)
pub fn merge(existing: Option<&str>, dirs: &GeneratedDirs) -> IgnoreMerge {
    let Some(existing) = existing else {
        return IgnoreMerge {
            content: Some(with_trailing_newline(dirs.iter())),
            outcome: UpdateOutcome::Created,
        };
    };

    // Editors on Windows may prefix a byte-order mark
    let trimmed = existing.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let lines: Vec<&str> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect()
    };

    let missing: Vec<String> = dirs
        .iter()
        .filter(|dir| !lines.contains(dir))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        return IgnoreMerge {
            content: None,
            outcome: UpdateOutcome::Unchanged,
        };
    }

    let content = with_trailing_newline(
        lines
            .iter()
            .copied()
            .chain(missing.iter().map(String::as_str)),
    );
    IgnoreMerge {
        content: Some(content),
        outcome: UpdateOutcome::Appended(missing),
    }
}

fn with_trailing_newline<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut out = lines.collect::<Vec<_>>().join("\n");
    out.push('\n');
    out
}

/// Apply [`merge`] to `<root>/.gitignore`
pub fn update(root: &Path, dirs: &GeneratedDirs) -> FallbackResult<UpdateOutcome> {
    let path = root.join(IGNORE_FILE);

    let existing = if path.exists() {
        Some(fs::read_to_string(&path).map_err(|source| FallbackError::Read {
            path: path.clone(),
            source,
        })?)
    } else {
        None
    };

    let merged = merge(existing.as_deref(), dirs);

    if let Some(content) = merged.content {
        fs::write(&path, content).map_err(|source| FallbackError::Write {
            path: path.clone(),
            source,
        })?;
        info!("Updated {:?}: {:?}", path, merged.outcome);
    }

    Ok(merged.outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs(names: &[&str]) -> GeneratedDirs {
        names.iter().copied().collect()
    }

    #[test]
    fn test_absent_file_is_created() {
        let m = merge(None, &dirs(&["utils", "fs"]));
        assert_eq!(m.outcome, UpdateOutcome::Created);
        assert_eq!(m.content.as_deref(), Some("utils\nfs\n"));
    }

    #[test]
    fn test_absent_file_with_no_dirs() {
        let m = merge(None, &GeneratedDirs::default());
        assert_eq!(m.content.as_deref(), Some("\n"));
    }

    #[test]
    fn test_appends_only_missing() {
        let m = merge(Some("node_modules\nutils\n"), &dirs(&["utils", "fs"]));
        assert_eq!(m.outcome, UpdateOutcome::Appended(vec!["fs".to_string()]));
        assert_eq!(m.content.as_deref(), Some("node_modules\nutils\nfs\n"));
    }

    #[test]
    fn test_crlf_lines_match() {
        let m = merge(Some("dist\r\nutils\r\n"), &dirs(&["utils"]));
        assert_eq!(m.outcome, UpdateOutcome::Unchanged);
        assert_eq!(m.content, None);
    }

    #[test]
    fn test_blank_file_has_no_lines() {
        let m = merge(Some("  \n\n"), &dirs(&["a"]));
        assert_eq!(m.content.as_deref(), Some("a\n"));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let m = merge(Some("\u{feff}a\n"), &dirs(&["a"]));
        assert_eq!(m.outcome, UpdateOutcome::Unchanged);

        let m = merge(Some("\u{feff}a\n"), &dirs(&["a", "b"]));
        assert_eq!(m.content.as_deref(), Some("a\nb\n"));
    }

    #[test]
    fn test_match_is_exact() {
        let m = merge(Some("/utils\nutils/\n"), &dirs(&["utils"]));
        assert_eq!(m.outcome, UpdateOutcome::Appended(vec!["utils".to_string()]));
    }

    #[test]
    fn test_second_merge_is_unchanged() {
        let d = dirs(&["a", "b"]);
        let first = merge(Some("dist"), &d);
        let second = merge(first.content.as_deref(), &d);
        assert_eq!(second.outcome, UpdateOutcome::Unchanged);
    }
}
