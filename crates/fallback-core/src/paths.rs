//! Path Utilities
//!
//! Forward-slash path arithmetic for the relative targets written into proxy
//! manifests. These are package paths, not host paths, so `std::path` is not
//! used here.

/// `depth` parent hops joined with `/`, e.g. `../..` for depth 2
pub fn parent_prefix(depth: usize) -> String {
    vec![".."; depth].join("/")
}

/// Join two relative paths and normalize the result.
///
/// # Example
/// ```ignore
/// assert_eq!(join("../..", "./utils/index.js"), "../../utils/index.js");
/// ```
pub fn join(base: &str, path: &str) -> String {
    let joined = match (base.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, path),
    };
    normalize(&joined)
}

/// Collapse `.`, `..` and repeated separators. Keeps a trailing `/`.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with('/');
    let trailing = path.ends_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let mut out = segments.join("/");
    if absolute {
        out.insert(0, '/');
    }
    if out.is_empty() {
        out.push('.');
    }
    if trailing && !out.ends_with('/') {
        out.push('/');
    }
    out
}
