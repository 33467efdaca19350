//! Reference classification and lexical path resolution.

use std::path::{Path, PathBuf};

/// Whether `reference` can be resolved against the including document.
///
/// Absolute paths, Windows drive paths, and URL-style references cannot.
#[must_use]
pub fn is_relative_reference(reference: &str) -> bool {
    if reference.starts_with('/') || reference.starts_with('\\') {
        return false;
    }
    // Windows drive path, e.g. `C:\include.md`
    let bytes = reference.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return false;
    }
    !reference.contains("://")
}

/// Resolve `reference` against the directory containing `base_file`.
///
/// Purely lexical: `.` and `..` segments are folded without touching the
/// filesystem, and `..` never climbs above an empty base. The same
/// reference resolved from the same file therefore always yields the same
/// path, which is what the cycle check compares.
#[must_use]
pub fn resolve_relative(reference: &str, base_file: Option<&Path>) -> PathBuf {
    let base = base_file.and_then(Path::parent).map(|p| p.to_string_lossy());
    let base = base.as_deref().unwrap_or("");
    let rooted = base.starts_with('/');
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for component in reference.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if rooted {
        PathBuf::from(format!("/{joined}"))
    } else {
        PathBuf::from(joined)
    }
}

/// Split a `path#fragment` reference into its path and optional fragment.
#[must_use]
pub fn split_fragment(reference: &str) -> (&str, Option<&str>) {
    match reference.split_once('#') {
        None => (reference, None),
        Some((path, "")) => (path, None),
        Some((path, fragment)) => (path, Some(fragment)),
    }
}
