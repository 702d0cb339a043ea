//! Path exclusion matching
//!
//! Decides whether a filesystem path should be hidden from traversal and
//! summarization, given the configured list of exclusion patterns.

use std::path::Path;

/// Check whether `path` matches any of the exclusion `patterns`.
///
/// A pattern matches when any of these hold:
/// - it equals the path's final component (base name),
/// - it occurs as a literal substring of the full path string,
/// - interpreted as a path, it equals the candidate path, or
/// - interpreted as a path, it equals an ancestor directory of the candidate.
///
/// The substring rule is deliberately broad: excluding `env` also hides
/// `environment.py`. That looseness is observable, documented behavior.
pub fn should_exclude(path: &Path, patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy();
    let base_name = path.file_name().map(|n| n.to_string_lossy());

    patterns.iter().any(|pattern| {
        if base_name.as_deref() == Some(pattern.as_str()) {
            return true;
        }
        if path_str.contains(pattern.as_str()) {
            return true;
        }
        let pattern_path = Path::new(pattern);
        if pattern_path == path {
            return true;
        }
        // ancestors() yields the path itself first; skip to its parents
        path.ancestors().skip(1).any(|parent| parent == pattern_path)
    })
}
