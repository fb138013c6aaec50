//! Path splitting and normalization utilities
//!
//! Tree paths are POSIX-style, rooted at `/`. Empty segments are ignored, so
//! `/a//b/` and `/a/b` name the same node.

/// Split a path into its non-empty segments
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Normalize a path string: collapse repeated slashes, drop trailing slashes,
/// and guarantee a leading `/`.
pub fn normalize_path_string(path: &str) -> String {
    let mut result = String::with_capacity(path.len() + 1);
    for segment in segments(path) {
        result.push('/');
        result.push_str(segment);
    }
    if result.is_empty() {
        result.push('/');
    }
    result
}

/// Directory component of a path (`/` for top-level entries and the root itself)
pub fn dirname(path: &str) -> String {
    let normalized = normalize_path_string(path);
    match normalized.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => normalized[..idx].to_string(),
    }
}

/// Final segment of a path (empty for the root)
pub fn basename(path: &str) -> &str {
    segments(path).last().unwrap_or("")
}

/// Join a child name onto a parent path
pub fn join(parent: &str, name: &str) -> String {
    let parent = normalize_path_string(parent);
    if parent == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Turn a path reported by the contents API into a tree path.
///
/// Listed paths are repository-relative and occasionally carry a `./` prefix.
pub fn normalize_remote_path(path: &str) -> String {
    let trimmed = path.strip_prefix("./").unwrap_or(path);
    normalize_path_string(trimmed)
}
