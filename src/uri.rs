//! Virtual path scheme
//!
//! Every path served by this crate lives under the `repofs:` scheme so a host can tell
//! repository paths apart from local ones. Paths after the scheme are POSIX-style.

use crate::error::FsError;

/// URI scheme for repository paths
pub const SCHEME: &str = "repofs";

/// Render a POSIX path as a virtual URI (`repofs:/a/b`).
pub fn to_uri(path: &str) -> String {
    if path.starts_with('/') {
        format!("{}:{}", SCHEME, path)
    } else {
        format!("{}:/{}", SCHEME, path)
    }
}

/// Accept a `repofs:` URI or a bare POSIX path and return the POSIX path.
pub fn from_uri(uri: &str) -> Result<String, FsError> {
    let Some((scheme, rest)) = split_scheme(uri) else {
        return Ok(ensure_rooted(uri));
    };
    if scheme != SCHEME {
        return Err(FsError::NotFound(uri.to_string()));
    }
    // Tolerate the authority form `repofs:///a/b`
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    Ok(ensure_rooted(rest))
}

fn split_scheme(uri: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = uri.split_once(':')?;
    let valid = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some((scheme, rest))
}

fn ensure_rooted(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
