//! Segment-wise path matching.
//!
//! Patterns are slash-delimited; a segment starting with `:` binds the
//! corresponding request segment under the name that follows the colon.
//! Everything else is compared byte for byte.

use smallvec::SmallVec;

use crate::params::Params;

/// Prefix marking a parameter segment in a route pattern.
pub const PARAM_PREFIX: char = ':';

type Segments<'a> = SmallVec<[&'a str; 8]>;

/// Matches a request path against a route pattern.
///
/// Returns the extracted parameters on success and `None` on mismatch.
/// Leading and trailing slashes are ignored on both sides and segment counts
/// must be equal; there is no prefix matching.
///
/// # Example
///
/// ```rust
/// use rou_router::match_path;
///
/// let params = match_path("/users/:id/friends/:name", "/users/10/friends/melony").unwrap();
/// assert_eq!(params.get("id"), Some("10"));
/// assert_eq!(params.get("name"), Some("melony"));
///
/// assert!(match_path("/users/:id", "/users/10/friends").is_none());
/// ```
#[must_use]
pub fn match_path(pattern: &str, path: &str) -> Option<Params> {
    if pattern == path {
        return Some(Params::new());
    }

    let pattern_segments = split_segments(pattern);
    let path_segments = split_segments(path);

    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = Params::new();
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        if let Some(name) = expected.strip_prefix(PARAM_PREFIX) {
            params.set(name, *actual);
        } else if expected != actual {
            return None;
        }
    }

    Some(params)
}

/// Splits a path into segments after trimming surrounding slashes.
///
/// An empty (or all-slash) path yields a single empty segment.
fn split_segments(path: &str) -> Segments<'_> {
    path.trim_matches('/').split('/').collect()
}
