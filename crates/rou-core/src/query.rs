//! Query-string access.

use serde::de::DeserializeOwned;

use crate::error::{RouError, RouResult};

/// Decoded query-string parameters.
///
/// Keys may repeat; [`get`](Self::get) returns the first value and
/// [`get_all`](Self::get_all) every value in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a raw query string (without the leading `?`).
    ///
    /// Malformed pairs decode leniently, the same way browsers submit forms.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs = raw
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| serde_urlencoded::from_str(raw).ok())
            .unwrap_or_default();
        Self { pairs }
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for `key`.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if `key` appears at least once.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Iterates over all pairs in order of appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the query string was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Decodes the query string into a typed value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> RouResult<T> {
        let encoded = serde_urlencoded::to_string(&self.pairs)
            .map_err(|e| RouError::internal(e.to_string()))?;
        serde_urlencoded::from_str(&encoded)
            .map_err(|e| RouError::status(http::StatusCode::BAD_REQUEST, e.to_string()))
    }
}
