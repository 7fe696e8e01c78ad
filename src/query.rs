//! Query string codec
//!
//! Splits a resolved query such as `projects?is_active=true&page=2` into its
//! path and parameters, and serializes parameters back into a canonical,
//! key-sorted query string so equal parameter sets always yield equal URLs.

use crate::error::{Error, Result};
use url::form_urlencoded;

/// Ordered mapping of query parameter name to value with unique keys
///
/// Equality ignores insertion order.
#[derive(Debug, Clone, Default, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, overwriting an existing value in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Insert a parameter, failing if the key is already present
    pub fn try_insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if self.contains_key(&key) {
            return Err(Error::duplicate(key));
        }
        self.pairs.push((key, value.into()));
        Ok(())
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a parameter, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(idx).1)
    }

    /// Whether a parameter is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs sorted by key
    fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

impl PartialEq for QueryParams {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// A resolved query split into path and parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Everything before the first `?`
    pub path: String,
    /// Decoded parameters
    pub params: QueryParams,
}

/// Parse a resolved query string
///
/// Keys and values are form-decoded and trimmed. A key without `=` gets an
/// empty value. A key that appears twice is an error.
pub fn parse_query(raw: &str) -> Result<ParsedQuery> {
    let (path, query) = match raw.split_once('?') {
        Some((path, query)) => (path, query),
        None => (raw, ""),
    };

    let mut params = QueryParams::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        params.try_insert(key, value.trim())?;
    }

    Ok(ParsedQuery {
        path: path.trim().to_string(),
        params,
    })
}

/// Serialize parameters into a canonical query string (no leading `?`)
pub fn serialize_query(params: &QueryParams) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.sorted())
        .finish()
}
