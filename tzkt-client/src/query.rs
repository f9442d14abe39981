//! Flat query-string parameters in the indexer dialect.
//!
//! Keys are sent as-is: `timestamp.ge`, `parameter.[*].txs.[*].to_` and the
//! like are single key names, not nested structures.

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

/// Escaped in keys and values. Unreserved characters stay literal, and so do
/// the indexer's path and list syntax (`[`, `]`, `*`, `,`) and the `:` of
/// ISO 8601 timestamps.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'[')
    .remove(b']')
    .remove(b'*')
    .remove(b',')
    .remove(b':');

/// A primitive query-string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Text value.
    Str(String),
    /// Integer value.
    Int(i64),
    /// Boolean value, rendered as `true` / `false`.
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Str(value.to_string()), Self::Int)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered set of indexer query parameters, built fresh for every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString(BTreeMap<String, QueryValue>);

impl QueryString {
    /// Creates an empty query string.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Sets `key` only when `value` is present; absent values leave no key.
    pub fn insert_opt<V: Into<QueryValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.0.remove(key)
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// Rendered value stored under `key`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }

    /// Returns `true` if `key` is set.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Appends every parameter to the query of `url`.
    ///
    /// `&`, `=`, `+`, `#` and `%` inside a key or value are escaped.
    pub fn apply_to(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }
        let mut query = url.query().unwrap_or_default().to_owned();
        for (key, value) in self.iter() {
            if !query.is_empty() {
                query.push('&');
            }
            query.extend(utf8_percent_encode(key, COMPONENT));
            query.push('=');
            query.extend(utf8_percent_encode(&value.to_string(), COMPONENT));
        }
        url.set_query(Some(&query));
    }
}

impl Extend<(String, QueryValue)> for QueryString {
    fn extend<T: IntoIterator<Item = (String, QueryValue)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for QueryString {
    type Item = (String, QueryValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryString {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_opt_skips_absent_values() {
        let mut query = QueryString::new();
        query
            .insert_opt("limit", Some(20_u32))
            .insert_opt::<&str>("timestamp.lt", None);
        assert_eq!(query.len(), 1);
        assert!(!query.contains_key("timestamp.lt"));
        assert_eq!(query.get("limit"), Some(&QueryValue::Int(20)));
    }

    #[test]
    fn values_render_as_primitives() {
        assert_eq!(QueryValue::from(true).to_string(), "true");
        assert_eq!(QueryValue::from(-3_i32).to_string(), "-3");
        assert_eq!(QueryValue::from(u64::MAX).to_string(), u64::MAX.to_string());
    }

    #[test]
    fn apply_to_keeps_dotted_keys() {
        let mut url = Url::parse("https://api.tzkt.io/v1/operations/transactions").expect("url");
        let query: QueryString = [("sender.ne", "tz1a"), ("entrypoint", "transfer")]
            .into_iter()
            .collect();
        query.apply_to(&mut url);
        assert_eq!(url.query(), Some("entrypoint=transfer&sender.ne=tz1a"));
    }

    #[test]
    fn apply_to_sends_indexer_syntax_literally() {
        let mut url = Url::parse("https://api.tzkt.io/v1/operations/transactions").expect("url");
        let mut query = QueryString::new();
        query
            .insert("parameter.[*].txs.[*].to_", "tz1a")
            .insert("type", "transaction,delegation")
            .insert("timestamp.ge", "2022-06-01T00:00:00Z");
        query.apply_to(&mut url);
        assert_eq!(
            url.query(),
            Some(
                "parameter.[*].txs.[*].to_=tz1a&timestamp.ge=2022-06-01T00:00:00Z\
                 &type=transaction,delegation"
            )
        );
    }

    #[test]
    fn apply_to_escapes_separators() {
        let mut url = Url::parse("https://api.tzkt.io/v1/accounts?offset=5").expect("url");
        let mut query = QueryString::new();
        query.insert("alias", "a&b=c #1+%");
        query.apply_to(&mut url);
        assert_eq!(url.query(), Some("offset=5&alias=a%26b%3Dc%20%231%2B%25"));
        assert_eq!(
            url.query_pairs().find(|(k, _)| k == "alias").map(|(_, v)| v.into_owned()),
            Some("a&b=c #1+%".to_owned())
        );
    }

    #[test]
    fn apply_to_leaves_url_untouched_when_empty() {
        let mut url = Url::parse("https://api.tzkt.io/v1/accounts/tz1a/contracts").expect("url");
        QueryString::new().apply_to(&mut url);
        assert_eq!(url.query(), None);
    }
}
