//! The output parameter set.

use std::slice;

/// An ordered multi-valued mapping of form/query parameters.
///
/// Keys and values are plain text; a key may carry several values
/// (e.g. map-typed fields flattened into `name[subkey]` entries).
/// Insertion order is preserved all the way to the encoded output.
///
/// # Example
///
/// ```
/// use formflat_core::ParamSet;
///
/// let mut params = ParamSet::new();
/// params.set("amount", "1000");
/// params.set("currency", "thb");
/// assert_eq!(params.to_query_string(), "amount=1000&currency=thb");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    entries: Vec<(String, String)>,
}

impl ParamSet {
    /// Create an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set `key` to a single `value`, replacing any values already stored
    /// under that exact key. The first occurrence keeps its position; a new
    /// key is appended at the end.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.retain(|(k, _)| *k != key);
            self.entries.insert(pos, (key, value));
        } else {
            self.entries.push((key, value));
        }
    }

    /// Append a value under `key`, keeping any values already present.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// First value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values stored under `key`, in insertion order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Whether any value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of entries (counting repeated keys once per value).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` entries in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, (String, String)> {
        self.entries.iter()
    }

    /// Render as an `application/x-www-form-urlencoded` string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<'a> IntoIterator for &'a ParamSet {
    type Item = &'a (String, String);
    type IntoIter = slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for ParamSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_inserts_and_replaces() {
        let mut params = ParamSet::new();
        params.set("amount", "1000");
        params.set("currency", "thb");
        params.set("amount", "2000");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("amount"), Some("2000"));
        // replacement keeps the original position
        assert_eq!(params.to_query_string(), "amount=2000&currency=thb");
    }

    #[test]
    fn set_collapses_repeated_values() {
        let mut params = ParamSet::new();
        params.append("tag", "a");
        params.append("tag", "b");
        params.set("tag", "c");

        assert_eq!(params.get_all("tag"), vec!["c"]);
    }

    #[test]
    fn append_preserves_order() {
        let mut params = ParamSet::new();
        params.append("tag", "a");
        params.set("name", "x");
        params.append("tag", "b");

        assert_eq!(params.get_all("tag"), vec!["a", "b"]);
        assert_eq!(params.to_query_string(), "tag=a&name=x&tag=b");
    }

    #[test]
    fn get_on_missing_key() {
        let params = ParamSet::new();
        assert_eq!(params.get("missing"), None);
        assert!(params.get_all("missing").is_empty());
        assert!(params.is_empty());
        assert!(!params.contains_key("missing"));
    }

    #[test]
    fn query_string_escapes_reserved_characters() {
        let mut params = ParamSet::new();
        params.set("card[name]", "John Doe");

        assert_eq!(params.to_query_string(), "card%5Bname%5D=John+Doe");
    }

    #[test]
    fn iterate_entries() {
        let mut params = ParamSet::new();
        params.set("a", "1");
        params.set("b", "2");

        let keys: Vec<_> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);

        let owned: Vec<_> = params.into_iter().collect();
        assert_eq!(
            owned,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }
}
