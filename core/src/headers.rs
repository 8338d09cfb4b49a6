//! Ordered, case-insensitive header multimap.
//!
//! # Design
//! Each header name maps to a list of values kept in insertion order.
//! Adding a value for a name that already exists appends to that list
//! instead of overwriting it; readers see the list joined by `,`. Name
//! lookup ignores ASCII case, while the casing of the first insertion is
//! what goes out on the wire.
//!
//! A name never maps to zero values: removing a name drops the whole entry.
//!
//! Serde writes one `[name, value]` pair per stored value, so a repeated
//! header survives a save/load cycle with its values still separate.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator used when a multi-valued header is read back as one string.
const VALUE_SEPARATOR: &str = ",";

/// A single header name together with every value recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    name: String,
    values: Vec<String>,
}

impl HeaderEntry {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            values: vec![value.to_string()],
        }
    }

    /// An entry for `name` that carries no values.
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// All values joined by `,`; the empty string when there are none.
    pub fn value(&self) -> String {
        self.values.join(VALUE_SEPARATOR)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Header collection with append-on-duplicate semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<HeaderEntry>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to `name`, inserting `name` at the end if it is new.
    pub fn add(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(idx) => self.entries[idx].values.push(value.to_string()),
            None => self.entries.push(HeaderEntry::new(name, value)),
        }
    }

    /// The joined value for `name`, or `None` if it was never set.
    pub fn get(&self, name: &str) -> Option<String> {
        self.entry(name).map(HeaderEntry::value)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.entry(name).map(HeaderEntry::values).unwrap_or(&[])
    }

    pub fn entry(&self, name: &str) -> Option<&HeaderEntry> {
        self.entries.iter().find(|e| e.matches(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Remove every value stored under `name`.
    ///
    /// Returns the removed entry. A missing name is not an error: the
    /// returned entry is then empty and `value()` yields `""`.
    pub fn remove(&mut self, name: &str) -> HeaderEntry {
        match self.position(name) {
            Some(idx) => self.entries.remove(idx),
            None => HeaderEntry::empty(name),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, joined value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.entries.iter().map(|e| (e.name.as_str(), e.value()))
    }

    pub fn entries(&self) -> &[HeaderEntry] {
        &self.entries
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.matches(name))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.add(name.as_ref(), value.as_ref());
        }
        headers
    }
}

impl<K: AsRef<str>, V: AsRef<str>> From<Vec<(K, V)>> for Headers {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // One pair per stored value, so deserializing restores every value.
        serializer.collect_seq(self.entries().iter().flat_map(|entry| {
            entry
                .values
                .iter()
                .map(move |value| (entry.name.as_str(), value.as_str()))
        }))
    }
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(String, String)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_inserts_new_key() {
        let mut headers = Headers::new();
        headers.add("key1", "val1");
        assert_eq!(headers.get("key1").as_deref(), Some("val1"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn add_duplicate_key_appends_comma_joined() {
        let mut headers = Headers::new();
        headers.add("key1", "val1");
        headers.add("key1", "val2");
        assert_eq!(headers.get("key1").as_deref(), Some("val1,val2"));
        assert_eq!(headers.get_all("key1"), ["val1", "val2"]);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn lookup_ignores_case_and_keeps_first_casing() {
        let mut headers = Headers::new();
        headers.add("Content-Type", "text/plain");
        headers.add("content-type", "application/json");
        assert_eq!(
            headers.get("CONTENT-TYPE").as_deref(),
            Some("text/plain,application/json")
        );
        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Content-Type"]);
    }

    #[test]
    fn iter_preserves_insertion_order() {
        let headers: Headers = vec![("b", "2"), ("a", "1"), ("b", "3")].into();
        let pairs: Vec<(&str, String)> = headers.iter().collect();
        assert_eq!(
            pairs,
            vec![("b", "2,3".to_string()), ("a", "1".to_string())]
        );
    }

    #[test]
    fn remove_returns_all_values() {
        let mut headers = Headers::new();
        headers.add("key1", "val1");
        headers.add("key1", "val2");
        let removed = headers.remove("KEY1");
        assert_eq!(removed.name(), "key1");
        assert_eq!(removed.value(), "val1,val2");
        assert!(headers.get("key1").is_none());
        assert!(headers.is_empty());
    }

    #[test]
    fn remove_missing_key_returns_empty_entry() {
        let mut headers = Headers::new();
        headers.add("other", "x");
        let removed = headers.remove("nonexistent-header");
        assert_eq!(removed.name(), "nonexistent-header");
        assert!(removed.is_empty());
        assert_eq!(removed.value(), "");
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn clear_empties_collection() {
        let mut headers = Headers::new();
        headers.add("key1", "val1");
        headers.add("key2", "val2");
        assert_eq!(headers.len(), 2);
        headers.clear();
        assert_eq!(headers.len(), 0);
    }

    #[test]
    fn get_all_on_missing_key_is_empty() {
        let headers = Headers::new();
        assert!(headers.get_all("missing").is_empty());
        assert!(!headers.contains("missing"));
    }

    #[test]
    fn serializes_one_pair_per_value() {
        let headers: Headers = vec![("key1", "val1"), ("key2", "x"), ("key1", "val2")].into();
        let json = serde_json::to_value(&headers).unwrap();
        assert_eq!(
            json,
            serde_json::json!([["key1", "val1"], ["key1", "val2"], ["key2", "x"]])
        );
    }

    #[test]
    fn serde_keeps_each_value_separate() {
        let headers: Headers = vec![("key1", "val1"), ("KEY1", "val2")].into();
        let json = serde_json::to_string(&headers).unwrap();
        let back: Headers = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get_all("key1"), ["val1", "val2"]);
        assert_eq!(back, headers);
    }

    #[test]
    fn deserialize_merges_duplicate_names() {
        let headers: Headers =
            serde_json::from_str(r#"[["Accept","a"],["accept","b"]]"#).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("accept").as_deref(), Some("a,b"));
    }
}
