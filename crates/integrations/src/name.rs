//! Integration name normalization and lookup.
//!
//! `"Customer.io"`, `"customer_io"`, `"CustomerIo"` and `"customerio"` all
//! name the same integration. Normalization lowercases and drops every
//! character that is not alphanumeric; lookups compare normalized forms
//! through a [`NameIndex`] built once per source map.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

/// Keys that carry flags or nested sources rather than an integration.
pub const RESERVED_KEYS: &[&str] = &["all", "providers"];

/// Lowercase `name` and strip everything that is not a letter or digit.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// An integration name as the caller spelled it, with its normalized key.
#[derive(Debug, Clone)]
pub struct IntegrationName {
    raw: String,
    key: String,
}

impl IntegrationName {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let key = normalize(&raw);
        IntegrationName { raw, key }
    }

    /// The spelling supplied by the caller.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The normalized comparison key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for IntegrationName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for IntegrationName {}

impl std::hash::Hash for IntegrationName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for IntegrationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for IntegrationName {
    fn from(raw: &str) -> Self {
        IntegrationName::new(raw)
    }
}

impl From<String> for IntegrationName {
    fn from(raw: String) -> Self {
        IntegrationName::new(raw)
    }
}

// ──────────────────────────────────────────────
// NameIndex
// ──────────────────────────────────────────────

/// Normalized-key index over one source map.
///
/// When several stored keys normalize to the same form, the first one in
/// map order is indexed; an exact spelling match always wins over the
/// index.
#[derive(Debug, Clone, Default)]
pub struct NameIndex<'a> {
    map: Option<&'a Map<String, Value>>,
    normalized: HashMap<String, &'a str>,
}

impl<'a> NameIndex<'a> {
    /// Index every non-reserved key of `map`.
    pub fn new(map: &'a Map<String, Value>) -> Self {
        let mut normalized = HashMap::with_capacity(map.len());
        for key in map.keys() {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            normalized.entry(normalize(key)).or_insert(key.as_str());
        }
        NameIndex {
            map: Some(map),
            normalized,
        }
    }

    /// Index `value` when it is an object; otherwise an empty index.
    pub fn of(value: Option<&'a Value>) -> Self {
        match value.and_then(Value::as_object) {
            Some(map) => NameIndex::new(map),
            None => NameIndex::default(),
        }
    }

    /// Whether the underlying map exists at all.
    pub fn is_present(&self) -> bool {
        self.map.is_some()
    }

    /// Look up an integration by normalized name.
    pub fn get(&self, name: &IntegrationName) -> Option<&'a Value> {
        let map = self.map?;
        if !RESERVED_KEYS.contains(&name.as_str()) {
            if let Some(value) = map.get(name.as_str()) {
                return Some(value);
            }
        }
        let stored = self.normalized.get(name.key())?;
        map.get(*stored)
    }

    /// Look up an integration by its exact spelling only.
    pub fn get_exact(&self, name: &IntegrationName) -> Option<&'a Value> {
        if RESERVED_KEYS.contains(&name.as_str()) {
            return None;
        }
        self.map?.get(name.as_str())
    }

    /// The boolean `all` flag of this map, if set.
    pub fn all_flag(&self) -> Option<bool> {
        self.map?.get("all").and_then(Value::as_bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn spellings_normalize_together() {
        for spelling in ["Customer.io", "customer_io", "CustomerIo", "customerio", "CUSTOMER-IO"] {
            assert_eq!(normalize(spelling), "customerio", "{spelling}");
        }
        assert_eq!(normalize("Google Analytics"), "googleanalytics");
        assert_eq!(IntegrationName::new("hub_spot"), IntegrationName::new("HubSpot"));
    }

    #[test]
    fn index_matches_any_spelling() {
        let map = json!({ "HubSpot": { "x": 1 }, "all": false });
        let index = NameIndex::of(Some(&map));
        assert_eq!(index.get(&"hub_spot".into()), Some(&json!({ "x": 1 })));
        assert_eq!(index.get(&"HUBSPOT".into()), Some(&json!({ "x": 1 })));
        assert_eq!(index.get(&"Salesforce".into()), None);
        assert_eq!(index.all_flag(), Some(false));
    }

    #[test]
    fn reserved_keys_never_match() {
        let map = json!({ "all": true, "providers": { "x": 1 } });
        let index = NameIndex::of(Some(&map));
        assert_eq!(index.get(&"all".into()), None);
        assert_eq!(index.get(&"Providers".into()), None);
        assert_eq!(index.get_exact(&"all".into()), None);
    }

    #[test]
    fn exact_spelling_wins_over_normalized_collision() {
        let map = json!({ "customer_io": false, "Customer.io": true });
        let index = NameIndex::of(Some(&map));
        assert_eq!(index.get(&"Customer.io".into()), Some(&json!(true)));
        assert_eq!(index.get(&"customer_io".into()), Some(&json!(false)));
        assert_eq!(index.get_exact(&"customerio".into()), None);
    }

    #[test]
    fn non_objects_give_an_empty_index() {
        let not_a_map = json!(true);
        let index = NameIndex::of(Some(&not_a_map));
        assert!(!index.is_present());
        assert_eq!(index.get(&"anything".into()), None);
        assert_eq!(index.all_flag(), None);
        assert!(!NameIndex::of(None).is_present());
    }
}
