//! Integrations that require an explicit opt-in.

use std::collections::BTreeSet;

use crate::name::{normalize, IntegrationName};

/// Integrations disabled unless a message names them explicitly.
pub const DISABLED_BY_DEFAULT: &[&str] = &["Salesforce"];

/// The set of disabled-by-default integrations, keyed by normalized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    disabled: BTreeSet<String>,
}

impl Registry {
    pub fn new<I, S>(disabled_by_default: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Registry {
            disabled: disabled_by_default
                .into_iter()
                .map(|name| normalize(name.as_ref()))
                .collect(),
        }
    }

    /// A registry where every integration is enabled by default.
    pub fn empty() -> Self {
        Registry {
            disabled: BTreeSet::new(),
        }
    }

    pub fn is_disabled_by_default(&self, name: &IntegrationName) -> bool {
        self.disabled.contains(name.key())
    }

    pub fn len(&self) -> usize {
        self.disabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disabled.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new(DISABLED_BY_DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_holds_salesforce() {
        let registry = Registry::default();
        assert!(registry.is_disabled_by_default(&"Salesforce".into()));
        assert!(registry.is_disabled_by_default(&"sales_force".into()));
        assert!(!registry.is_disabled_by_default(&"Customer.io".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn custom_registries_normalize_their_entries() {
        let registry = Registry::new(["Marketo", "Hub Spot"]);
        assert!(registry.is_disabled_by_default(&"hubspot".into()));
        assert!(registry.is_disabled_by_default(&"MARKETO".into()));
        assert!(!registry.is_disabled_by_default(&"Salesforce".into()));
        assert!(Registry::empty().is_empty());
    }
}
