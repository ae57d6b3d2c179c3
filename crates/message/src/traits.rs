//! Traits, trait aliasing and the address fallbacks built on them.

use facade_core::{proxy, resolve};
use serde_json::{Map, Value};

use crate::identify;
use crate::kind::MessageKind;
use crate::payload::{scalar_string, Payload};

impl Payload<'_> {
    /// The user traits, with `userId` mixed in as `id`.
    ///
    /// Read from `context.traits` (legacy `options.traits`); identify
    /// messages read their top-level `traits` first.
    pub fn traits(&self) -> Map<String, Value> {
        let mut traits = match self.kind() {
            Some(MessageKind::Identify) => resolve(self, "traits")
                .and_then(|t| t.as_object().cloned())
                .unwrap_or_else(|| self.context_object("traits")),
            _ => self.context_object("traits"),
        };
        if let Some(id) = resolve(self, "userId").filter(|id| !id.is_null()) {
            traits.insert("id".to_string(), id.into_owned());
        }
        traits
    }

    /// Traits with keys renamed through `aliases` (canonical name → alias).
    ///
    /// Each alias is used as the literal output key, so `{"email": "$email"}`
    /// yields a `$email` key. Canonical names with no value are skipped and
    /// keys without an alias pass through unchanged.
    pub fn traits_aliased<I, K, V>(&self, aliases: I) -> Map<String, Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let base = self.traits();
        let mut aliased = base.clone();
        for (canonical, alias) in aliases {
            let canonical = canonical.as_ref();
            let Some(value) = self.trait_value(&base, canonical) else {
                continue;
            };
            aliased.remove(canonical);
            aliased.insert(alias.as_ref().to_string(), value);
        }
        aliased
    }

    fn trait_value(&self, traits: &Map<String, Value>, key: &str) -> Option<Value> {
        let derived = match self.kind() {
            Some(MessageKind::Identify) => identify::derived_trait(self, key),
            _ => None,
        };
        derived
            .or_else(|| traits.get(key).cloned())
            .filter(|value| !value.is_null())
    }

    pub fn city(&self) -> Option<String> {
        self.address_field(&["city"])
    }

    pub fn country(&self) -> Option<String> {
        self.address_field(&["country"])
    }

    pub fn state(&self) -> Option<String> {
        self.address_field(&["state"])
    }

    pub fn region(&self) -> Option<String> {
        self.address_field(&["region"])
    }

    pub fn street(&self) -> Option<String> {
        self.address_field(&["street"])
    }

    /// `zip`, then `postalCode`, each under `address` first.
    pub fn zip(&self) -> Option<String> {
        self.address_field(&["zip", "postalCode"])
    }

    fn address_field(&self, keys: &[&str]) -> Option<String> {
        let traits = Value::Object(self.traits());
        keys.iter().find_map(|key| {
            [format!("address.{key}"), key.to_string()]
                .iter()
                .find_map(|path| proxy(&traits, path).as_ref().and_then(scalar_string))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn aliases_rename_only_present_traits() {
        let raw = json!({ "context": { "traits": { "a": "b", "email": null } } });
        let payload = Payload::new(&raw).unwrap();
        let aliased = payload.traits_aliased([("a", "alpha"), ("email", "$email"), ("zzz", "z")]);
        assert_eq!(Value::Object(aliased), json!({ "alpha": "b", "email": null }));
    }

    #[test]
    fn address_prefers_nested_values() {
        let raw = json!({
            "context": { "traits": { "city": "top", "address": { "city": "nested" } } }
        });
        let payload = Payload::new(&raw).unwrap();
        assert_eq!(payload.city().as_deref(), Some("nested"));
    }

    #[test]
    fn numeric_zips_read_as_strings() {
        let raw = json!({ "context": { "traits": { "zip": 94107 } } });
        let payload = Payload::new(&raw).unwrap();
        assert_eq!(payload.zip().as_deref(), Some("94107"));
    }

    #[test]
    fn zip_wins_over_postal_code_at_any_level() {
        let raw = json!({
            "context": { "traits": { "zip": "zip", "address": { "postalCode": "postal" } } }
        });
        let payload = Payload::new(&raw).unwrap();
        assert_eq!(payload.zip().as_deref(), Some("zip"));
    }
}
