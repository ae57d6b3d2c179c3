//! Enablement and settings precedence across mixed schema generations.

use facade_integrations::{IntegrationName, Resolver};
use serde_json::{json, Map, Value};

fn enabled(tree: Value, name: &str) -> bool {
    Resolver::default().enabled(&tree, &IntegrationName::new(name))
}

fn options(tree: Value, name: &str) -> Value {
    Value::Object(Resolver::default().options_for(&tree, &IntegrationName::new(name)))
}

// ──────────────────────────────────────────────
// Enablement
// ──────────────────────────────────────────────

#[test]
fn enabled_by_default() {
    assert!(enabled(json!({}), "Customer.io"));
}

#[test]
fn disabled_when_all_is_false() {
    assert!(!enabled(json!({ "context": { "all": false } }), "Customer.io"));
}

#[test]
fn explicit_entry_overrides_all_false() {
    let tree = json!({ "context": { "all": false, "Customer.io": { "x": 1 } } });
    assert!(enabled(tree, "Customer.io"));
}

#[test]
fn explicit_false_overrides_all_true() {
    let tree = json!({ "context": { "all": true, "Customer.io": false } });
    assert!(!enabled(tree, "Customer.io"));
}

#[test]
fn providers_all_applies_without_other_flags() {
    let tree = json!({ "context": { "providers": { "all": false, "Customer.io": true } } });
    assert!(enabled(tree.clone(), "Customer.io"));
    assert!(!enabled(tree, "Google Analytics"));
}

#[test]
fn opt_in_integrations_need_an_explicit_entry() {
    assert!(!enabled(json!({}), "Salesforce"));
    assert!(enabled(json!({ "context": { "Salesforce": { "x": 1 } } }), "Salesforce"));
}

#[test]
fn legacy_providers_map() {
    let tree = json!({ "context": { "providers": { "Customer.io": false, "Salesforce": true } } });
    assert!(!enabled(tree.clone(), "Customer.io"));
    assert!(enabled(tree, "Salesforce"));
}

#[test]
fn integrations_map() {
    let tree = json!({ "integrations": { "Customer.io": false, "Salesforce": true } });
    assert!(!enabled(tree.clone(), "Customer.io"));
    assert!(enabled(tree, "Salesforce"));
}

#[test]
fn integrations_all_flag() {
    assert!(!enabled(json!({ "integrations": { "all": false } }), "Customer.io"));
}

#[test]
fn all_false_holds_against_entries_in_lower_layers() {
    let tree = json!({ "integrations": { "all": false }, "context": { "Customer.io": true } });
    assert!(!enabled(tree, "Customer.io"));

    let tree = json!({ "context": { "all": false, "providers": { "HubSpot": { "x": 1 } } } });
    assert!(!enabled(tree.clone(), "HubSpot"));
    assert_eq!(
        Resolver::default().settings_if_enabled(&tree, &IntegrationName::new("hub_spot")),
        None
    );
}

#[test]
fn all_false_yields_to_entries_in_higher_layers() {
    let tree = json!({ "context": { "all": false }, "integrations": { "Customer.io": true } });
    assert!(enabled(tree.clone(), "Customer.io"));
    assert!(!enabled(tree, "Mixpanel"));
}

#[test]
fn integrations_outrank_every_other_source() {
    let tree = json!({
        "options": { "Mixpanel": true },
        "context": { "Mixpanel": true, "providers": { "Mixpanel": true } },
        "integrations": { "Mixpanel": false }
    });
    assert!(!enabled(tree, "Mixpanel"));
}

#[test]
fn legacy_options_are_matched_exactly() {
    let tree = json!({ "options": { "Mixpanel": false } });
    assert!(!enabled(tree.clone(), "Mixpanel"));
    assert!(enabled(tree, "mixpanel"));
}

#[test]
fn name_matching_ignores_case_and_separators() {
    let tree = json!({ "context": { "all": false, "Customer.io": true } });
    for spelling in ["Customer.io", "customer_io", "CustomerIo", "customerio"] {
        assert!(enabled(tree.clone(), spelling), "{spelling}");
    }
    let tree = json!({ "integrations": { "customer_io": false } });
    assert_eq!(enabled(tree.clone(), "Customer.io"), enabled(tree, "customer_io"));
}

// ──────────────────────────────────────────────
// Settings
// ──────────────────────────────────────────────

#[test]
fn settings_come_from_the_first_object_entry() {
    let tree = json!({
        "context": { "Salesforce": { "object": "Account" } },
        "integrations": { "Salesforce": true }
    });
    assert_eq!(options(tree.clone(), "Salesforce"), json!({ "object": "Account" }));
    assert_eq!(options(tree, "salesforce"), json!({ "object": "Account" }));
}

#[test]
fn settings_default_to_an_empty_object() {
    let tree = json!({ "integrations": { "Salesforce": true } });
    assert_eq!(options(tree, "Salesforce"), json!({}));
    assert_eq!(options(json!({}), "Salesforce"), json!({}));
}

#[test]
fn context_settings_outrank_providers_settings() {
    let tree = json!({
        "context": {
            "providers": { "Salesforce": true },
            "Salesforce": { "object": "Lead", "lookup": { "email": "peter@initech.com" } }
        }
    });
    assert_eq!(
        options(tree, "salesforce"),
        json!({ "object": "Lead", "lookup": { "email": "peter@initech.com" } })
    );
}

#[test]
fn integration_settings_outrank_context_settings() {
    let tree = json!({
        "context": { "HubSpot": { "portal": "context" } },
        "integrations": { "hub_spot": { "portal": "integrations" } }
    });
    assert_eq!(options(tree, "HubSpot"), json!({ "portal": "integrations" }));
}

#[test]
fn resolution_is_deterministic() {
    let tree = json!({
        "context": { "providers": { "all": false, "HubSpot": { "x": 1 } } },
        "integrations": { "Salesforce": true }
    });
    let resolver = Resolver::default();
    for name in ["HubSpot", "Salesforce", "Customer.io"] {
        let name = IntegrationName::new(name);
        assert_eq!(resolver.decide(&tree, &name), resolver.decide(&tree, &name));
        assert_eq!(resolver.options_for(&tree, &name), resolver.options_for(&tree, &name));
    }
    let expected: Map<String, Value> = json!({ "x": 1 }).as_object().cloned().unwrap();
    assert_eq!(
        resolver.settings_if_enabled(&tree, &IntegrationName::new("hub_spot")),
        Some(expected)
    );
}
