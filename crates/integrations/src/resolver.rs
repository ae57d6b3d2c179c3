//! Enablement and settings resolution.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::name::IntegrationName;
use crate::registry::Registry;
use crate::source::{Source, Sources, ALL_FLAG_ORDER, ENABLEMENT_ORDER, SETTINGS_ORDER};

/// Why an integration ended up enabled or disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "source", rename_all = "snake_case")]
pub enum Basis {
    /// The integration has its own entry in this source.
    Explicit(Source),
    /// No entry; the `all` flag of this source decided.
    GlobalAll(Source),
    /// No entry and no `all = false`; the integration requires opt-in.
    DisabledByDefault,
    /// No entry and no `all = false`.
    Default,
}

/// Outcome of an enablement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnablementDecision {
    pub enabled: bool,
    pub basis: Basis,
}

impl EnablementDecision {
    /// Whether the payload itself named this integration.
    pub fn is_explicit(&self) -> bool {
        matches!(self.basis, Basis::Explicit(_))
    }
}

/// Truthiness of an explicit entry; `null` is not decisive.
fn entry_enables(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    }
}

/// Whether `source` ranks at or above `layer` among the sources that can
/// carry an `all` flag. Legacy options rank below all of them.
fn at_or_above(source: Source, layer: Source) -> bool {
    let rank = |s: Source| ALL_FLAG_ORDER.iter().position(|&o| o == s);
    match (rank(source), rank(layer)) {
        (Some(source), Some(layer)) => source <= layer,
        _ => false,
    }
}

/// Resolves integration enablement and settings against raw payload trees.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    registry: Registry,
}

impl Resolver {
    pub fn new(registry: Registry) -> Self {
        Resolver { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Decide whether `name` is enabled for the payload `tree`.
    ///
    /// 1. A falsy explicit entry, first in [`ENABLEMENT_ORDER`], disables.
    /// 2. A global `all = false`, first in [`ALL_FLAG_ORDER`], disables
    ///    unless the integration has an entry in the layer that set the
    ///    flag or in a layer above it; that entry then decides.
    /// 3. Otherwise the first explicit entry decides by its truthiness.
    /// 4. Otherwise registry members are disabled, and everything else is
    ///    enabled.
    pub fn decide(&self, tree: &Value, name: &IntegrationName) -> EnablementDecision {
        let sources = Sources::from_tree(tree);
        let decision = self.decide_with(&sources, name);
        debug!(
            integration = name.as_str(),
            enabled = decision.enabled,
            basis = ?decision.basis,
            "integration enablement resolved"
        );
        decision
    }

    fn decide_with(&self, sources: &Sources<'_>, name: &IntegrationName) -> EnablementDecision {
        let explicit = sources.first(ENABLEMENT_ORDER, name, entry_enables);
        let all_flag = sources.first_all_flag(ALL_FLAG_ORDER);

        if let Some((layer, false)) = all_flag {
            if !matches!(explicit, Some((_, false))) {
                return Self::override_all_false(sources, name, layer);
            }
        }

        if let Some((source, enabled)) = explicit {
            return EnablementDecision {
                enabled,
                basis: Basis::Explicit(source),
            };
        }

        match all_flag {
            _ if self.registry.is_disabled_by_default(name) => EnablementDecision {
                enabled: false,
                basis: Basis::DisabledByDefault,
            },
            Some((source, enabled)) => EnablementDecision {
                enabled,
                basis: Basis::GlobalAll(source),
            },
            None => EnablementDecision {
                enabled: true,
                basis: Basis::Default,
            },
        }
    }

    /// `all = false` set in `layer` holds unless an entry in that layer, or
    /// in one that outranks it, names the integration.
    fn override_all_false(
        sources: &Sources<'_>,
        name: &IntegrationName,
        layer: Source,
    ) -> EnablementDecision {
        let eligible: Vec<Source> = ENABLEMENT_ORDER
            .iter()
            .copied()
            .filter(|&source| at_or_above(source, layer))
            .collect();
        match sources.first(&eligible, name, entry_enables) {
            Some((source, enabled)) => EnablementDecision {
                enabled,
                basis: Basis::Explicit(source),
            },
            None => EnablementDecision {
                enabled: false,
                basis: Basis::GlobalAll(layer),
            },
        }
    }

    /// Whether `name` is enabled for the payload `tree`.
    pub fn enabled(&self, tree: &Value, name: &IntegrationName) -> bool {
        self.decide(tree, name).enabled
    }

    /// The settings object for `name`: the first object entry walked in
    /// [`SETTINGS_ORDER`], or an empty object when no source holds one.
    pub fn options_for(&self, tree: &Value, name: &IntegrationName) -> Map<String, Value> {
        let sources = Sources::from_tree(tree);
        match sources.first(SETTINGS_ORDER, name, Value::as_object) {
            Some((source, settings)) => {
                debug!(integration = name.as_str(), %source, "integration settings resolved");
                settings.clone()
            }
            None => Map::new(),
        }
    }

    /// Settings for `name` when it is enabled, `None` when it is not.
    pub fn settings_if_enabled(
        &self,
        tree: &Value,
        name: &IntegrationName,
    ) -> Option<Map<String, Value>> {
        if self.enabled(tree, name) {
            Some(self.options_for(tree, name))
        } else {
            None
        }
    }
}
