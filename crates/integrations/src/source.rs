//! The layered sources integration settings are read from, and the
//! precedence orders each resolved field walks them in.
//!
//! Every order lists sources highest precedence first; the first source
//! with a decisive entry wins. Keeping the orders as data lets them be
//! read and tested apart from the resolver.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::name::{IntegrationName, NameIndex};

/// One place a payload can configure integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Top-level `options`, matched by exact key.
    LegacyOptions,
    /// `context.providers`.
    Providers,
    /// `context` itself (legacy `options` when `context` is absent).
    Context,
    /// Top-level `integrations`.
    Integrations,
}

impl Source {
    /// Path of the source within a payload.
    pub fn path(&self) -> &'static str {
        match self {
            Source::LegacyOptions => "options",
            Source::Providers => "context.providers",
            Source::Context => "context",
            Source::Integrations => "integrations",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Settings objects: the first source holding an object wins.
pub const SETTINGS_ORDER: &[Source] = &[
    Source::Integrations,
    Source::Context,
    Source::Providers,
    Source::LegacyOptions,
];

/// Explicit enablement: the first source with a non-null entry wins.
/// Providers outrank context here, unlike for settings.
pub const ENABLEMENT_ORDER: &[Source] = &[
    Source::Integrations,
    Source::Providers,
    Source::Context,
    Source::LegacyOptions,
];

/// The global `all` flag: the first source with a boolean `all` wins.
pub const ALL_FLAG_ORDER: &[Source] = &[Source::Integrations, Source::Context, Source::Providers];

// ──────────────────────────────────────────────
// Sources
// ──────────────────────────────────────────────

/// Name indexes for every source of one payload.
#[derive(Debug, Clone, Default)]
pub struct Sources<'a> {
    integrations: NameIndex<'a>,
    context: NameIndex<'a>,
    providers: NameIndex<'a>,
    legacy_options: NameIndex<'a>,
}

impl<'a> Sources<'a> {
    /// Index the sources of a raw payload tree.
    pub fn from_tree(tree: &'a Value) -> Self {
        let context_root = context_root(tree);
        Sources {
            integrations: NameIndex::of(tree.get("integrations")),
            context: NameIndex::of(context_root),
            providers: NameIndex::of(context_root.and_then(|c| c.get("providers"))),
            legacy_options: NameIndex::of(tree.get("options")),
        }
    }

    fn index(&self, source: Source) -> &NameIndex<'a> {
        match source {
            Source::Integrations => &self.integrations,
            Source::Context => &self.context,
            Source::Providers => &self.providers,
            Source::LegacyOptions => &self.legacy_options,
        }
    }

    /// The entry `source` holds for `name`, if any.
    pub fn entry(&self, source: Source, name: &IntegrationName) -> Option<&'a Value> {
        let index = self.index(source);
        match source {
            Source::LegacyOptions => index.get_exact(name),
            _ => index.get(name),
        }
    }

    /// The boolean `all` flag `source` holds, if any.
    pub fn all_flag(&self, source: Source) -> Option<bool> {
        self.index(source).all_flag()
    }

    /// Walk `order` and return the first entry accepted by `decisive`.
    pub fn first<T>(
        &self,
        order: &[Source],
        name: &IntegrationName,
        mut decisive: impl FnMut(&'a Value) -> Option<T>,
    ) -> Option<(Source, T)> {
        order.iter().find_map(|&source| {
            let value = self.entry(source, name)?;
            decisive(value).map(|found| (source, found))
        })
    }

    /// Walk `order` and return the first boolean `all` flag.
    pub fn first_all_flag(&self, order: &[Source]) -> Option<(Source, bool)> {
        order
            .iter()
            .find_map(|&source| self.all_flag(source).map(|flag| (source, flag)))
    }
}

/// The top-level key holding the context: `context`, or legacy `options`
/// when `context` is not an object.
pub fn context_root_key(tree: &Value) -> Option<&'static str> {
    ["context", "options"]
        .into_iter()
        .find(|key| tree.get(*key).is_some_and(Value::is_object))
}

/// `context`, or legacy `options` when `context` is not an object.
pub fn context_root(tree: &Value) -> Option<&Value> {
    context_root_key(tree).and_then(|key| tree.get(key))
}
