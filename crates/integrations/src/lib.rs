//! facade-integrations: is integration X enabled for this message, and
//! with which settings?
//!
//! Payloads express this in up to four places, accumulated over several
//! schema generations:
//!
//! | source | location |
//! |--------|----------|
//! | [`Source::Integrations`] | top-level `integrations` |
//! | [`Source::Context`] | `context` (or legacy `options` when `context` is absent) |
//! | [`Source::Providers`] | `context.providers` |
//! | [`Source::LegacyOptions`] | top-level `options`, exact keys only |
//!
//! [`Resolver`] evaluates them in the fixed orders declared in
//! [`source`], matching integration names through [`IntegrationName`]
//! normalization, and consults a [`Registry`] of integrations that stay
//! off unless explicitly enabled.

pub mod config;
pub mod name;
pub mod registry;
pub mod resolver;
pub mod source;

pub use config::{ConfigError, ResolverConfig};
pub use name::{IntegrationName, NameIndex};
pub use registry::Registry;
pub use resolver::{Basis, EnablementDecision, Resolver};
pub use source::{Source, Sources, ALL_FLAG_ORDER, ENABLEMENT_ORDER, SETTINGS_ORDER};
