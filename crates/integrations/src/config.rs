//! Resolver configuration.
//!
//! The disabled-by-default registry can be replaced from a TOML file:
//!
//! ```toml
//! [integrations]
//! disabled_by_default = ["Salesforce", "Marketo"]
//! ```
//!
//! Omitting `disabled_by_default` keeps the built-in registry; an empty
//! list turns every integration on by default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::registry::{Registry, DISABLED_BY_DEFAULT};
use crate::resolver::Resolver;

/// Errors while loading a [`ResolverConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub integrations: IntegrationsSection,
}

/// `[integrations]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationsSection {
    /// Integrations that stay off unless a message enables them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_by_default: Option<Vec<String>>,
}

impl ResolverConfig {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The registry this config describes.
    pub fn registry(&self) -> Registry {
        match &self.integrations.disabled_by_default {
            Some(names) => Registry::new(names),
            None => Registry::new(DISABLED_BY_DEFAULT),
        }
    }

    /// A resolver using this config.
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.registry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_custom_registry() {
        let config: ResolverConfig = toml::from_str(
            r#"
            [integrations]
            disabled_by_default = ["Marketo", "Salesforce"]
            "#,
        )
        .unwrap();
        let registry = config.registry();
        assert_eq!(registry.len(), 2);
        assert!(registry.is_disabled_by_default(&"marketo".into()));
    }

    #[test]
    fn missing_section_keeps_the_builtin_registry() {
        let config: ResolverConfig = toml::from_str("").unwrap();
        assert_eq!(config, ResolverConfig::default());
        assert_eq!(config.registry(), Registry::default());
    }

    #[test]
    fn empty_list_enables_everything_by_default() {
        let config: ResolverConfig =
            toml::from_str("[integrations]\ndisabled_by_default = []\n").unwrap();
        assert!(config.registry().is_empty());
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = ResolverConfig::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.toml"));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[integrations\n").unwrap();
        let err = ResolverConfig::load(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[integrations]\ndisabled_by_default = [\"Marketo\"]\n").unwrap();
        let config = ResolverConfig::load(&good).unwrap();
        assert!(config.registry().is_disabled_by_default(&"Marketo".into()));
    }
}
