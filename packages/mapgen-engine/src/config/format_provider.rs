//! Format provider registry
//!
//! Named policies controlling how values render as strings (culture-specific
//! number formatting and the like). Declared once per mapper; at most one
//! provider may be marked default.

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct FormatProvider {
    #[serde(default)]
    pub is_default: bool,

    /// Culture or locale the provider renders with, passed through to emission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
}

impl FormatProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_provider() -> Self {
        Self {
            is_default: true,
            culture: None,
        }
    }

    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = Some(culture.into());
        self
    }
}

/// Provider name → provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatProviderRegistry {
    providers: BTreeMap<String, FormatProvider>,
}

impl FormatProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a provider, builder style
    pub fn with(mut self, name: impl Into<String>, provider: FormatProvider) -> Self {
        self.register(name, provider);
        self
    }

    pub fn register(&mut self, name: impl Into<String>, provider: FormatProvider) {
        self.providers.insert(name.into(), provider);
    }

    pub fn get(&self, name: &str) -> Option<&FormatProvider> {
        self.providers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Names of every provider marked default, sorted
    pub fn defaults(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter(|(_, p)| p.is_default)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// The single default provider, if exactly one is marked
    pub fn default_name(&self) -> Option<&str> {
        let defaults = self.defaults();
        match defaults.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Validatable for FormatProviderRegistry {
    fn validate(&self) -> ConfigResult<()> {
        let defaults = self.defaults();
        if defaults.len() > 1 {
            return Err(ConfigError::MultipleDefaultFormatProviders {
                providers: defaults.into_iter().map(String::from).collect(),
            });
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "FormatProviderRegistry"
    }
}
