//! Configuration I/O (YAML loading)
//!
//! Assembly defaults and mapper-level configuration can be kept in a versioned
//! YAML document. Method and member scopes travel with the mapping requests.

use super::error::{ConfigError, ConfigResult};
use super::patch::{MapperConfig, MappingConfigPatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// YAML Schema v1
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayersV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Assembly-wide defaults
    #[serde(default)]
    pub assembly: MappingConfigPatch,

    /// Mapper name → mapper configuration
    #[serde(default)]
    pub mappers: BTreeMap<String, MapperConfig>,
}

impl ConfigLayersV1 {
    pub fn new() -> Self {
        Self {
            version: 1,
            ..Self::default()
        }
    }

    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;

        // Version check before schema decoding so old files get a precise error
        let version = value
            .get("version")
            .and_then(serde_yaml::Value::as_u64)
            .ok_or(ConfigError::MissingVersion)?;
        let version = u32::try_from(version).map_err(|_| ConfigError::UnsupportedVersion {
            found: u32::MAX,
            supported: SUPPORTED_VERSIONS.to_vec(),
        })?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let layers: Self = serde_yaml::from_value(value)?;
        tracing::debug!(
            "Loaded configuration layers v{} with {} mapper(s)",
            layers.version,
            layers.mappers.len()
        );
        Ok(layers)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(ConfigError::Yaml)
    }

    /// Mapper configuration by name; undeclared mappers use an empty one
    pub fn mapper(&self, name: &str) -> MapperConfig {
        self.mappers.get(name).cloned().unwrap_or_default()
    }
}
