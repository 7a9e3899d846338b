//! Mapping requests and mapper definitions

use crate::config::{ConfigLayersV1, MapperConfig, MappingConfigPatch, MemberOverrides};
use crate::features::type_graph::domain::TypeRef;
use serde::{Deserialize, Serialize};

/// One mapping method: source type to target type, with method and member scopes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MappingRequest {
    pub method: String,
    pub source: TypeRef,
    pub target: TypeRef,

    /// Method-scope settings
    #[serde(default)]
    pub settings: MappingConfigPatch,

    #[serde(default)]
    pub member_overrides: MemberOverrides,
}

impl MappingRequest {
    pub fn new(method: impl Into<String>, source: TypeRef, target: TypeRef) -> Self {
        Self {
            method: method.into(),
            source,
            target,
            settings: MappingConfigPatch::default(),
            member_overrides: MemberOverrides::default(),
        }
    }

    pub fn with_settings(mut self, settings: MappingConfigPatch) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_member_overrides(mut self, overrides: MemberOverrides) -> Self {
        self.member_overrides = overrides;
        self
    }
}

/// A mapper: named scope with its own settings, format providers and methods
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapperDefinition {
    pub name: String,
    #[serde(default)]
    pub config: MapperConfig,
    #[serde(default)]
    pub methods: Vec<MappingRequest>,
}

impl MapperDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mapper whose configuration comes from a loaded layer file
    pub fn from_layers(name: impl Into<String>, layers: &ConfigLayersV1) -> Self {
        let name = name.into();
        let config = layers.mapper(&name);
        Self {
            name,
            config,
            methods: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_method(mut self, request: MappingRequest) -> Self {
        self.methods.push(request);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_layers_picks_named_mapper() {
        let layers = ConfigLayersV1::from_yaml_str(
            r#"
version: 1
mappers:
  CarMapper:
    Settings:
      UseDeepCloning: true
"#,
        )
        .unwrap();

        let mapper = MapperDefinition::from_layers("CarMapper", &layers);
        assert_eq!(mapper.config.settings.use_deep_cloning, Some(true));

        let other = MapperDefinition::from_layers("PersonMapper", &layers);
        assert_eq!(other.config, MapperConfig::default());
    }

    #[test]
    fn test_builders() {
        let mapper = MapperDefinition::new("CarMapper").with_method(
            MappingRequest::new("ToDto", TypeRef::new("Car"), TypeRef::nullable("CarDto"))
                .with_member_overrides(MemberOverrides::new().ignore_target("id")),
        );
        assert_eq!(mapper.methods.len(), 1);
        assert!(mapper.methods[0].target.nullable);
        assert!(!mapper.methods[0].member_overrides.is_empty());
    }
}
