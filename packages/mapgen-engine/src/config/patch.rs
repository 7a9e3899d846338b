//! Layer patches
//!
//! Patch types with all-optional fields, one per configuration scope
//! (assembly, mapper, method). Unset fields inherit from the weaker scope.

use super::format_provider::FormatProviderRegistry;
use super::mapping_config::MappingConfiguration;
use super::member_overrides::MemberSettingsPatch;
use super::options::{
    IgnoreObsoleteMembersStrategy, PropertyNameMappingStrategy, RequiredMappingStrategy,
};
use super::provenance::ConfigSource;
use crate::features::diagnostics::{DiagnosticKind, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Patch for the scope-level settings (all fields optional)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct MappingConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_deep_cloning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name_mapping_strategy: Option<PropertyNameMappingStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_null_property_assignment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throw_on_property_mapping_null_mismatch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throw_on_mapping_null_mismatch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_obsolete_members_strategy: Option<IgnoreObsoleteMembersStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_mapping_strategy: Option<RequiredMappingStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_enum_mappings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_mapping_ignore_case: Option<bool>,

    /// Per-kind severity overrides, merged kind by kind
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub diagnostic_severities: BTreeMap<DiagnosticKind, Severity>,
}

impl MappingConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_deep_cloning(mut self, v: bool) -> Self {
        self.use_deep_cloning = Some(v);
        self
    }

    pub fn property_name_mapping_strategy(mut self, v: PropertyNameMappingStrategy) -> Self {
        self.property_name_mapping_strategy = Some(v);
        self
    }

    pub fn allow_null_property_assignment(mut self, v: bool) -> Self {
        self.allow_null_property_assignment = Some(v);
        self
    }

    pub fn throw_on_property_mapping_null_mismatch(mut self, v: bool) -> Self {
        self.throw_on_property_mapping_null_mismatch = Some(v);
        self
    }

    pub fn throw_on_mapping_null_mismatch(mut self, v: bool) -> Self {
        self.throw_on_mapping_null_mismatch = Some(v);
        self
    }

    pub fn ignore_obsolete_members_strategy(mut self, v: IgnoreObsoleteMembersStrategy) -> Self {
        self.ignore_obsolete_members_strategy = Some(v);
        self
    }

    pub fn required_mapping_strategy(mut self, v: RequiredMappingStrategy) -> Self {
        self.required_mapping_strategy = Some(v);
        self
    }

    pub fn strict_enum_mappings(mut self, v: bool) -> Self {
        self.strict_enum_mappings = Some(v);
        self
    }

    pub fn enum_mapping_ignore_case(mut self, v: bool) -> Self {
        self.enum_mapping_ignore_case = Some(v);
        self
    }

    pub fn severity(mut self, kind: DiagnosticKind, severity: Severity) -> Self {
        self.diagnostic_severities.insert(kind, severity);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply set fields onto `config`, recording `source` as their provenance
    pub fn apply_to(&self, config: &mut MappingConfiguration, source: ConfigSource) {
        if let Some(v) = self.use_deep_cloning {
            config.use_deep_cloning = v;
            config.provenance.track_field("UseDeepCloning", source.clone());
        }
        if let Some(v) = self.property_name_mapping_strategy {
            config.property_name_mapping_strategy = v;
            config
                .provenance
                .track_field("PropertyNameMappingStrategy", source.clone());
        }
        if let Some(v) = self.allow_null_property_assignment {
            config.allow_null_property_assignment = v;
            config
                .provenance
                .track_field("AllowNullPropertyAssignment", source.clone());
        }
        if let Some(v) = self.throw_on_property_mapping_null_mismatch {
            config.throw_on_property_mapping_null_mismatch = v;
            config
                .provenance
                .track_field("ThrowOnPropertyMappingNullMismatch", source.clone());
        }
        if let Some(v) = self.throw_on_mapping_null_mismatch {
            config.throw_on_mapping_null_mismatch = v;
            config
                .provenance
                .track_field("ThrowOnMappingNullMismatch", source.clone());
        }
        if let Some(v) = self.ignore_obsolete_members_strategy {
            config.ignore_obsolete_members_strategy = v;
            config
                .provenance
                .track_field("IgnoreObsoleteMembersStrategy", source.clone());
        }
        if let Some(v) = self.required_mapping_strategy {
            config.required_mapping_strategy = v;
            config
                .provenance
                .track_field("RequiredMappingStrategy", source.clone());
        }
        if let Some(v) = self.strict_enum_mappings {
            config.strict_enum_mappings = v;
            config
                .provenance
                .track_field("StrictEnumMappings", source.clone());
        }
        if let Some(v) = self.enum_mapping_ignore_case {
            config.enum_mapping_ignore_case = v;
            config
                .provenance
                .track_field("EnumMappingIgnoreCase", source.clone());
        }
        for (kind, severity) in &self.diagnostic_severities {
            config.diagnostic_severities.insert(*kind, *severity);
            config.provenance.track_field(
                &format!("DiagnosticSeverities.{}", kind.as_str()),
                source.clone(),
            );
        }
    }
}

/// Member-scope patches only carry the settings that make sense per member
impl From<&MemberSettingsPatch> for MappingConfigPatch {
    fn from(patch: &MemberSettingsPatch) -> Self {
        Self {
            use_deep_cloning: patch.use_deep_cloning,
            allow_null_property_assignment: patch.allow_null_property_assignment,
            throw_on_property_mapping_null_mismatch: patch.throw_on_property_mapping_null_mismatch,
            ..Self::default()
        }
    }
}

/// Configuration declared on one mapper: settings plus its provider registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct MapperConfig {
    #[serde(default)]
    pub settings: MappingConfigPatch,

    #[serde(default, skip_serializing_if = "FormatProviderRegistry::is_empty")]
    pub format_providers: FormatProviderRegistry,
}

impl MapperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: MappingConfigPatch) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_format_providers(mut self, registry: FormatProviderRegistry) -> Self {
        self.format_providers = registry;
        self
    }
}
