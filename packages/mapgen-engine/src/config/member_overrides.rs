//! Per-member overrides
//!
//! Explicit renames, ignores, string formats and enum value pairs declared on
//! one mapping method. They address members of that method's root types only;
//! nested plans are built without them.

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum MemberOverride {
    /// Pair `source` with `target` regardless of their names
    #[serde(rename_all = "PascalCase")]
    Rename { source: String, target: String },

    IgnoreSource(String),

    IgnoreTarget(String),

    /// Format string and/or provider for a string conversion into `target`
    #[serde(rename_all = "PascalCase")]
    StringFormat {
        target: String,
        #[serde(default)]
        format: Option<String>,
        #[serde(default)]
        provider: Option<String>,
    },

    /// Map enum value `source` to `target` (enum-to-enum methods)
    #[serde(rename_all = "PascalCase")]
    EnumValue { source: String, target: String },
}

/// Member-level setting overrides for one target member
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct MemberSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_deep_cloning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_null_property_assignment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throw_on_property_mapping_null_mismatch: Option<bool>,
}

impl MemberSettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_deep_cloning(mut self, v: bool) -> Self {
        self.use_deep_cloning = Some(v);
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
}

/// Overrides as declared on a method
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct MemberOverrides {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<MemberOverride>,

    /// Target member name → setting overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, MemberSettingsPatch>,
}

impl MemberOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.overrides.push(MemberOverride::Rename {
            source: source.into(),
            target: target.into(),
        });
        self
    }

    pub fn ignore_source(mut self, name: impl Into<String>) -> Self {
        self.overrides.push(MemberOverride::IgnoreSource(name.into()));
        self
    }

    pub fn ignore_target(mut self, name: impl Into<String>) -> Self {
        self.overrides.push(MemberOverride::IgnoreTarget(name.into()));
        self
    }

    pub fn string_format(
        mut self,
        target: impl Into<String>,
        format: Option<&str>,
        provider: Option<&str>,
    ) -> Self {
        self.overrides.push(MemberOverride::StringFormat {
            target: target.into(),
            format: format.map(String::from),
            provider: provider.map(String::from),
        });
        self
    }

    pub fn enum_value(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.overrides.push(MemberOverride::EnumValue {
            source: source.into(),
            target: target.into(),
        });
        self
    }

    pub fn member_settings(
        mut self,
        target: impl Into<String>,
        patch: MemberSettingsPatch,
    ) -> Self {
        self.settings.insert(target.into(), patch);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.settings.is_empty()
    }

    /// Normalize into lookup tables (call after `validate`)
    pub fn resolve(&self) -> ResolvedMemberOverrides {
        let mut resolved = ResolvedMemberOverrides {
            settings: self.settings.clone(),
            ..Default::default()
        };

        for o in &self.overrides {
            match o {
                MemberOverride::Rename { source, target } => {
                    resolved.renames.insert(target.clone(), source.clone());
                }
                MemberOverride::IgnoreSource(name) => {
                    resolved.ignored_sources.insert(name.clone());
                }
                MemberOverride::IgnoreTarget(name) => {
                    resolved.ignored_targets.insert(name.clone());
                }
                MemberOverride::StringFormat {
                    target,
                    format,
                    provider,
                } => {
                    resolved.string_formats.insert(
                        target.clone(),
                        StringFormatOverride {
                            format: format.clone(),
                            provider: provider.clone(),
                        },
                    );
                }
                MemberOverride::EnumValue { source, target } => {
                    resolved.enum_values.insert(source.clone(), target.clone());
                }
            }
        }

        resolved
    }
}

impl Validatable for MemberOverrides {
    fn validate(&self) -> ConfigResult<()> {
        let mut renames: BTreeMap<&str, &str> = BTreeMap::new();
        let mut formats: BTreeMap<&str, (&Option<String>, &Option<String>)> = BTreeMap::new();
        let mut enum_values: BTreeMap<&str, &str> = BTreeMap::new();
        let mut ignored_sources = BTreeSet::new();
        let mut ignored_targets = BTreeSet::new();

        for o in &self.overrides {
            match o {
                MemberOverride::Rename { source, target } => {
                    if let Some(previous) = renames.insert(target, source) {
                        if previous != source {
                            return Err(ConfigError::conflicting(
                                target,
                                format!("renamed from both '{}' and '{}'", previous, source),
                            ));
                        }
                    }
                }
                MemberOverride::IgnoreSource(name) => {
                    ignored_sources.insert(name.as_str());
                }
                MemberOverride::IgnoreTarget(name) => {
                    ignored_targets.insert(name.as_str());
                }
                MemberOverride::StringFormat {
                    target,
                    format,
                    provider,
                } => {
                    if let Some(previous) = formats.insert(target, (format, provider)) {
                        if previous != (format, provider) {
                            return Err(ConfigError::conflicting(
                                target,
                                "declares two different string formats",
                            ));
                        }
                    }
                }
                MemberOverride::EnumValue { source, target } => {
                    if let Some(previous) = enum_values.insert(source, target) {
                        if previous != target {
                            return Err(ConfigError::conflicting(
                                source,
                                format!("enum value mapped to both '{}' and '{}'", previous, target),
                            ));
                        }
                    }
                }
            }
        }

        for (target, source) in &renames {
            if ignored_targets.contains(target) {
                return Err(ConfigError::conflicting(
                    *target,
                    "target member is both renamed and ignored",
                ));
            }
            if ignored_sources.contains(source) {
                return Err(ConfigError::conflicting(
                    *source,
                    "source member is both renamed and ignored",
                ));
            }
        }

        for target in formats.keys() {
            if ignored_targets.contains(target) {
                return Err(ConfigError::conflicting(
                    *target,
                    "target member has a string format but is ignored",
                ));
            }
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "MemberOverrides"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct StringFormatOverride {
    pub format: Option<String>,
    pub provider: Option<String>,
}

/// Normalized member overrides carried by the effective configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedMemberOverrides {
    /// Target member → source member
    pub renames: BTreeMap<String, String>,
    pub ignored_sources: BTreeSet<String>,
    pub ignored_targets: BTreeSet<String>,
    /// Target member → format
    pub string_formats: BTreeMap<String, StringFormatOverride>,
    /// Source enum value → target enum value
    pub enum_values: BTreeMap<String, String>,
    /// Target member → setting overrides
    pub settings: BTreeMap<String, MemberSettingsPatch>,
}

impl ResolvedMemberOverrides {
    pub fn is_empty(&self) -> bool {
        !self.has_member_overrides() && self.enum_values.is_empty()
    }

    /// Whether anything addresses members (as opposed to enum values)
    pub fn has_member_overrides(&self) -> bool {
        !(self.renames.is_empty()
            && self.ignored_sources.is_empty()
            && self.ignored_targets.is_empty()
            && self.string_formats.is_empty()
            && self.settings.is_empty())
    }

    pub fn string_format(&self, target_member: &str) -> Option<&StringFormatOverride> {
        self.string_formats.get(target_member)
    }

    pub fn settings_for(&self, target_member: &str) -> Option<&MemberSettingsPatch> {
        self.settings.get(target_member)
    }

    /// Explicitly referenced provider names with the member referencing them
    pub fn provider_references(&self) -> impl Iterator<Item = (&str, &str)> {
        self.string_formats.iter().filter_map(|(member, f)| {
            f.provider
                .as_deref()
                .map(|provider| (member.as_str(), provider))
        })
    }
}
