//! Effective mapping configuration
//!
//! The fully merged settings for one mapping request. Built by
//! `ConfigResolver::resolve`, immutable afterwards and shared behind `Arc`.
//! Plans are memoized per configuration fingerprint, so two requests with
//! equal effective settings share their nested plans.

use super::error::ConfigResult;
use super::format_provider::FormatProviderRegistry;
use super::member_overrides::ResolvedMemberOverrides;
use super::options::{
    CopyBehavior, IgnoreObsoleteMembersStrategy, PropertyNameMappingStrategy,
    RequiredMappingStrategy,
};
use super::patch::MappingConfigPatch;
use super::provenance::{ConfigProvenance, ConfigSource};
use crate::features::diagnostics::{DiagnosticKind, SeverityPolicy, Severity};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// blake3 digest of the canonical JSON form of a configuration
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ConfigFingerprint([u8; 32]);

impl ConfigFingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for ConfigFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0[..6] {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ConfigFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigFingerprint({})", self)
    }
}

impl Serialize for ConfigFingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Member-level policy after member setting patches are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberPolicy {
    pub copy: CopyBehavior,
    pub allow_null: bool,
    pub throw_on_property_null: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MappingConfiguration {
    pub(crate) use_deep_cloning: bool,
    pub(crate) property_name_mapping_strategy: PropertyNameMappingStrategy,
    pub(crate) allow_null_property_assignment: bool,
    pub(crate) throw_on_property_mapping_null_mismatch: bool,
    pub(crate) throw_on_mapping_null_mismatch: bool,
    pub(crate) ignore_obsolete_members_strategy: IgnoreObsoleteMembersStrategy,
    pub(crate) required_mapping_strategy: RequiredMappingStrategy,
    pub(crate) strict_enum_mappings: bool,
    pub(crate) enum_mapping_ignore_case: bool,
    pub(crate) diagnostic_severities: BTreeMap<DiagnosticKind, Severity>,
    pub(crate) format_providers: FormatProviderRegistry,
    pub(crate) member_overrides: ResolvedMemberOverrides,

    #[serde(skip)]
    pub(crate) provenance: ConfigProvenance,
    #[serde(skip)]
    pub(crate) fingerprint: ConfigFingerprint,
}

impl MappingConfiguration {
    /// Built-in defaults, not yet sealed
    pub fn defaults() -> Self {
        Self {
            use_deep_cloning: false,
            property_name_mapping_strategy: PropertyNameMappingStrategy::CaseSensitive,
            allow_null_property_assignment: true,
            throw_on_property_mapping_null_mismatch: false,
            throw_on_mapping_null_mismatch: true,
            ignore_obsolete_members_strategy: IgnoreObsoleteMembersStrategy::None,
            required_mapping_strategy: RequiredMappingStrategy::Both,
            strict_enum_mappings: false,
            enum_mapping_ignore_case: false,
            diagnostic_severities: BTreeMap::new(),
            format_providers: FormatProviderRegistry::new(),
            member_overrides: ResolvedMemberOverrides::default(),
            provenance: ConfigProvenance::new(),
            fingerprint: ConfigFingerprint::default(),
        }
    }

    /// Compute the fingerprint over the current settings
    pub(crate) fn seal(mut self) -> ConfigResult<Self> {
        let canonical = serde_json::to_vec(&self)?;
        self.fingerprint = ConfigFingerprint(*blake3::hash(&canonical).as_bytes());
        Ok(self)
    }

    /// Configuration for plans nested below the request's root pair.
    ///
    /// Member overrides address root members only and are cleared; when there
    /// are none the same configuration (and fingerprint) is reused.
    pub fn for_nested(self: &Arc<Self>) -> ConfigResult<Arc<Self>> {
        if self.member_overrides.is_empty() {
            return Ok(Arc::clone(self));
        }
        let mut nested = (**self).clone();
        nested.member_overrides = ResolvedMemberOverrides::default();
        Ok(Arc::new(nested.seal()?))
    }

    /// Nested configuration with one target member's setting patch folded in
    pub fn nested_for_member(self: &Arc<Self>, target_member: &str) -> ConfigResult<Arc<Self>> {
        let nested = self.for_nested()?;
        match self.member_overrides.settings_for(target_member) {
            None => Ok(nested),
            Some(settings) => {
                let mut config = (*nested).clone();
                MappingConfigPatch::from(settings)
                    .apply_to(&mut config, ConfigSource::Member(target_member.to_string()));
                Ok(Arc::new(config.seal()?))
            }
        }
    }

    /// Copy and null policy for one target member
    pub fn member_policy(&self, target_member: &str) -> MemberPolicy {
        let mut policy = MemberPolicy {
            copy: self.copy_behavior(),
            allow_null: self.allow_null_property_assignment,
            throw_on_property_null: self.throw_on_property_mapping_null_mismatch,
        };
        if let Some(settings) = self.member_overrides.settings_for(target_member) {
            if let Some(v) = settings.use_deep_cloning {
                policy.copy = CopyBehavior::from_deep_cloning(v);
            }
            if let Some(v) = settings.allow_null_property_assignment {
                policy.allow_null = v;
            }
            if let Some(v) = settings.throw_on_property_mapping_null_mismatch {
                policy.throw_on_property_null = v;
            }
        }
        policy
    }

    pub fn fingerprint(&self) -> ConfigFingerprint {
        self.fingerprint
    }

    pub fn provenance(&self) -> &ConfigProvenance {
        &self.provenance
    }

    pub fn copy_behavior(&self) -> CopyBehavior {
        CopyBehavior::from_deep_cloning(self.use_deep_cloning)
    }

    pub fn use_deep_cloning(&self) -> bool {
        self.use_deep_cloning
    }

    pub fn name_strategy(&self) -> PropertyNameMappingStrategy {
        self.property_name_mapping_strategy
    }

    pub fn allow_null_property_assignment(&self) -> bool {
        self.allow_null_property_assignment
    }

    pub fn throw_on_property_mapping_null_mismatch(&self) -> bool {
        self.throw_on_property_mapping_null_mismatch
    }

    pub fn throw_on_mapping_null_mismatch(&self) -> bool {
        self.throw_on_mapping_null_mismatch
    }

    pub fn ignore_obsolete_members_strategy(&self) -> IgnoreObsoleteMembersStrategy {
        self.ignore_obsolete_members_strategy
    }

    pub fn required_mapping_strategy(&self) -> RequiredMappingStrategy {
        self.required_mapping_strategy
    }

    pub fn strict_enum_mappings(&self) -> bool {
        self.strict_enum_mappings
    }

    pub fn enum_mapping_ignore_case(&self) -> bool {
        self.enum_mapping_ignore_case
    }

    pub fn format_providers(&self) -> &FormatProviderRegistry {
        &self.format_providers
    }

    pub fn member_overrides(&self) -> &ResolvedMemberOverrides {
        &self.member_overrides
    }
}

impl Default for MappingConfiguration {
    fn default() -> Self {
        Self::defaults()
    }
}

impl SeverityPolicy for MappingConfiguration {
    fn severity_of(&self, kind: DiagnosticKind) -> Severity {
        self.diagnostic_severities
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_severity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::member_overrides::{MemberOverrides, MemberSettingsPatch};

    fn sealed(config: MappingConfiguration) -> Arc<MappingConfiguration> {
        Arc::new(config.seal().unwrap())
    }

    #[test]
    fn test_builtin_defaults() {
        let config = MappingConfiguration::defaults();
        assert_eq!(config.copy_behavior(), CopyBehavior::Shallow);
        assert_eq!(config.name_strategy(), PropertyNameMappingStrategy::CaseSensitive);
        assert!(config.allow_null_property_assignment());
        assert!(!config.throw_on_property_mapping_null_mismatch());
        assert!(config.throw_on_mapping_null_mismatch());
        assert!(!config.strict_enum_mappings());
        assert_eq!(
            config.severity_of(DiagnosticKind::UnmappedTargetMember),
            Severity::Warning
        );
    }

    #[test]
    fn test_fingerprint_tracks_settings_not_provenance() {
        let a = sealed(MappingConfiguration::defaults());

        let mut b = MappingConfiguration::defaults();
        b.provenance.track_field("UseDeepCloning", ConfigSource::Method);
        let b = sealed(b);
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut c = MappingConfiguration::defaults();
        c.use_deep_cloning = true;
        let c = sealed(c);
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_ne!(a.fingerprint(), ConfigFingerprint::default());
    }

    #[test]
    fn test_for_nested_without_overrides_reuses_config() {
        let root = sealed(MappingConfiguration::defaults());
        let nested = root.for_nested().unwrap();
        assert!(Arc::ptr_eq(&root, &nested));
    }

    #[test]
    fn test_for_nested_clears_member_overrides() {
        let mut config = MappingConfiguration::defaults();
        config.member_overrides = MemberOverrides::new().rename("a", "b").resolve();
        let root = sealed(config);

        let nested = root.for_nested().unwrap();
        assert!(nested.member_overrides().is_empty());
        assert_eq!(nested.fingerprint(), sealed(MappingConfiguration::defaults()).fingerprint());
    }

    #[test]
    fn test_member_policy_and_nested_member_config() {
        let mut config = MappingConfiguration::defaults();
        config.member_overrides = MemberOverrides::new()
            .member_settings(
                "engine",
                MemberSettingsPatch::new()
                    .use_deep_cloning(true)
                    .allow_null_property_assignment(false),
            )
            .resolve();
        let root = sealed(config);

        let policy = root.member_policy("engine");
        assert_eq!(policy.copy, CopyBehavior::DeepClone);
        assert!(!policy.allow_null);
        assert_eq!(root.member_policy("wheels").copy, CopyBehavior::Shallow);

        let nested = root.nested_for_member("engine").unwrap();
        assert!(nested.use_deep_cloning());
        assert_eq!(
            nested.provenance().get_source("UseDeepCloning"),
            ConfigSource::Member("engine".to_string())
        );
    }

    #[test]
    fn test_severity_override() {
        let mut config = MappingConfiguration::defaults();
        config
            .diagnostic_severities
            .insert(DiagnosticKind::UnmappedSourceMember, Severity::Error);
        assert_eq!(
            config.severity_of(DiagnosticKind::UnmappedSourceMember),
            Severity::Error
        );
        assert_eq!(
            config.severity_of(DiagnosticKind::NullMismatchRisk),
            Severity::Info
        );
    }
}
