//! Configuration resolver
//!
//! Merges the configuration scopes of one mapping request into a single
//! effective `MappingConfiguration`. Precedence per setting, strongest first:
//! member > method > mapper > assembly > built-in default.

use super::error::{ConfigError, ConfigResult};
use super::mapping_config::MappingConfiguration;
use super::member_overrides::MemberOverrides;
use super::patch::{MapperConfig, MappingConfigPatch};
use super::provenance::ConfigSource;
use super::validation::ConfigValidator;

pub struct ConfigResolver;

impl ConfigResolver {
    /// Resolve the effective configuration of one request.
    ///
    /// Fails when the mapper's registry marks more than one provider default,
    /// when member overrides contradict each other, or when a string-format
    /// override names a provider the registry does not contain.
    pub fn resolve(
        defaults: &MappingConfigPatch,
        mapper: &MapperConfig,
        method: &MappingConfigPatch,
        member_overrides: &MemberOverrides,
    ) -> ConfigResult<MappingConfiguration> {
        ConfigValidator::validate_config(&mapper.format_providers)?;
        ConfigValidator::validate_config(member_overrides)?;

        let mut config = MappingConfiguration::defaults();
        defaults.apply_to(&mut config, ConfigSource::Assembly);
        mapper.settings.apply_to(&mut config, ConfigSource::Mapper);
        method.apply_to(&mut config, ConfigSource::Method);

        let registry = &mapper.format_providers;
        let resolved = member_overrides.resolve();
        for (member, provider) in resolved.provider_references() {
            if !registry.contains(provider) {
                return Err(ConfigError::unknown_provider(
                    provider,
                    member,
                    registry.names(),
                ));
            }
        }

        for (member, settings) in &resolved.settings {
            let source = ConfigSource::Member(member.clone());
            if settings.use_deep_cloning.is_some() {
                config
                    .provenance
                    .track_field(&format!("Members.{}.UseDeepCloning", member), source.clone());
            }
            if settings.allow_null_property_assignment.is_some() {
                config.provenance.track_field(
                    &format!("Members.{}.AllowNullPropertyAssignment", member),
                    source.clone(),
                );
            }
            if settings.throw_on_property_mapping_null_mismatch.is_some() {
                config.provenance.track_field(
                    &format!("Members.{}.ThrowOnPropertyMappingNullMismatch", member),
                    source,
                );
            }
        }

        config.format_providers = registry.clone();
        config.member_overrides = resolved;

        let config = config.seal()?;
        tracing::debug!(
            "Resolved mapping configuration {} ({} overridden fields)",
            config.fingerprint(),
            config.provenance().field_sources().len()
        );
        Ok(config)
    }
}
