//! Property-based tests for layered configuration and member matching
//!
//! Invariants that should hold for ALL inputs:
//! - Precedence: the strongest scope that sets a value wins
//! - Provenance: the winning scope is the one recorded
//! - Fingerprint: equal settings ⇔ equal fingerprints
//! - Matching: case-insensitive pairing never depends on letter case

use mapgen_engine::config::{
    ConfigError, ConfigResolver, ConfigSource, MapperConfig, MappingConfigPatch, MemberOverrides,
    OverrideSide, PropertyNameMappingStrategy,
};
use mapgen_engine::features::member_matching::MemberMatcher;
use mapgen_engine::{MemberDescriptor, TypeDescriptor};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn deep_cloning_patch(value: Option<bool>) -> MappingConfigPatch {
    match value {
        Some(v) => MappingConfigPatch::new().use_deep_cloning(v),
        None => MappingConfigPatch::new(),
    }
}

fn resolve(
    assembly: Option<bool>,
    mapper: Option<bool>,
    method: Option<bool>,
) -> mapgen_engine::MappingConfiguration {
    ConfigResolver::resolve(
        &deep_cloning_patch(assembly),
        &MapperConfig::new().with_settings(deep_cloning_patch(mapper)),
        &deep_cloning_patch(method),
        &MemberOverrides::new(),
    )
    .unwrap()
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

proptest! {
    #[test]
    fn prop_strongest_scope_wins(
        assembly in proptest::option::of(any::<bool>()),
        mapper in proptest::option::of(any::<bool>()),
        method in proptest::option::of(any::<bool>()),
    ) {
        let config = resolve(assembly, mapper, method);
        let expected = method.or(mapper).or(assembly).unwrap_or(false);
        prop_assert_eq!(config.use_deep_cloning(), expected);

        let expected_source = if method.is_some() {
            ConfigSource::Method
        } else if mapper.is_some() {
            ConfigSource::Mapper
        } else if assembly.is_some() {
            ConfigSource::Assembly
        } else {
            ConfigSource::BuiltIn
        };
        prop_assert_eq!(config.provenance().get_source("UseDeepCloning"), expected_source);
    }

    #[test]
    fn prop_fingerprint_tracks_effective_settings(
        a in proptest::option::of(any::<bool>()),
        b in proptest::option::of(any::<bool>()),
    ) {
        // Same effective value from different scopes: same fingerprint
        let from_method = resolve(None, None, a);
        let from_assembly = resolve(a, None, None);
        prop_assert_eq!(from_method.fingerprint(), from_assembly.fingerprint());

        let left = resolve(None, None, a);
        let right = resolve(None, None, b);
        let same_value = a.unwrap_or(false) == b.unwrap_or(false);
        prop_assert_eq!(left.fingerprint() == right.fingerprint(), same_value);
    }

    #[test]
    fn prop_case_insensitive_pairs_every_member(
        names in proptest::collection::btree_set("[a-z]{1,8}", 1..12),
    ) {
        let source = names.iter().fold(TypeDescriptor::object("Source"), |ty, name| {
            ty.with_member(MemberDescriptor::new(name.as_str(), "int32"))
        });
        let target = names.iter().fold(TypeDescriptor::object("Target"), |ty, name| {
            ty.with_member(MemberDescriptor::new(capitalize(name), "int32"))
        });

        let insensitive = ConfigResolver::resolve(
            &MappingConfigPatch::new(),
            &MapperConfig::new(),
            &MappingConfigPatch::new()
                .property_name_mapping_strategy(PropertyNameMappingStrategy::CaseInsensitive),
            &MemberOverrides::new(),
        )
        .unwrap();
        let set = MemberMatcher::new().match_members(&source, &target, &insensitive).unwrap();
        prop_assert_eq!(set.pairs.len(), names.len());
        prop_assert!(set.is_complete());

        // Capitalized names never match case-sensitively
        let sensitive = ConfigResolver::resolve(
            &MappingConfigPatch::new(),
            &MapperConfig::new(),
            &MappingConfigPatch::new(),
            &MemberOverrides::new(),
        )
        .unwrap();
        let set = MemberMatcher::new().match_members(&source, &target, &sensitive).unwrap();
        prop_assert!(set.pairs.is_empty());
        prop_assert_eq!(set.unmatched_source.len(), names.len());
        prop_assert_eq!(set.unmatched_target.len(), names.len());
    }

    #[test]
    fn prop_unknown_member_suggests_declared_name(
        names in proptest::collection::btree_set("[a-z]{3,8}", 1..8),
    ) {
        let names: BTreeSet<String> = names;
        let declared = names.iter().next().unwrap().clone();
        let typo = format!("{}x", declared);
        prop_assume!(!names.contains(&typo));

        let err = ConfigError::unknown_member(
            OverrideSide::Source,
            typo.as_str(),
            "Source",
            names.iter().map(String::as_str),
        );
        // One insertion away from a declared name: suggestion is at distance ≤ 1
        let message = err.to_string();
        let suggested = names
            .iter()
            .any(|n| message.contains(&format!("Did you mean '{}'?", n)));
        prop_assert!(suggested);
    }
}
