//! Member matcher
//!
//! Pairs readable source members with writable target members for one type
//! pair: ignore lists first, then obsolete filtering, explicit renames, and
//! name equality under the configured case policy.

use crate::config::{ConfigError, ConfigResult, MappingConfiguration, OverrideSide};
use crate::features::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsCollector};
use crate::features::member_matching::domain::{
    AmbiguousMatch, MatchOrigin, MemberMatchSet, MemberPair,
};
use crate::features::member_matching::infrastructure::name_index::NameIndex;
use crate::features::type_graph::domain::{MemberDescriptor, TypeDescriptor};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct MemberMatcher;

impl MemberMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Match the members of `source` against `target`.
    ///
    /// Overrides naming members the types do not declare are configuration
    /// errors.
    pub fn match_members<'g>(
        &self,
        source: &'g TypeDescriptor,
        target: &'g TypeDescriptor,
        config: &MappingConfiguration,
    ) -> ConfigResult<MemberMatchSet<'g>> {
        let overrides = config.member_overrides();

        let mut source_pool: Vec<&'g MemberDescriptor> =
            source.members.iter().filter(|m| m.is_readable()).collect();
        let mut target_pool: Vec<&'g MemberDescriptor> =
            target.members.iter().filter(|m| m.is_writable()).collect();

        // 1. ignore lists
        for name in &overrides.ignored_sources {
            require_declared(source, name, OverrideSide::Source)?;
            source_pool.retain(|m| &m.name != name);
        }
        for name in &overrides.ignored_targets {
            require_declared(target, name, OverrideSide::Target)?;
            target_pool.retain(|m| &m.name != name);
        }

        // 2. obsolete filtering; renamed members stay
        let renamed_sources: FxHashSet<&str> =
            overrides.renames.values().map(String::as_str).collect();
        let strategy = config.ignore_obsolete_members_strategy();
        if strategy.ignores_source() {
            source_pool.retain(|m| !m.obsolete || renamed_sources.contains(m.name.as_str()));
        }
        if strategy.ignores_target() {
            target_pool.retain(|m| !m.obsolete || overrides.renames.contains_key(&m.name));
        }

        // 3. renames must resolve on both sides
        let mut renamed: Vec<(&'g MemberDescriptor, &'g MemberDescriptor)> = Vec::new();
        for (target_name, source_name) in &overrides.renames {
            let target_member =
                find_in_pool(&target_pool, target, target_name, OverrideSide::Target)?;
            let source_member =
                find_in_pool(&source_pool, source, source_name, OverrideSide::Source)?;
            renamed.push((source_member, target_member));
        }

        for target_name in overrides
            .string_formats
            .keys()
            .chain(overrides.settings.keys())
        {
            require_declared(target, target_name, OverrideSide::Target)?;
        }

        // 4. remaining targets pair by name, in target declaration order
        let index = NameIndex::build(source_pool.iter().copied(), config.name_strategy());
        let mut set = MemberMatchSet::default();

        for &target_member in &target_pool {
            if let Some(&(source_member, _)) = renamed
                .iter()
                .find(|(_, t)| t.name == target_member.name)
            {
                set.pairs.push(MemberPair {
                    source: source_member,
                    target: target_member,
                    origin: MatchOrigin::Rename,
                });
                continue;
            }

            match index.candidates(&target_member.name) {
                [] => set.unmatched_target.push(target_member),
                [only] => set.pairs.push(MemberPair {
                    source: *only,
                    target: target_member,
                    origin: MatchOrigin::Name,
                }),
                several => {
                    set.unmatched_target.push(target_member);
                    set.ambiguous.push(AmbiguousMatch {
                        target: target_member,
                        candidates: several.to_vec(),
                    });
                }
            }
        }

        set.unmatched_source = source_pool
            .into_iter()
            .filter(|m| !set.feeds_any(&m.name))
            .collect();

        Ok(set)
    }

    /// Raise unmatched/ambiguous diagnostics according to the required
    /// mapping strategy.
    pub fn report(
        &self,
        set: &MemberMatchSet<'_>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
        config: &MappingConfiguration,
        collector: &DiagnosticsCollector,
    ) {
        let required = config.required_mapping_strategy();

        for member in &set.unmatched_target {
            if required.reports_target() {
                collector.report(
                    config,
                    Diagnostic::new(
                        DiagnosticKind::UnmappedTargetMember,
                        format!("Target member '{}' has no source", member.name),
                    )
                    .with_types(&source.key, &target.key)
                    .with_member(member.name.as_str()),
                );
            } else {
                tracing::debug!(
                    "Unmapped target member {}.{} not reported ({:?})",
                    target.key,
                    member.name,
                    required
                );
            }
        }

        for member in &set.unmatched_source {
            if required.reports_source() {
                collector.report(
                    config,
                    Diagnostic::new(
                        DiagnosticKind::UnmappedSourceMember,
                        format!("Source member '{}' is not mapped", member.name),
                    )
                    .with_types(&source.key, &target.key)
                    .with_member(member.name.as_str()),
                );
            } else {
                tracing::debug!(
                    "Unmapped source member {}.{} not reported ({:?})",
                    source.key,
                    member.name,
                    required
                );
            }
        }

        for ambiguous in &set.ambiguous {
            collector.report(
                config,
                Diagnostic::new(
                    DiagnosticKind::AmbiguousMemberMatch,
                    format!(
                        "Target member '{}' matches several source members: {}",
                        ambiguous.target.name,
                        ambiguous.candidate_names().join(", ")
                    ),
                )
                .with_types(&source.key, &target.key)
                .with_member(ambiguous.target.name.as_str()),
            );
        }
    }
}

fn require_declared(ty: &TypeDescriptor, name: &str, side: OverrideSide) -> ConfigResult<()> {
    if ty.member(name).is_some() {
        return Ok(());
    }
    Err(ConfigError::unknown_member(
        side,
        name,
        ty.key.as_str(),
        ty.members.iter().map(|m| m.name.as_str()),
    ))
}

fn find_in_pool<'g>(
    pool: &[&'g MemberDescriptor],
    ty: &TypeDescriptor,
    name: &str,
    side: OverrideSide,
) -> ConfigResult<&'g MemberDescriptor> {
    pool.iter().copied().find(|m| m.name == name).ok_or_else(|| {
        ConfigError::unknown_member(
            side,
            name,
            ty.key.as_str(),
            pool.iter().map(|m| m.name.as_str()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ConfigResolver, IgnoreObsoleteMembersStrategy, MapperConfig, MappingConfigPatch,
        MemberOverrides, PropertyNameMappingStrategy, RequiredMappingStrategy,
    };

    fn config(settings: MappingConfigPatch, overrides: MemberOverrides) -> MappingConfiguration {
        ConfigResolver::resolve(
            &MappingConfigPatch::new(),
            &MapperConfig::new(),
            &settings,
            &overrides,
        )
        .unwrap()
    }

    fn car() -> TypeDescriptor {
        TypeDescriptor::object("Car")
            .with_member(MemberDescriptor::new("id", "int32"))
            .with_member(MemberDescriptor::new("modelName", "string"))
    }

    fn car_dto() -> TypeDescriptor {
        TypeDescriptor::object("CarDto")
            .with_member(MemberDescriptor::new("id", "int32"))
            .with_member(MemberDescriptor::new("ModelName", "string"))
    }

    #[test]
    fn test_case_insensitive_pairs_once() {
        let (src, tgt) = (car(), car_dto());
        let cfg = config(
            MappingConfigPatch::new()
                .property_name_mapping_strategy(PropertyNameMappingStrategy::CaseInsensitive),
            MemberOverrides::new(),
        );
        let set = MemberMatcher::new().match_members(&src, &tgt, &cfg).unwrap();

        assert_eq!(set.pairs.len(), 2);
        assert!(set.is_complete());
        assert_eq!(set.pair_for_target("ModelName").unwrap().source.name, "modelName");
    }

    #[test]
    fn test_case_sensitive_leaves_both_unmatched() {
        let (src, tgt) = (car(), car_dto());
        let cfg = config(MappingConfigPatch::new(), MemberOverrides::new());
        let set = MemberMatcher::new().match_members(&src, &tgt, &cfg).unwrap();

        assert_eq!(set.pairs.len(), 1);
        assert_eq!(set.unmatched_target[0].name, "ModelName");
        assert_eq!(set.unmatched_source[0].name, "modelName");
    }

    #[test]
    fn test_rename_pairs_and_bypasses_obsolete_filter() {
        let src = TypeDescriptor::object("Car")
            .with_member(MemberDescriptor::new("legacyName", "string").obsolete());
        let tgt =
            TypeDescriptor::object("CarDto").with_member(MemberDescriptor::new("Name", "string"));
        let cfg = config(
            MappingConfigPatch::new()
                .ignore_obsolete_members_strategy(IgnoreObsoleteMembersStrategy::Both),
            MemberOverrides::new().rename("legacyName", "Name"),
        );
        let set = MemberMatcher::new().match_members(&src, &tgt, &cfg).unwrap();

        assert_eq!(set.pairs.len(), 1);
        assert_eq!(set.pairs[0].origin, MatchOrigin::Rename);
    }

    #[test]
    fn test_unknown_rename_source_suggests_closest() {
        let (src, tgt) = (car(), car_dto());
        let cfg = config(
            MappingConfigPatch::new(),
            MemberOverrides::new().rename("modelNam", "ModelName"),
        );
        let err = MemberMatcher::new().match_members(&src, &tgt, &cfg).unwrap_err();
        match err {
            ConfigError::UnknownMember {
                side, suggestion, ..
            } => {
                assert_eq!(side, OverrideSide::Source);
                assert!(suggestion.contains("modelName"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_ignored_member_is_an_error() {
        let (src, tgt) = (car(), car_dto());
        let cfg = config(MappingConfigPatch::new(), MemberOverrides::new().ignore_target("color"));
        assert!(matches!(
            MemberMatcher::new().match_members(&src, &tgt, &cfg),
            Err(ConfigError::UnknownMember {
                side: OverrideSide::Target,
                ..
            })
        ));
    }

    #[test]
    fn test_obsolete_members_dropped_per_side() {
        let src = TypeDescriptor::object("A")
            .with_member(MemberDescriptor::new("old", "int32").obsolete());
        let tgt = TypeDescriptor::object("B")
            .with_member(MemberDescriptor::new("gone", "int32").obsolete());

        let only_source = config(
            MappingConfigPatch::new()
                .ignore_obsolete_members_strategy(IgnoreObsoleteMembersStrategy::Source),
            MemberOverrides::new(),
        );
        let set = MemberMatcher::new().match_members(&src, &tgt, &only_source).unwrap();
        assert!(set.unmatched_source.is_empty());
        assert_eq!(set.unmatched_target.len(), 1);

        let keep = config(MappingConfigPatch::new(), MemberOverrides::new());
        let set = MemberMatcher::new().match_members(&src, &tgt, &keep).unwrap();
        assert_eq!(set.unmatched_source.len(), 1);
        assert_eq!(set.unmatched_target.len(), 1);
    }

    #[test]
    fn test_direction_and_accessibility_filter_pools() {
        use crate::features::type_graph::domain::Accessibility;

        let src = TypeDescriptor::object("A")
            .with_member(MemberDescriptor::new("writeOnly", "int32").write_only())
            .with_member(
                MemberDescriptor::new("hidden", "int32").with_accessibility(Accessibility::Private),
            );
        let tgt = TypeDescriptor::object("B")
            .with_member(MemberDescriptor::new("writeOnly", "int32"))
            .with_member(MemberDescriptor::new("computed", "int32").read_only());

        let cfg = config(MappingConfigPatch::new(), MemberOverrides::new());
        let set = MemberMatcher::new().match_members(&src, &tgt, &cfg).unwrap();
        assert!(set.pairs.is_empty());
        assert!(set.unmatched_source.is_empty());
        assert_eq!(set.unmatched_target.len(), 1);
        assert_eq!(set.unmatched_target[0].name, "writeOnly");
    }

    #[test]
    fn test_ambiguous_match() {
        let src = TypeDescriptor::object("A")
            .with_member(MemberDescriptor::new("name", "string"))
            .with_member(MemberDescriptor::new("Name", "string"));
        let tgt = TypeDescriptor::object("B").with_member(MemberDescriptor::new("NAME", "string"));
        let cfg = config(
            MappingConfigPatch::new()
                .property_name_mapping_strategy(PropertyNameMappingStrategy::CaseInsensitive),
            MemberOverrides::new(),
        );
        let matcher = MemberMatcher::new();
        let set = matcher.match_members(&src, &tgt, &cfg).unwrap();

        assert_eq!(set.ambiguous.len(), 1);
        assert_eq!(set.ambiguous[0].candidate_names(), vec!["name", "Name"]);
        assert_eq!(set.unmatched_target.len(), 1);

        let collector = DiagnosticsCollector::new();
        matcher.report(&set, &src, &tgt, &cfg, &collector);
        assert_eq!(collector.count_of(DiagnosticKind::AmbiguousMemberMatch), 1);
    }

    #[test]
    fn test_report_follows_required_strategy() {
        let (src, tgt) = (car(), car_dto());
        let matcher = MemberMatcher::new();

        let cases = [
            (RequiredMappingStrategy::Both, 1, 1),
            (RequiredMappingStrategy::Source, 1, 0),
            (RequiredMappingStrategy::Target, 0, 1),
            (RequiredMappingStrategy::None, 0, 0),
        ];
        for (strategy, sources, targets) in cases {
            let cfg = config(
                MappingConfigPatch::new().required_mapping_strategy(strategy),
                MemberOverrides::new(),
            );
            let set = matcher.match_members(&src, &tgt, &cfg).unwrap();
            let collector = DiagnosticsCollector::new();
            matcher.report(&set, &src, &tgt, &cfg, &collector);

            assert_eq!(
                collector.count_of(DiagnosticKind::UnmappedSourceMember),
                sources,
                "{:?}",
                strategy
            );
            assert_eq!(
                collector.count_of(DiagnosticKind::UnmappedTargetMember),
                targets,
                "{:?}",
                strategy
            );
        }
    }
}
