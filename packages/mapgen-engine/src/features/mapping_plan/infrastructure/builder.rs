//! Mapping Plan Builder
//!
//! Drives the member matcher and the conversion resolver recursively. Each
//! distinct `PlanKey` is built once per run:
//!
//! - a key already staged or cached is returned as is
//! - a key on the visiting stack is returned as a forward reference, which
//!   closes cycles in self- or mutually-referencing type graphs
//! - otherwise the key is pushed, its body built, and the finished plan is
//!   staged
//!
//! Staged plans reach the shared cache only when the outermost frame
//! finishes, as one batch, so the cache never holds a plan whose forward
//! references are unfinished. A failed build publishes nothing.
//!
//! Nested occurrences of the request's root pair reuse the request
//! configuration, so they close on the root plan instead of planning the
//! pair again without its member overrides.
//!
//! Recursion depth is bounded by the number of distinct reachable pairs.

use crate::config::{ConfigError, ConfigResult, MappingConfiguration};
use crate::features::conversion::{
    build_enum_plan, guard_member, report_unmapped_values, ConversionContext, ConversionResolver,
    NestedPlanner,
};
use crate::features::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsCollector};
use crate::features::mapping_plan::domain::{MemberAssignment, PlanKey, TypePlan, TypePlanBody};
use crate::features::mapping_plan::infrastructure::plan_cache::PlanCache;
use crate::features::member_matching::MemberMatcher;
use crate::features::type_graph::domain::{TypeDescriptor, TypeKey};
use crate::features::type_graph::ports::TypeLookup;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;

/// Per-request build statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub plans_built: usize,
    pub cache_hits: usize,
    pub cycles_closed: usize,
}

/// Request root pair and the configuration it is planned with
struct RootBinding {
    source: TypeKey,
    target: TypeKey,
    config: Arc<MappingConfiguration>,
}

pub struct PlanBuilder<'r, L: TypeLookup + ?Sized> {
    graph: &'r L,
    cache: &'r PlanCache,
    collector: &'r DiagnosticsCollector,
    matcher: MemberMatcher,
    resolver: ConversionResolver,
    root: Option<RootBinding>,
    visiting: Vec<PlanKey>,
    staged: FxHashMap<PlanKey, TypePlan>,
    stats: BuildStats,
}

impl<'r, L: TypeLookup + ?Sized> PlanBuilder<'r, L> {
    pub fn new(graph: &'r L, cache: &'r PlanCache, collector: &'r DiagnosticsCollector) -> Self {
        Self {
            graph,
            cache,
            collector,
            matcher: MemberMatcher::new(),
            resolver: ConversionResolver::new(),
            root: None,
            visiting: Vec::new(),
            staged: FxHashMap::default(),
            stats: BuildStats::default(),
        }
    }

    /// Plan every occurrence of `source -> target` with `config`
    pub fn with_root(
        mut self,
        source: TypeKey,
        target: TypeKey,
        config: Arc<MappingConfiguration>,
    ) -> Self {
        self.root = Some(RootBinding {
            source,
            target,
            config,
        });
        self
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn lookup(&self, key: &TypeKey) -> ConfigResult<&'r TypeDescriptor> {
        let graph: &'r L = self.graph;
        graph
            .lookup(key)
            .ok_or_else(|| ConfigError::UnknownType(key.to_string()))
    }

    fn config_for(
        &self,
        source: &TypeKey,
        target: &TypeKey,
        config: &Arc<MappingConfiguration>,
    ) -> Arc<MappingConfiguration> {
        match &self.root {
            Some(root) if root.source == *source && root.target == *target => {
                Arc::clone(&root.config)
            }
            _ => Arc::clone(config),
        }
    }

    /// Move every staged plan to the shared cache
    fn publish(&mut self) {
        if self.staged.is_empty() {
            return;
        }
        let staged = std::mem::take(&mut self.staged);
        let count = staged.len();
        let added = self.cache.publish(staged.into_values());
        tracing::debug!("Published {} plans ({} new)", count, added);
    }

    fn build_body(
        &mut self,
        source: &'r TypeDescriptor,
        target: &'r TypeDescriptor,
        config: &Arc<MappingConfiguration>,
    ) -> ConfigResult<Option<TypePlanBody>> {
        if source.is_object() && target.is_object() {
            return self.build_object(source, target, config).map(Some);
        }

        if source.is_enum() && target.is_enum() {
            let plan = build_enum_plan(source, target, config)?;
            report_unmapped_values(&plan, source, target, config, self.collector);
            return Ok(Some(TypePlanBody::Enum(plan)));
        }

        let nested = config.for_nested()?;
        let ctx = ConversionContext {
            copy: config.copy_behavior(),
            string_format: None,
            nested_config: &nested,
            registry: config.format_providers(),
        };
        let resolver = self.resolver;
        let node = resolver.resolve(source, target, &ctx, self)?;
        Ok(node.map(|node| TypePlanBody::Conversion { node }))
    }

    fn build_object(
        &mut self,
        source: &'r TypeDescriptor,
        target: &'r TypeDescriptor,
        config: &Arc<MappingConfiguration>,
    ) -> ConfigResult<TypePlanBody> {
        let mut set = self.matcher.match_members(source, target, config)?;
        let resolver = self.resolver;
        let mut assignments = Vec::with_capacity(set.pairs.len());
        let mut unconvertible = Vec::new();

        for pair in set.pairs.clone() {
            let source_type = self.lookup(&pair.source.type_key)?;
            let target_type = self.lookup(&pair.target.type_key)?;
            let member = pair.target.name.as_str();

            let policy = config.member_policy(member);
            let nested = config.nested_for_member(member)?;
            let ctx = ConversionContext {
                copy: policy.copy,
                string_format: config.member_overrides().string_format(member),
                nested_config: &nested,
                registry: config.format_providers(),
            };

            let Some(node) = resolver.resolve(source_type, target_type, &ctx, self)? else {
                tracing::warn!(
                    "{}.{} -> {}.{}: no conversion from '{}' to '{}'",
                    source.key,
                    pair.source.name,
                    target.key,
                    member,
                    source_type.key,
                    target_type.key
                );
                unconvertible.push(member);
                continue;
            };

            let guarded = guard_member(node, pair.source, pair.target, &policy);
            if guarded.mismatch_risk {
                self.collector.report(
                    config.as_ref(),
                    Diagnostic::new(
                        DiagnosticKind::NullMismatchRisk,
                        format!(
                            "Nullable source member '{}' feeds non-nullable target member '{}'",
                            pair.source.name, member
                        ),
                    )
                    .with_types(&source.key, &target.key)
                    .with_member(member),
                );
            }

            assignments.push(MemberAssignment {
                source_member: pair.source.name.clone(),
                target_member: member.to_string(),
                origin: pair.origin,
                node: guarded.node,
            });
        }

        for member in unconvertible {
            set.demote(member);
        }
        self.matcher.report(&set, source, target, config, self.collector);

        Ok(TypePlanBody::Object { assignments })
    }
}

impl<L: TypeLookup + ?Sized> NestedPlanner for PlanBuilder<'_, L> {
    fn plan_for(
        &mut self,
        source: &TypeKey,
        target: &TypeKey,
        config: &Arc<MappingConfiguration>,
    ) -> ConfigResult<Option<PlanKey>> {
        let config = self.config_for(source, target, config);
        let key = PlanKey::new(source.clone(), target.clone(), config.fingerprint());

        if self.staged.contains_key(&key) || self.cache.contains(&key) {
            self.stats.cache_hits += 1;
            tracing::debug!("Plan cache hit: {}", key);
            return Ok(Some(key));
        }
        if self.visiting.contains(&key) {
            self.stats.cycles_closed += 1;
            tracing::trace!("Forward reference closes cycle at {}", key);
            return Ok(Some(key));
        }

        let source_type = self.lookup(source)?;
        let target_type = self.lookup(target)?;

        self.visiting.push(key.clone());
        let body = self.build_body(source_type, target_type, &config);
        self.visiting.pop();

        let outcome = body.map(|body| {
            body.map(|body| {
                let plan = TypePlan {
                    key: key.clone(),
                    body,
                };
                self.staged.insert(key.clone(), plan);
                self.stats.plans_built += 1;
                key
            })
        });

        if self.visiting.is_empty() {
            if outcome.is_ok() {
                self.publish();
            } else {
                self.staged.clear();
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigResolver, MapperConfig, MappingConfigPatch, MemberOverrides};
    use crate::features::mapping_plan::domain::MappingPlanNode;
    use crate::features::type_graph::{MemberDescriptor, TypeGraph, TypeGraphBuilder};

    fn config(settings: MappingConfigPatch) -> Arc<MappingConfiguration> {
        config_with(settings, MemberOverrides::new())
    }

    fn config_with(
        settings: MappingConfigPatch,
        overrides: MemberOverrides,
    ) -> Arc<MappingConfiguration> {
        Arc::new(
            ConfigResolver::resolve(
                &MappingConfigPatch::new(),
                &MapperConfig::new(),
                &settings,
                &overrides,
            )
            .unwrap(),
        )
    }

    /// Graph view that pretends one type does not exist
    struct Hiding<'g> {
        graph: &'g TypeGraph,
        hidden: TypeKey,
    }

    impl TypeLookup for Hiding<'_> {
        fn lookup(&self, key: &TypeKey) -> Option<&TypeDescriptor> {
            if *key == self.hidden {
                None
            } else {
                self.graph.get(key)
            }
        }
    }

    fn linked_list_graph() -> TypeGraph {
        TypeGraphBuilder::with_builtins()
            .add(
                TypeDescriptor::object("Node")
                    .with_member(MemberDescriptor::new("value", "int32"))
                    .with_member(MemberDescriptor::new("next", "Node").nullable()),
            )
            .add(
                TypeDescriptor::object("NodeDto")
                    .with_member(MemberDescriptor::new("value", "int64"))
                    .with_member(MemberDescriptor::new("next", "NodeDto").nullable()),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_self_reference_closes_with_forward_reference() {
        let graph = linked_list_graph();
        let cache = PlanCache::new();
        let collector = DiagnosticsCollector::new();
        let mut builder = PlanBuilder::new(&graph, &cache, &collector);
        let cfg = config(MappingConfigPatch::new());

        let key = builder
            .plan_for(&"Node".into(), &"NodeDto".into(), &cfg)
            .unwrap()
            .unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(builder.stats().cycles_closed, 1);
        assert_eq!(builder.stats().plans_built, 1);

        let plan = cache.get(&key).unwrap();
        let next = plan.assignment("next").unwrap();
        assert_eq!(next.node.child_key(), Some(&key));
        assert!(matches!(
            plan.assignment("value").unwrap().node,
            MappingPlanNode::PrimitiveConversion { .. }
        ));
        assert!(collector.is_empty());
    }

    #[test]
    fn test_cached_plan_is_reused() {
        let graph = linked_list_graph();
        let cache = PlanCache::new();
        let collector = DiagnosticsCollector::new();
        let cfg = config(MappingConfigPatch::new());

        let mut first = PlanBuilder::new(&graph, &cache, &collector);
        first
            .plan_for(&"Node".into(), &"NodeDto".into(), &cfg)
            .unwrap();

        let mut second = PlanBuilder::new(&graph, &cache, &collector);
        second
            .plan_for(&"Node".into(), &"NodeDto".into(), &cfg)
            .unwrap();
        assert_eq!(second.stats().cache_hits, 1);
        assert_eq!(second.stats().plans_built, 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unconvertible_member_is_reported_unmapped() {
        let graph = TypeGraphBuilder::with_builtins()
            .add(TypeDescriptor::object("Engine"))
            .add(TypeDescriptor::object("A").with_member(MemberDescriptor::new("engine", "Engine")))
            .add(TypeDescriptor::object("B").with_member(MemberDescriptor::new("engine", "int32")))
            .build()
            .unwrap();
        let cache = PlanCache::new();
        let collector = DiagnosticsCollector::new();
        let mut builder = PlanBuilder::new(&graph, &cache, &collector);

        let key = builder
            .plan_for(&"A".into(), &"B".into(), &config(MappingConfigPatch::new()))
            .unwrap()
            .unwrap();

        assert!(cache.get(&key).unwrap().assignments().is_empty());
        assert_eq!(collector.count_of(DiagnosticKind::UnmappedTargetMember), 1);
        assert_eq!(collector.count_of(DiagnosticKind::UnmappedSourceMember), 1);
    }

    #[test]
    fn test_scalar_pair_without_conversion_is_not_cached() {
        let graph = TypeGraphBuilder::with_builtins().build().unwrap();
        let cache = PlanCache::new();
        let collector = DiagnosticsCollector::new();
        let mut builder = PlanBuilder::new(&graph, &cache, &collector);

        let key = builder
            .plan_for(&"bool".into(), &"int32".into(), &config(MappingConfigPatch::new()))
            .unwrap();
        assert_eq!(key, None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unknown_type() {
        let graph = TypeGraphBuilder::with_builtins().build().unwrap();
        let cache = PlanCache::new();
        let collector = DiagnosticsCollector::new();
        let mut builder = PlanBuilder::new(&graph, &cache, &collector);

        let err = builder
            .plan_for(&"Ghost".into(), &"int32".into(), &config(MappingConfigPatch::new()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownType(name) if name == "Ghost"));
    }

    #[test]
    fn test_root_pair_reuses_request_configuration() {
        let graph = TypeGraphBuilder::with_builtins()
            .add(
                TypeDescriptor::object("Node")
                    .with_member(MemberDescriptor::new("value", "int32"))
                    .with_member(MemberDescriptor::new("next", "Node").nullable()),
            )
            .add(
                TypeDescriptor::object("NodeDto")
                    .with_member(MemberDescriptor::new("value", "int64"))
                    .with_member(MemberDescriptor::new("extra", "string"))
                    .with_member(MemberDescriptor::new("next", "NodeDto").nullable()),
            )
            .build()
            .unwrap();
        let cache = PlanCache::new();
        let collector = DiagnosticsCollector::new();
        let cfg = config_with(
            MappingConfigPatch::new(),
            MemberOverrides::new().ignore_target("extra"),
        );
        let mut builder = PlanBuilder::new(&graph, &cache, &collector).with_root(
            "Node".into(),
            "NodeDto".into(),
            Arc::clone(&cfg),
        );

        let key = builder
            .plan_for(&"Node".into(), &"NodeDto".into(), &cfg)
            .unwrap()
            .unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(builder.stats().cycles_closed, 1);
        let plan = cache.get(&key).unwrap();
        assert_eq!(plan.assignment("next").unwrap().node.child_key(), Some(&key));
        assert!(collector.is_empty());
    }

    #[test]
    fn test_failed_build_publishes_nothing() {
        let graph = TypeGraphBuilder::with_builtins()
            .add(
                TypeDescriptor::object("Inner")
                    .with_member(MemberDescriptor::new("value", "int32")),
            )
            .add(
                TypeDescriptor::object("InnerDto")
                    .with_member(MemberDescriptor::new("value", "int32")),
            )
            .add(TypeDescriptor::object("Leaf"))
            .add(TypeDescriptor::object("LeafDto"))
            .add(
                TypeDescriptor::object("Outer")
                    .with_member(MemberDescriptor::new("first", "Inner"))
                    .with_member(MemberDescriptor::new("second", "Leaf")),
            )
            .add(
                TypeDescriptor::object("OuterDto")
                    .with_member(MemberDescriptor::new("first", "InnerDto"))
                    .with_member(MemberDescriptor::new("second", "LeafDto")),
            )
            .build()
            .unwrap();
        let lookup = Hiding {
            graph: &graph,
            hidden: "LeafDto".into(),
        };
        let cache = PlanCache::new();
        let collector = DiagnosticsCollector::new();
        let mut builder = PlanBuilder::new(&lookup, &cache, &collector);

        let err = builder
            .plan_for(&"Outer".into(), &"OuterDto".into(), &config(MappingConfigPatch::new()))
            .unwrap_err();

        assert!(matches!(err, ConfigError::UnknownType(name) if name == "LeafDto"));
        // Inner -> InnerDto finished before the failure but never became visible
        assert_eq!(builder.stats().plans_built, 1);
        assert!(cache.is_empty());
    }
}
