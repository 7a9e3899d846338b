//! Build Plan UseCase
//!
//! Entry point for one mapping request: validates the root pair against the
//! request's overrides, resolves the root conversion, applies the method
//! return null policy and gathers every plan reachable from the root.

use crate::config::{ConfigError, ConfigResult, MappingConfiguration};
use crate::features::conversion::{guard_root, ConversionContext, ConversionResolver};
use crate::features::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsCollector};
use crate::features::mapping_plan::domain::{MappingPlan, PlanKey, TypePlan};
use crate::features::mapping_plan::infrastructure::{BuildStats, PlanBuilder, PlanCache};
use crate::features::type_graph::domain::TypeRef;
use crate::features::type_graph::ports::TypeLookup;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

/// Input for one mapping request
pub struct BuildPlanInput<'a> {
    pub method: &'a str,
    pub source: &'a TypeRef,
    pub target: &'a TypeRef,
    pub config: Arc<MappingConfiguration>,
}

#[derive(Debug, Clone)]
pub struct BuildPlanOutput {
    pub plan: MappingPlan,
    pub stats: BuildStats,
}

pub struct BuildPlanUseCase<'r, L: TypeLookup + ?Sized> {
    graph: &'r L,
    cache: &'r PlanCache,
    collector: &'r DiagnosticsCollector,
}

impl<'r, L: TypeLookup + ?Sized> BuildPlanUseCase<'r, L> {
    pub fn new(graph: &'r L, cache: &'r PlanCache, collector: &'r DiagnosticsCollector) -> Self {
        Self {
            graph,
            cache,
            collector,
        }
    }

    pub fn execute(&self, input: BuildPlanInput<'_>) -> ConfigResult<BuildPlanOutput> {
        let BuildPlanInput {
            method,
            source,
            target,
            config,
        } = input;

        let mut builder = PlanBuilder::new(self.graph, self.cache, self.collector).with_root(
            source.key.clone(),
            target.key.clone(),
            Arc::clone(&config),
        );
        let source_type = builder.lookup(&source.key)?;
        let target_type = builder.lookup(&target.key)?;

        let overrides = config.member_overrides();
        if overrides.has_member_overrides() && !(source_type.is_object() && target_type.is_object())
        {
            return Err(ConfigError::MemberOverridesOnNonObject {
                source_type: source.key.to_string(),
                target_type: target.key.to_string(),
            });
        }
        if !overrides.enum_values.is_empty() && !(source_type.is_enum() && target_type.is_enum()) {
            return Err(ConfigError::EnumOverridesOnNonEnum {
                source_type: source.key.to_string(),
                target_type: target.key.to_string(),
            });
        }

        // The root pair is planned with the request configuration itself so
        // member and enum value overrides reach it, including where the pair
        // recurs below the root; everything else is nested.
        let ctx = ConversionContext {
            copy: config.copy_behavior(),
            string_format: None,
            nested_config: &config,
            registry: config.format_providers(),
        };
        let node = ConversionResolver::new()
            .resolve(source_type, target_type, &ctx, &mut builder)?
            .ok_or_else(|| ConfigError::NoConversion {
                source_type: source.key.to_string(),
                target_type: target.key.to_string(),
            })?;

        let guarded = guard_root(
            node,
            source.nullable,
            target.nullable,
            target_type,
            config.throw_on_mapping_null_mismatch(),
        );
        if guarded.mismatch_risk {
            self.collector.report(
                config.as_ref(),
                Diagnostic::new(
                    DiagnosticKind::NullMismatchRisk,
                    format!(
                        "Method '{}' cannot produce a non-null '{}' from a null source",
                        method, target.key
                    ),
                )
                .with_types(&source.key, &target.key),
            );
        }

        let root = guarded.node;
        let plans = collect_reachable(root.child_key(), self.cache);
        let stats = builder.stats();

        tracing::info!(
            "Built plan {}: {} -> {} ({} plans reachable, {} built, {} cache hits, {} cycles closed)",
            method,
            source,
            target,
            plans.len(),
            stats.plans_built,
            stats.cache_hits,
            stats.cycles_closed
        );

        Ok(BuildPlanOutput {
            plan: MappingPlan {
                method: method.to_string(),
                source: source.key.clone(),
                target: target.key.clone(),
                config: config.fingerprint(),
                root,
                plans,
            },
            stats,
        })
    }
}

/// Breadth-first walk over plan references starting at `root`
fn collect_reachable(
    root: Option<&PlanKey>,
    cache: &PlanCache,
) -> BTreeMap<PlanKey, Arc<TypePlan>> {
    let mut plans = BTreeMap::new();
    let mut queue: VecDeque<PlanKey> = root.cloned().into_iter().collect();

    while let Some(key) = queue.pop_front() {
        if plans.contains_key(&key) {
            continue;
        }
        let Some(plan) = cache.get(&key) else {
            tracing::warn!("Plan {} referenced but never completed", key);
            continue;
        };
        queue.extend(plan.child_keys().into_iter().cloned());
        plans.insert(key, plan);
    }

    plans
}
