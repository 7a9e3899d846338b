//! Mapping Engine
//!
//! Resolves every method of every mapper in one run. Requests are independent:
//! each gets its own effective configuration and plan builder, while the plan
//! cache and the diagnostics collector are shared by the whole run.
//!
//! With the `parallel` feature (default) requests run on the rayon pool.
//! Outcomes keep input order either way and diagnostics are finalized after
//! every request has finished, so the run output does not depend on
//! scheduling.

use crate::config::{
    ConfigError, ConfigLayersV1, ConfigResolver, ConfigResult, ConfigSource, MappingConfigPatch,
    MappingConfiguration,
};
use crate::features::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsCollector};
use crate::features::mapping_plan::{BuildPlanInput, BuildPlanOutput, BuildPlanUseCase, PlanCache};
use crate::features::type_graph::ports::TypeLookup;
use crate::pipeline::request::{MapperDefinition, MappingRequest};
use crate::pipeline::result::{MappingRun, RequestOutcome};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

pub struct MappingEngine<'g, L: TypeLookup + ?Sized> {
    graph: &'g L,
    assembly: MappingConfigPatch,
}

impl<'g, L: TypeLookup + ?Sized> MappingEngine<'g, L> {
    pub fn new(graph: &'g L) -> Self {
        Self {
            graph,
            assembly: MappingConfigPatch::default(),
        }
    }

    /// Assembly-wide defaults shared by every mapper
    pub fn with_assembly(mut self, assembly: MappingConfigPatch) -> Self {
        self.assembly = assembly;
        self
    }

    /// Assembly defaults from a loaded layer file
    pub fn with_layers(self, layers: &ConfigLayersV1) -> Self {
        self.with_assembly(layers.assembly.clone())
    }

    pub fn run(&self, mappers: &[MapperDefinition]) -> MappingRun {
        let jobs: Vec<(&MapperDefinition, &MappingRequest)> = mappers
            .iter()
            .flat_map(|mapper| mapper.methods.iter().map(move |request| (mapper, request)))
            .collect();

        let cache = PlanCache::new();
        let collector = DiagnosticsCollector::new();
        let start = Instant::now();
        tracing::info!(
            "Mapping run started: {} mapper(s), {} request(s)",
            mappers.len(),
            jobs.len()
        );

        #[cfg(feature = "parallel")]
        let outcomes: Vec<RequestOutcome> = jobs
            .par_iter()
            .map(|&(mapper, request)| self.resolve_request(mapper, request, &cache, &collector))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<RequestOutcome> = jobs
            .iter()
            .map(|&(mapper, request)| self.resolve_request(mapper, request, &cache, &collector))
            .collect();

        let run = MappingRun {
            outcomes,
            diagnostics: collector.finalize(),
            cached_plans: cache.len(),
        };

        let stats = run.stats();
        tracing::info!(
            "Mapping run finished in {:?}: {} plan(s) cached, {} built, {} cache hits, {} failed request(s), {} diagnostic(s)",
            start.elapsed(),
            run.cached_plans,
            stats.plans_built,
            stats.cache_hits,
            run.failures().count(),
            run.diagnostics.len()
        );
        run
    }

    fn resolve_request(
        &self,
        mapper: &MapperDefinition,
        request: &MappingRequest,
        cache: &PlanCache,
        collector: &DiagnosticsCollector,
    ) -> RequestOutcome {
        let result = self.build(mapper, request, cache, collector);

        if let Err(err) = &result {
            tracing::warn!("{}.{} aborted: {}", mapper.name, request.method, err);
            if err.is_ambiguous_default_provider() {
                self.report_ambiguous_default(mapper, request, err, collector);
            }
        }

        RequestOutcome {
            mapper: mapper.name.clone(),
            method: request.method.clone(),
            result,
        }
    }

    fn build(
        &self,
        mapper: &MapperDefinition,
        request: &MappingRequest,
        cache: &PlanCache,
        collector: &DiagnosticsCollector,
    ) -> ConfigResult<BuildPlanOutput> {
        let config = ConfigResolver::resolve(
            &self.assembly,
            &mapper.config,
            &request.settings,
            &request.member_overrides,
        )?;

        BuildPlanUseCase::new(self.graph, cache, collector).execute(BuildPlanInput {
            method: &request.method,
            source: &request.source,
            target: &request.target,
            config: Arc::new(config),
        })
    }

    /// Mirrors an aborted request as a diagnostic. The request never got an
    /// effective configuration, so severities come from the scopes that did
    /// resolve.
    fn report_ambiguous_default(
        &self,
        mapper: &MapperDefinition,
        request: &MappingRequest,
        err: &ConfigError,
        collector: &DiagnosticsCollector,
    ) {
        let mut policy = MappingConfiguration::defaults();
        self.assembly.apply_to(&mut policy, ConfigSource::Assembly);
        mapper.config.settings.apply_to(&mut policy, ConfigSource::Mapper);
        request.settings.apply_to(&mut policy, ConfigSource::Method);

        collector.report(
            &policy,
            Diagnostic::new(
                DiagnosticKind::AmbiguousDefaultFormatProvider,
                format!("Mapper '{}': {}", mapper.name, err),
            )
            .with_types(&request.source.key, &request.target.key)
            .with_member(request.method.as_str()),
        );
    }
}
