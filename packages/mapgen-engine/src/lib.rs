/*
 * mapgen-engine - Mapping Resolution Engine
 *
 * Feature-First Hexagonal Architecture:
 * - config/      : Layered configuration (assembly → mapper → method → member)
 * - features/    : Vertical slices (type_graph → member_matching → conversion → mapping_plan)
 *                  plus diagnostics shared by all of them
 * - pipeline/    : Orchestration (one run = every method of every mapper)
 *
 * Output: deterministic mapping plans + diagnostics, serializable for a
 * code-emission backend.
 *
 * Performance:
 * - Rayon work-stealing across independent requests
 * - DashMap plan cache keyed by (source, target, config fingerprint)
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Builder entry points carry every scope
#![allow(clippy::type_complexity)] // Lifetimed job tuples in the engine
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::collapsible_if)] // Readability over brevity

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Layered mapping configuration
pub mod config;

/// Crate-level error type
pub mod errors;

/// Vertical feature slices
pub mod features;

/// Run orchestration
pub mod pipeline;

pub use config::{
    ConfigError, ConfigLayersV1, ConfigResolver, MapperConfig, MappingConfigPatch,
    MappingConfiguration, MemberOverrides,
};
pub use errors::{MapgenError, Result};
pub use features::diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use features::mapping_plan::{MappingPlan, MappingPlanNode, PlanKey, TypePlan};
pub use features::type_graph::{
    MemberDescriptor, TypeDescriptor, TypeGraph, TypeGraphBuilder, TypeKey, TypeLookup, TypeRef,
};
pub use pipeline::{MapperDefinition, MappingEngine, MappingRequest, MappingRun};
