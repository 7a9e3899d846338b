//! Mapping Plans
//!
//! Builds the structured plan for one mapping request: per member pair the
//! conversion strategy, with nested plans memoized per
//! (source type, target type, configuration fingerprint).
//!
//! # Hexagonal Architecture
//!
//! ```text
//! application/ (BuildPlanUseCase - entry point)
//!           ↓
//! infrastructure/ (PlanBuilder, PlanCache)
//!           ↓
//! domain/ (PlanKey, MappingPlanNode, TypePlan, MappingPlan)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use mapgen_engine::features::mapping_plan::{BuildPlanInput, BuildPlanUseCase, PlanCache};
//!
//! let cache = PlanCache::new();
//! let collector = DiagnosticsCollector::new();
//! let output = BuildPlanUseCase::new(&graph, &cache, &collector).execute(BuildPlanInput {
//!     method: "ToDto",
//!     source: &TypeRef::new("Car"),
//!     target: &TypeRef::new("CarDto"),
//!     config,
//! })?;
//! ```

pub mod application; // UseCase layer (entry point)
pub mod domain;
pub mod infrastructure;

// Re-export application layer (primary interface)
pub use application::{BuildPlanInput, BuildPlanOutput, BuildPlanUseCase};

// Re-export domain types
pub use domain::{
    EnumFallback, EnumPlan, EnumValueMapping, MappingPlan, MappingPlanNode, MemberAssignment,
    NullFallback, NullGuardPolicy, PlanKey, TypePlan, TypePlanBody,
};

pub use infrastructure::{BuildStats, PlanBuilder, PlanCache};
