pub mod plan;

pub use plan::{
    EnumFallback, EnumPlan, EnumValueMapping, MappingPlan, MappingPlanNode, MemberAssignment,
    NullFallback, NullGuardPolicy, PlanKey, TypePlan, TypePlanBody,
};
