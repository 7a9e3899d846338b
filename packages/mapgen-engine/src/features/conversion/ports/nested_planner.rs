use crate::config::{ConfigResult, MappingConfiguration};
use crate::features::mapping_plan::domain::PlanKey;
use crate::features::type_graph::domain::TypeKey;
use std::sync::Arc;

/// Requests the plan for a nested type pair.
///
/// Implemented by the plan builder. Returns the key of a cached plan, the key
/// of a plan still under construction (forward reference) or `None` when the
/// pair has no conversion.
pub trait NestedPlanner {
    fn plan_for(
        &mut self,
        source: &TypeKey,
        target: &TypeKey,
        config: &Arc<MappingConfiguration>,
    ) -> ConfigResult<Option<PlanKey>>;
}
