//! Null handling
//!
//! Wraps conversion nodes in null guards for nullable sources, at member
//! assignments and at the mapping method's return value.

use crate::config::MemberPolicy;
use crate::features::mapping_plan::domain::{MappingPlanNode, NullFallback, NullGuardPolicy};
use crate::features::type_graph::domain::{MemberDescriptor, TypeDescriptor};

/// Guarded node and whether null can reach a target that forbids it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guarded {
    pub node: MappingPlanNode,
    pub mismatch_risk: bool,
}

/// Guard for assigning `source` to `target`
pub fn guard_member(
    node: MappingPlanNode,
    source: &MemberDescriptor,
    target: &MemberDescriptor,
    policy: &MemberPolicy,
) -> Guarded {
    if !source.nullable {
        return Guarded {
            node,
            mismatch_risk: false,
        };
    }

    let fallback = if policy.allow_null && target.nullable {
        NullFallback::AssignNull
    } else if policy.throw_on_property_null {
        NullFallback::Throw
    } else {
        NullFallback::SkipAssignment
    };

    let node = if fallback == NullFallback::AssignNull && node.is_direct() {
        node
    } else {
        MappingPlanNode::guard(NullGuardPolicy::PropertyAssignment, fallback, node)
    };

    Guarded {
        node,
        mismatch_risk: !target.nullable,
    }
}

/// Guard for the method return value
pub fn guard_root(
    node: MappingPlanNode,
    source_nullable: bool,
    target_nullable: bool,
    target: &TypeDescriptor,
    throw_on_mapping_null: bool,
) -> Guarded {
    if !source_nullable {
        return Guarded {
            node,
            mismatch_risk: false,
        };
    }

    if target_nullable {
        let node = if node.is_direct() {
            node
        } else {
            MappingPlanNode::guard(NullGuardPolicy::MethodReturn, NullFallback::AssignNull, node)
        };
        return Guarded {
            node,
            mismatch_risk: false,
        };
    }

    let (fallback, mismatch_risk) = if throw_on_mapping_null {
        (NullFallback::Throw, false)
    } else {
        match synthesized_default(target) {
            Some(fallback) => (fallback, false),
            None => (NullFallback::Throw, true),
        }
    };

    Guarded {
        node: MappingPlanNode::guard(NullGuardPolicy::MethodReturn, fallback, node),
        mismatch_risk,
    }
}

/// Default value generated code can produce for a non-nullable target
fn synthesized_default(target: &TypeDescriptor) -> Option<NullFallback> {
    if target.is_string() {
        Some(NullFallback::EmptyString)
    } else if target.is_collection() {
        Some(NullFallback::EmptyCollection)
    } else if target.is_value_type {
        Some(NullFallback::ZeroValue)
    } else if target.is_object() && target.has_parameterless_constructor {
        Some(NullFallback::NewInstance)
    } else {
        None
    }
}
