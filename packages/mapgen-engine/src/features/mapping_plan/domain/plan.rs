//! Mapping plan domain model
//!
//! A plan is a tree of `MappingPlanNode`s whose nested plans are referenced by
//! `PlanKey`, never inlined. Cyclic type graphs therefore produce finite plans:
//! a pair still under construction is referenced by its key.

use crate::config::ConfigFingerprint;
use crate::features::member_matching::MatchOrigin;
use crate::features::type_graph::domain::{NumericConversion, PrimitiveKind, TypeKey};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Memoization key: (source type, target type, effective configuration)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlanKey {
    pub source: TypeKey,
    pub target: TypeKey,
    pub config: ConfigFingerprint,
}

impl PlanKey {
    pub fn new(source: TypeKey, target: TypeKey, config: ConfigFingerprint) -> Self {
        Self {
            source,
            target,
            config,
        }
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} @{}", self.source, self.target, self.config)
    }
}

/// Where a null guard sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullGuardPolicy {
    /// Assignment of one member
    PropertyAssignment,
    /// Return value of the mapping method
    MethodReturn,
}

/// What generated code does when the guarded value is null
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullFallback {
    AssignNull,
    Throw,
    SkipAssignment,
    EmptyString,
    EmptyCollection,
    ZeroValue,
    NewInstance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MappingPlanNode {
    DirectAssignment,

    /// Structurally independent copy; for collections `child` maps each element
    DeepClone { child: PlanKey },

    NestedObject { child: PlanKey },

    Collection { element: PlanKey },

    /// `child` holds the value table
    Enum { child: PlanKey },

    StringConversion {
        format: Option<String>,
        provider: Option<String>,
    },

    PrimitiveConversion {
        from: PrimitiveKind,
        to: PrimitiveKind,
        conversion: NumericConversion,
    },

    Parse {
        target: TypeKey,
        provider: Option<String>,
    },

    NullGuard {
        policy: NullGuardPolicy,
        fallback: NullFallback,
        inner: Box<MappingPlanNode>,
    },
}

impl MappingPlanNode {
    pub fn guard(policy: NullGuardPolicy, fallback: NullFallback, inner: MappingPlanNode) -> Self {
        MappingPlanNode::NullGuard {
            policy,
            fallback,
            inner: Box::new(inner),
        }
    }

    /// The node with null guards stripped
    pub fn unguarded(&self) -> &MappingPlanNode {
        match self {
            MappingPlanNode::NullGuard { inner, .. } => inner.unguarded(),
            other => other,
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, MappingPlanNode::DirectAssignment)
    }

    /// Referenced nested plan, if any
    pub fn child_key(&self) -> Option<&PlanKey> {
        match self.unguarded() {
            MappingPlanNode::DeepClone { child }
            | MappingPlanNode::NestedObject { child }
            | MappingPlanNode::Enum { child } => Some(child),
            MappingPlanNode::Collection { element } => Some(element),
            _ => None,
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            MappingPlanNode::NullGuard { inner, .. } => 1 + inner.node_count(),
            _ => 1,
        }
    }
}

/// One target member and the node producing its value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberAssignment {
    pub source_member: String,
    pub target_member: String,
    pub origin: MatchOrigin,
    pub node: MappingPlanNode,
}

/// Runtime behavior for source enum values without a target counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumFallback {
    Throw,
    TargetDefault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValueMapping {
    pub source: String,
    pub target: String,
}

/// Value table for one enum pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumPlan {
    pub entries: Vec<EnumValueMapping>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmapped_source: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmapped_target: Vec<String>,
    /// Set when unmapped source values are deferred to runtime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<EnumFallback>,
}

impl EnumPlan {
    pub fn target_of(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.source == source)
            .map(|e| e.target.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum TypePlanBody {
    Object { assignments: Vec<MemberAssignment> },
    Enum(EnumPlan),
    Conversion { node: MappingPlanNode },
}

/// Memoized plan for one `PlanKey`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypePlan {
    pub key: PlanKey,
    pub body: TypePlanBody,
}

impl TypePlan {
    pub fn assignments(&self) -> &[MemberAssignment] {
        match &self.body {
            TypePlanBody::Object { assignments } => assignments,
            _ => &[],
        }
    }

    pub fn assignment(&self, target_member: &str) -> Option<&MemberAssignment> {
        self.assignments()
            .iter()
            .find(|a| a.target_member == target_member)
    }

    pub fn enum_plan(&self) -> Option<&EnumPlan> {
        match &self.body {
            TypePlanBody::Enum(plan) => Some(plan),
            _ => None,
        }
    }

    /// Keys of the plans this one references directly
    pub fn child_keys(&self) -> Vec<&PlanKey> {
        match &self.body {
            TypePlanBody::Object { assignments } => assignments
                .iter()
                .filter_map(|a| a.node.child_key())
                .collect(),
            TypePlanBody::Enum(_) => Vec::new(),
            TypePlanBody::Conversion { node } => node.child_key().into_iter().collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        match &self.body {
            TypePlanBody::Object { assignments } => {
                assignments.iter().map(|a| a.node.node_count()).sum()
            }
            TypePlanBody::Enum(_) => 1,
            TypePlanBody::Conversion { node } => node.node_count(),
        }
    }
}

/// Complete plan for one mapping request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingPlan {
    pub method: String,
    pub source: TypeKey,
    pub target: TypeKey,
    pub config: ConfigFingerprint,
    pub root: MappingPlanNode,

    /// Every plan reachable from `root`
    #[serde(serialize_with = "serialize_plans")]
    pub plans: BTreeMap<PlanKey, Arc<TypePlan>>,
}

impl MappingPlan {
    pub fn plan(&self, key: &PlanKey) -> Option<&TypePlan> {
        self.plans.get(key).map(Arc::as_ref)
    }

    /// Plan referenced by the root node
    pub fn root_plan(&self) -> Option<&TypePlan> {
        self.root.child_key().and_then(|key| self.plan(key))
    }

    /// Plan for a type pair, whatever configuration it was built with
    pub fn plan_for_types(&self, source: &str, target: &str) -> Option<&TypePlan> {
        self.plans
            .values()
            .find(|p| p.key.source.as_str() == source && p.key.target.as_str() == target)
            .map(Arc::as_ref)
    }

    /// Root node plus every node of every reachable plan
    pub fn node_count(&self) -> usize {
        self.root.node_count() + self.plans.values().map(|p| p.node_count()).sum::<usize>()
    }
}

// Emitted as a list of plans (Arc<T> needs serde's `rc` feature otherwise)
fn serialize_plans<S>(
    plans: &BTreeMap<PlanKey, Arc<TypePlan>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(plans.values().map(Arc::as_ref))
}
