//! Plan Cache
//!
//! Run-scoped memo table of completed plans. Shared by every request of a
//! run; parallel builders that finish the same key converge on whichever plan
//! was inserted first.
//!
//! Builders publish whole batches: a plan becomes visible together with every
//! plan it references, so readers never follow a key into a missing plan.

use crate::features::mapping_plan::domain::{PlanKey, TypePlan};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Default capacity for one run
const PLAN_CACHE_CAPACITY: usize = 256;

#[derive(Debug)]
pub struct PlanCache {
    plans: DashMap<PlanKey, Arc<TypePlan>>,
    /// Held exclusively while a batch is published
    gate: RwLock<()>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::with_capacity(PLAN_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            plans: DashMap::with_capacity(capacity),
            gate: RwLock::new(()),
        }
    }

    /// Insert unless present; returns the plan now stored under the key
    pub fn insert_once(&self, plan: TypePlan) -> Arc<TypePlan> {
        let _gate = self.gate.write();
        self.insert_locked(plan)
    }

    /// Insert a closed batch of plans in one step, keeping any plan already
    /// stored under the same key. Returns how many plans were new.
    pub fn publish(&self, batch: impl IntoIterator<Item = TypePlan>) -> usize {
        let _gate = self.gate.write();
        let before = self.plans.len();
        for plan in batch {
            self.insert_locked(plan);
        }
        self.plans.len() - before
    }

    fn insert_locked(&self, plan: TypePlan) -> Arc<TypePlan> {
        let entry = self
            .plans
            .entry(plan.key.clone())
            .or_insert_with(|| Arc::new(plan));
        Arc::clone(entry.value())
    }

    pub fn get(&self, key: &PlanKey) -> Option<Arc<TypePlan>> {
        let _gate = self.gate.read();
        self.plans.get(key).map(|v| Arc::clone(&v))
    }

    pub fn contains(&self, key: &PlanKey) -> bool {
        let _gate = self.gate.read();
        self.plans.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new()
    }
}
