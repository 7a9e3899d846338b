pub mod builder;
pub mod plan_cache;

pub use builder::{BuildStats, PlanBuilder};
pub use plan_cache::PlanCache;
