//! Conversion Resolution
//!
//! Picks the strategy converting a source value into a target value for one
//! type pair, builds enum value tables and applies null-handling policy.
//! Nested plans are requested through the `NestedPlanner` port; the plan
//! builder implements it, which is how recursion and cycle closure reach
//! this layer without a dependency on the builder.

pub mod infrastructure;
pub mod ports;

pub use infrastructure::{
    build_enum_plan, guard_member, guard_root, report_unmapped_values, ConversionContext,
    ConversionResolver, Guarded,
};
pub use ports::NestedPlanner;
