pub mod enum_mapping;
pub mod null_handling;
pub mod resolver;

pub use enum_mapping::{build_enum_plan, report_unmapped_values};
pub use null_handling::{guard_member, guard_root, Guarded};
pub use resolver::{ConversionContext, ConversionResolver};
