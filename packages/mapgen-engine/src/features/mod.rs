//! Feature modules of the mapping resolution engine

pub mod conversion;
pub mod diagnostics;
pub mod mapping_plan;
pub mod member_matching;
pub mod type_graph;
