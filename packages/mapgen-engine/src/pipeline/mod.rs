//! Pipeline orchestration

pub mod engine;
pub mod request;
pub mod result;

pub use engine::MappingEngine;
pub use request::{MapperDefinition, MappingRequest};
pub use result::{FailureReport, MappingRun, RequestOutcome, RunReport};
