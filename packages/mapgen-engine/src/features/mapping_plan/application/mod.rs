//! Mapping Plan Application Layer (UseCase)

mod build_plan;

pub use build_plan::{BuildPlanInput, BuildPlanOutput, BuildPlanUseCase};
