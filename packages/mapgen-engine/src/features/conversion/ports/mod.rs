pub mod nested_planner;

pub use nested_planner::NestedPlanner;
