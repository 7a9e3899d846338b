pub mod graph;

pub use graph::{TypeGraph, TypeGraphBuilder};
