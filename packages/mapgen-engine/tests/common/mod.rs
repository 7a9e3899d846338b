//! Common test utilities for mapgen-engine
//!
//! Shared type graphs, request builders and plan assertions for the
//! integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

// Re-export all utilities
pub use assertions::*;
pub use fixtures::*;
