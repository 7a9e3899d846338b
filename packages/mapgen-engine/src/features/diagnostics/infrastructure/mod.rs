pub mod collector;

pub use collector::{count_severity, DiagnosticsCollector};
