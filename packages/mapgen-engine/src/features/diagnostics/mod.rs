//! Diagnostics
//!
//! Structured, severity-tagged findings raised while matching members,
//! resolving conversions and building plans. Severities come from the
//! effective configuration through the `SeverityPolicy` port.
//!
//! An error-severity diagnostic never stops plan construction; the run result
//! refuses to hand out plans as usable while one is present.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{Diagnostic, DiagnosticKind, Severity};
pub use infrastructure::{count_severity, DiagnosticsCollector};
pub use ports::{DefaultSeverities, SeverityPolicy};
