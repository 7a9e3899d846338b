pub mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
