use crate::features::diagnostics::domain::{DiagnosticKind, Severity};

/// Source of configured severities (implemented by the effective mapping configuration)
pub trait SeverityPolicy {
    fn severity_of(&self, kind: DiagnosticKind) -> Severity;
}

/// Policy that keeps every kind at its default severity
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSeverities;

impl SeverityPolicy for DefaultSeverities {
    fn severity_of(&self, kind: DiagnosticKind) -> Severity {
        kind.default_severity()
    }
}
