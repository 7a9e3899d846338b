//! Diagnostics Collector
//!
//! Append-only for the duration of one run. Shared by every request the run
//! resolves, so recording goes through a lock; `finalize()` sorts and drops
//! duplicates produced when two parallel requests build the same plan.

use crate::features::diagnostics::domain::{Diagnostic, DiagnosticKind, Severity};
use crate::features::diagnostics::ports::SeverityPolicy;
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    entries: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic as is
    pub fn record(&self, diagnostic: Diagnostic) {
        self.entries.lock().push(diagnostic);
    }

    /// Record a diagnostic with the severity the policy assigns to its kind
    pub fn report(&self, policy: &impl SeverityPolicy, diagnostic: Diagnostic) {
        let severity = policy.severity_of(diagnostic.kind);
        self.record(diagnostic.with_severity(severity));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.lock().iter().any(Diagnostic::is_error)
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.entries.lock().iter().filter(|d| d.kind == kind).count()
    }

    /// Deterministically ordered, duplicate-free snapshot
    pub fn finalize(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.entries.lock().clone();
        diagnostics.sort();
        diagnostics.dedup();
        diagnostics
    }
}

/// Number of diagnostics at `severity` in a finalized sequence
pub fn count_severity(diagnostics: &[Diagnostic], severity: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::diagnostics::ports::DefaultSeverities;
    use crate::features::type_graph::domain::TypeKey;

    struct Escalate;

    impl SeverityPolicy for Escalate {
        fn severity_of(&self, _kind: DiagnosticKind) -> Severity {
            Severity::Error
        }
    }

    fn unmapped(member: &str) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::UnmappedTargetMember, "no source")
            .with_types(&TypeKey::from("A"), &TypeKey::from("B"))
            .with_member(member)
    }

    #[test]
    fn test_report_applies_policy() {
        let collector = DiagnosticsCollector::new();
        collector.report(&DefaultSeverities, unmapped("x"));
        assert!(!collector.has_errors());

        collector.report(&Escalate, unmapped("y"));
        assert!(collector.has_errors());
        assert_eq!(collector.count_of(DiagnosticKind::UnmappedTargetMember), 2);
    }

    #[test]
    fn test_finalize_sorts_and_dedups() {
        let collector = DiagnosticsCollector::new();
        collector.record(unmapped("b"));
        collector.record(unmapped("a"));
        collector.record(unmapped("b"));

        let finalized = collector.finalize();
        assert_eq!(finalized.len(), 2);
        assert_eq!(finalized[0].member.as_deref(), Some("a"));
        assert_eq!(finalized[1].member.as_deref(), Some("b"));
        assert_eq!(count_severity(&finalized, Severity::Warning), 2);
    }

    #[test]
    fn test_concurrent_record() {
        let collector = DiagnosticsCollector::new();
        std::thread::scope(|s| {
            for i in 0..4 {
                let collector = &collector;
                s.spawn(move || {
                    for j in 0..25 {
                        collector.record(unmapped(&format!("m{}_{}", i, j)));
                    }
                });
            }
        });
        assert_eq!(collector.len(), 100);
        assert_eq!(collector.finalize().len(), 100);
    }
}
