//! Diagnostic domain model

use crate::features::type_graph::domain::TypeKey;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// What went wrong while resolving a mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    UnmappedTargetMember,
    UnmappedSourceMember,
    AmbiguousMemberMatch,
    AmbiguousDefaultFormatProvider,
    NullMismatchRisk,
    UnmappedEnumValue,
}

impl DiagnosticKind {
    /// Severity used when the configuration does not override it
    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnmappedTargetMember
            | DiagnosticKind::UnmappedSourceMember
            | DiagnosticKind::AmbiguousMemberMatch
            | DiagnosticKind::UnmappedEnumValue => Severity::Warning,
            DiagnosticKind::NullMismatchRisk => Severity::Info,
            DiagnosticKind::AmbiguousDefaultFormatProvider => Severity::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnmappedTargetMember => "unmapped-target-member",
            DiagnosticKind::UnmappedSourceMember => "unmapped-source-member",
            DiagnosticKind::AmbiguousMemberMatch => "ambiguous-member-match",
            DiagnosticKind::AmbiguousDefaultFormatProvider => "ambiguous-default-format-provider",
            DiagnosticKind::NullMismatchRisk => "null-mismatch-risk",
            DiagnosticKind::UnmappedEnumValue => "unmapped-enum-value",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<TypeKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<TypeKey>,
    /// Member (or enum value) name the diagnostic is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    pub message: String,
}

impl Diagnostic {
    /// New diagnostic carrying the kind's default severity
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            source_type: None,
            target_type: None,
            member: None,
            message: message.into(),
        }
    }

    pub fn with_types(mut self, source: &TypeKey, target: &TypeKey) -> Self {
        self.source_type = Some(source.clone());
        self.target_type = Some(target.clone());
        self
    }

    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Type pair first, then member name, then kind
impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source_type
            .cmp(&other.source_type)
            .then_with(|| self.target_type.cmp(&other.target_type))
            .then_with(|| self.member.cmp(&other.member))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.severity.cmp(&other.severity))
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.severity, self.kind)?;
        if let (Some(source), Some(target)) = (&self.source_type, &self.target_type) {
            write!(f, " {} -> {}", source, target)?;
        }
        if let Some(member) = &self.member {
            write!(f, " ({})", member)?;
        }
        write!(f, ": {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_severities() {
        assert_eq!(
            DiagnosticKind::UnmappedTargetMember.default_severity(),
            Severity::Warning
        );
        assert_eq!(DiagnosticKind::NullMismatchRisk.default_severity(), Severity::Info);
        assert_eq!(
            DiagnosticKind::AmbiguousDefaultFormatProvider.default_severity(),
            Severity::Error
        );
    }

    #[test]
    fn test_ordering_by_type_pair_then_member() {
        let a = Diagnostic::new(DiagnosticKind::UnmappedTargetMember, "x")
            .with_types(&TypeKey::from("A"), &TypeKey::from("B"))
            .with_member("zeta");
        let b = Diagnostic::new(DiagnosticKind::UnmappedSourceMember, "x")
            .with_types(&TypeKey::from("A"), &TypeKey::from("B"))
            .with_member("alpha");
        let c = Diagnostic::new(DiagnosticKind::UnmappedSourceMember, "x")
            .with_types(&TypeKey::from("A"), &TypeKey::from("A"))
            .with_member("zeta");

        let mut all = vec![a.clone(), b.clone(), c.clone()];
        all.sort();
        assert_eq!(all, vec![c, b, a]);
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::new(DiagnosticKind::UnmappedEnumValue, "no target value")
            .with_types(&TypeKey::from("Color"), &TypeKey::from("ColorDto"))
            .with_member("Blue");
        assert_eq!(
            d.to_string(),
            "warning [unmapped-enum-value] Color -> ColorDto (Blue): no target value"
        );
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&DiagnosticKind::NullMismatchRisk).unwrap();
        assert_eq!(json, "\"null-mismatch-risk\"");
    }
}
