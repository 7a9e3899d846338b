//! Configuration error types
//!
//! Configuration errors are fatal for the affected mapping request. Recoverable
//! findings are diagnostics instead (see `features::diagnostics`).

use std::fmt;
use thiserror::Error;

/// Side of a mapping an override refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideSide {
    Source,
    Target,
}

impl fmt::Display for OverrideSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideSide::Source => f.write_str("source"),
            OverrideSide::Target => f.write_str("target"),
        }
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// More than one provider marked default in one mapper scope
    #[error("Multiple default format providers: {}. At most one provider may be marked default per mapper", providers.join(", "))]
    MultipleDefaultFormatProviders { providers: Vec<String> },

    /// Member override references a provider missing from the registry
    #[error("Member '{member}' references unknown format provider '{provider}'. {suggestion}")]
    UnknownFormatProvider {
        provider: String,
        member: String,
        suggestion: String,
    },

    /// Member override references a member the type does not expose
    #[error("Unknown {side} member '{member}' on type '{type_key}'. {suggestion}")]
    UnknownMember {
        side: OverrideSide,
        member: String,
        type_key: String,
        suggestion: String,
    },

    /// Request references a type missing from the type graph
    #[error("Unknown type '{0}'")]
    UnknownType(String),

    /// Two overrides contradict each other
    #[error("Conflicting overrides for member '{member}': {detail}")]
    ConflictingOverride { member: String, detail: String },

    /// Member overrides on a request whose root types have no members
    #[error("Member overrides require object types, but '{source_type}' -> '{target_type}' is not an object mapping")]
    MemberOverridesOnNonObject {
        source_type: String,
        target_type: String,
    },

    /// Enum value overrides on a request that is not enum to enum
    #[error("Enum value overrides require enum types, but '{source_type}' -> '{target_type}' is not an enum mapping")]
    EnumOverridesOnNonEnum {
        source_type: String,
        target_type: String,
    },

    /// Root type pair has no conversion at all
    #[error("No conversion exists from '{source_type}' to '{target_type}'")]
    NoConversion {
        source_type: String,
        target_type: String,
    },

    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Canonical JSON encoding failed while fingerprinting
    #[error("Fingerprint encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Unknown member error with a closest-name suggestion
    pub fn unknown_member<'a>(
        side: OverrideSide,
        member: impl Into<String>,
        type_key: impl Into<String>,
        candidates: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let member = member.into();
        let suggestion = suggest(&member, candidates);
        Self::UnknownMember {
            side,
            member,
            type_key: type_key.into(),
            suggestion,
        }
    }

    /// Unknown provider error with a closest-name suggestion
    pub fn unknown_provider<'a>(
        provider: impl Into<String>,
        member: impl Into<String>,
        registered: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let provider = provider.into();
        let suggestion = suggest(&provider, registered);
        Self::UnknownFormatProvider {
            provider,
            member: member.into(),
            suggestion,
        }
    }

    pub fn conflicting(member: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ConflictingOverride {
            member: member.into(),
            detail: detail.into(),
        }
    }

    /// True for the error the engine mirrors as an ambiguous-default-format-provider diagnostic
    pub fn is_ambiguous_default_provider(&self) -> bool {
        matches!(self, ConfigError::MultipleDefaultFormatProviders { .. })
    }
}

fn suggest<'a>(target: &str, candidates: impl IntoIterator<Item = &'a str>) -> String {
    match find_closest_match(target, candidates) {
        Some(closest) => format!("Did you mean '{}'?", closest),
        None => "No candidates available".to_string(),
    }
}

/// Find closest match using simple edit distance
fn find_closest_match<'a>(
    target: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .min_by_key(|candidate| levenshtein_distance(target, candidate))
}

/// Simple Levenshtein distance implementation
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();
    let mut matrix = vec![vec![0; s2.len() + 1]; s1.len() + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=s2.len() {
        matrix[0][j] = j;
    }

    for (i, c1) in s1.iter().enumerate() {
        for (j, c2) in s2.iter().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i + 1][j + 1] = (matrix[i][j + 1] + 1) // deletion
                .min(matrix[i + 1][j] + 1) // insertion
                .min(matrix[i][j] + cost); // substitution
        }
    }

    matrix[s1.len()][s2.len()]
}
