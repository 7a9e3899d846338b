//! Recognized strategy options

use serde::{Deserialize, Serialize};

/// How member names are compared when pairing source and target members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PropertyNameMappingStrategy {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

impl PropertyNameMappingStrategy {
    /// Normalized form used as a name index key
    pub fn normalize(&self, name: &str) -> String {
        match self {
            Self::CaseSensitive => name.to_string(),
            Self::CaseInsensitive => name.to_lowercase(),
        }
    }
}

/// Which side's obsolete members are dropped before matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IgnoreObsoleteMembersStrategy {
    #[default]
    None,
    Both,
    Source,
    Target,
}

impl IgnoreObsoleteMembersStrategy {
    pub fn ignores_source(&self) -> bool {
        matches!(self, Self::Both | Self::Source)
    }

    pub fn ignores_target(&self) -> bool {
        matches!(self, Self::Both | Self::Target)
    }
}

/// Which unmatched members are reported as diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RequiredMappingStrategy {
    #[default]
    Both,
    Source,
    Target,
    None,
}

impl RequiredMappingStrategy {
    pub fn reports_source(&self) -> bool {
        matches!(self, Self::Both | Self::Source)
    }

    pub fn reports_target(&self) -> bool {
        matches!(self, Self::Both | Self::Target)
    }
}

/// Copy behavior for identical source/target types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CopyBehavior {
    Shallow,
    DeepClone,
}

impl CopyBehavior {
    pub fn from_deep_cloning(use_deep_cloning: bool) -> Self {
        if use_deep_cloning {
            Self::DeepClone
        } else {
            Self::Shallow
        }
    }
}
