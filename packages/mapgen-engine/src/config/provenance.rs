//! Configuration provenance tracking
//!
//! Track which scope supplied each effective setting (built-in default,
//! assembly, mapper, method or member override).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Configuration scope a value came from, ordered from weakest to strongest
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Built-in default
    BuiltIn,

    /// Assembly-wide defaults
    Assembly,

    /// Mapper-level configuration
    Mapper,

    /// Method-level configuration
    Method,

    /// Member-level override for the named target member
    Member(String),
}

impl ConfigSource {
    /// Get a short description
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::BuiltIn => "built-in".to_string(),
            ConfigSource::Assembly => "assembly".to_string(),
            ConfigSource::Mapper => "mapper".to_string(),
            ConfigSource::Method => "method".to_string(),
            ConfigSource::Member(name) => format!("member:{}", name),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Field path → scope that last set it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProvenance {
    field_sources: BTreeMap<String, ConfigSource>,
}

impl ConfigProvenance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record field-level override
    pub fn track_field(&mut self, field_path: &str, source: ConfigSource) {
        self.field_sources.insert(field_path.to_string(), source);
    }

    /// Source for a field; untracked fields carry their built-in default
    pub fn get_source(&self, field_path: &str) -> ConfigSource {
        self.field_sources
            .get(field_path)
            .cloned()
            .unwrap_or(ConfigSource::BuiltIn)
    }

    pub fn field_sources(&self) -> &BTreeMap<String, ConfigSource> {
        &self.field_sources
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        if self.field_sources.is_empty() {
            return "All settings at built-in defaults".to_string();
        }

        let mut lines = vec!["Overridden fields:".to_string()];
        for (field, source) in &self.field_sources {
            lines.push(format!("  {} ← {}", field, source.describe()));
        }
        lines.join("\n")
    }
}
