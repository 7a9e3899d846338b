//! Error types for mapgen-engine
//!
//! Crate-level error wrapping the per-layer errors.

use crate::config::ConfigError;
use crate::features::type_graph::GraphError;
use thiserror::Error;

/// Main error type for mapgen-engine operations
#[derive(Debug, Error)]
pub enum MapgenError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Type graph error
    #[error("Type graph error: {0}")]
    Graph(#[from] GraphError),

    /// A mapping request aborted on a configuration error
    #[error("Mapping '{mapper}.{method}' failed: {reason}")]
    RequestFailed {
        mapper: String,
        method: String,
        reason: String,
    },

    /// Error-severity diagnostics make the run output unusable
    #[error("Mapping run reported {count} error diagnostic(s)")]
    ErrorDiagnostics { count: usize },

    /// Run report encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MapgenError {
    pub fn request_failed(
        mapper: impl Into<String>,
        method: impl Into<String>,
        reason: &ConfigError,
    ) -> Self {
        MapgenError::RequestFailed {
            mapper: mapper.into(),
            method: method.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for mapgen-engine operations
pub type Result<T> = std::result::Result<T, MapgenError>;
