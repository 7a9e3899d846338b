//! Configuration validation
//!
//! Every configuration layer that can be wrong on its own implements
//! `Validatable`; the resolver validates each layer before merging it.

use super::error::ConfigResult;

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Configuration name for log messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate any Validatable config, logging which layer failed
    pub fn validate_config<V: Validatable>(config: &V) -> ConfigResult<()> {
        config.validate().map_err(|err| {
            tracing::debug!("{} failed validation: {}", config.config_name(), err);
            err
        })
    }
}
