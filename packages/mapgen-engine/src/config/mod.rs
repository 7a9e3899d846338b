//! Layered mapping configuration
//!
//! Settings may be declared at four scopes: assembly, mapper, method and
//! member. `ConfigResolver` merges them into one immutable
//! `MappingConfiguration` per mapping request.
//!
//! # Examples
//!
//! ```rust,ignore
//! use mapgen_engine::config::*;
//!
//! let mapper = MapperConfig::new()
//!     .with_settings(MappingConfigPatch::new().use_deep_cloning(true))
//!     .with_format_providers(
//!         FormatProviderRegistry::new().with("invariant", FormatProvider::default_provider()),
//!     );
//!
//! let config = ConfigResolver::resolve(
//!     &MappingConfigPatch::new(),
//!     &mapper,
//!     &MappingConfigPatch::new().strict_enum_mappings(true),
//!     &MemberOverrides::new().string_format("price", Some("C"), None),
//! )?;
//! println!("{}", config.provenance().summary());
//! ```
//!
//! # Features
//!
//! - **Precedence merge**: member > method > mapper > assembly > built-in
//! - **Field-level Provenance**: Track which scope set each value
//! - **Fingerprint**: blake3 digest keying the plan cache
//! - **Versioned Schema**: YAML v1 for assembly and mapper layers

pub mod error;
pub mod format_provider;
pub mod io;
pub mod mapping_config;
pub mod member_overrides;
pub mod options;
pub mod patch;
pub mod provenance;
pub mod resolver;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult, OverrideSide};
pub use format_provider::{FormatProvider, FormatProviderRegistry};
pub use io::ConfigLayersV1;
pub use mapping_config::{ConfigFingerprint, MappingConfiguration, MemberPolicy};
pub use member_overrides::{
    MemberOverride, MemberOverrides, MemberSettingsPatch, ResolvedMemberOverrides,
    StringFormatOverride,
};
pub use options::{
    CopyBehavior, IgnoreObsoleteMembersStrategy, PropertyNameMappingStrategy,
    RequiredMappingStrategy,
};
pub use patch::{MapperConfig, MappingConfigPatch};
pub use provenance::{ConfigProvenance, ConfigSource};
pub use resolver::ConfigResolver;
pub use validation::{ConfigValidator, Validatable};
