//! Type Graph
//!
//! Read-only description of every type reachable from a mapping request:
//! members, nullability, value/reference semantics, enum values, collection
//! element types and obsolescence markers.
//!
//! The engine never extracts types itself. An external extractor fills a
//! `TypeGraphBuilder`, the builder validates references, and the engine reads
//! the result through the `TypeLookup` port.
//!
//! # Example
//!
//! ```rust,ignore
//! use mapgen_engine::features::type_graph::*;
//!
//! let graph = TypeGraphBuilder::with_builtins()
//!     .add(TypeDescriptor::object("CarDto")
//!         .with_member(MemberDescriptor::new("id", "int32")))
//!     .build()?;
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

pub use domain::{
    builtin_descriptors, primitive_key, string_key, Accessibility, EnumValue, MemberAccess,
    MemberDescriptor, NumericConversion, PrimitiveKind, TypeDescriptor, TypeKey, TypeKind,
    TypeRef,
};
pub use error::{GraphError, GraphResult};
pub use infrastructure::{TypeGraph, TypeGraphBuilder};
pub use ports::TypeLookup;
