//! Builtin scalar types
//!
//! Every type graph starts with the primitive kinds and `string`; extractors
//! reference them by these keys.

use super::primitive::PrimitiveKind;
use super::type_descriptor::{TypeDescriptor, TypeKey};

/// Key of the builtin string type
pub const STRING: &str = "string";

/// Key of a builtin primitive type
pub fn primitive_key(kind: PrimitiveKind) -> TypeKey {
    TypeKey::from(kind.as_str())
}

pub fn string_key() -> TypeKey {
    TypeKey::from(STRING)
}

/// Descriptors for all builtin scalar types
pub fn builtin_descriptors() -> Vec<TypeDescriptor> {
    let mut types: Vec<TypeDescriptor> = PrimitiveKind::ALL
        .iter()
        .map(|kind| TypeDescriptor::primitive(primitive_key(*kind), *kind))
        .collect();
    types.push(TypeDescriptor::string(STRING));
    types
}
