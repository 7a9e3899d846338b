pub mod builtin_types;
pub mod primitive;
pub mod type_descriptor;
pub mod type_ref;

pub use builtin_types::{builtin_descriptors, primitive_key, string_key, STRING};
pub use primitive::{NumericConversion, PrimitiveKind};
pub use type_descriptor::{
    Accessibility, EnumValue, MemberAccess, MemberDescriptor, TypeDescriptor, TypeKey, TypeKind,
};
pub use type_ref::TypeRef;
