//! Type and member descriptors
//!
//! Produced by the external type extractor, read-only for the engine.

use super::primitive::PrimitiveKind;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Unique type identity within one type graph
///
/// Uses `Arc<str>` so plan keys and diagnostics share the interned name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Arc<str>);

impl TypeKey {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self(Arc::from(name))
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

// Serialized as a plain string (Arc<str> needs serde's `rc` feature otherwise)
impl Serialize for TypeKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TypeKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from(name))
    }
}

/// Named enum constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Structural category of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    String,
    Enum(Vec<EnumValue>),
    Collection { element: TypeKey },
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    Private,
}

impl Accessibility {
    /// Generated mapping code can only touch public and internal members
    pub fn is_accessible(&self) -> bool {
        matches!(self, Accessibility::Public | Accessibility::Internal)
    }
}

/// Direction capability of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberAccess {
    Read,
    Write,
    ReadWrite,
}

impl MemberAccess {
    pub fn can_read(&self) -> bool {
        matches!(self, MemberAccess::Read | MemberAccess::ReadWrite)
    }

    pub fn can_write(&self) -> bool {
        matches!(self, MemberAccess::Write | MemberAccess::ReadWrite)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    pub type_key: TypeKey,
    pub nullable: bool,
    pub obsolete: bool,
    pub accessibility: Accessibility,
    pub access: MemberAccess,
}

impl MemberDescriptor {
    /// Public, read-write, non-nullable member
    pub fn new(name: impl Into<String>, type_key: impl Into<TypeKey>) -> Self {
        Self {
            name: name.into(),
            type_key: type_key.into(),
            nullable: false,
            obsolete: false,
            accessibility: Accessibility::Public,
            access: MemberAccess::ReadWrite,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.obsolete = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.access = MemberAccess::Read;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.access = MemberAccess::Write;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Usable on the source side of a mapping
    pub fn is_readable(&self) -> bool {
        self.accessibility.is_accessible() && self.access.can_read()
    }

    /// Usable on the target side of a mapping
    pub fn is_writable(&self) -> bool {
        self.accessibility.is_accessible() && self.access.can_write()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub key: TypeKey,
    pub kind: TypeKind,
    pub members: Vec<MemberDescriptor>,
    pub is_value_type: bool,
    pub is_obsolete: bool,
    pub has_parameterless_constructor: bool,
}

impl TypeDescriptor {
    fn with_kind(key: impl Into<TypeKey>, kind: TypeKind, is_value_type: bool) -> Self {
        Self {
            key: key.into(),
            kind,
            members: Vec::new(),
            is_value_type,
            is_obsolete: false,
            has_parameterless_constructor: true,
        }
    }

    /// Reference-semantics composite type
    pub fn object(key: impl Into<TypeKey>) -> Self {
        Self::with_kind(key, TypeKind::Object, false)
    }

    /// Value-semantics composite type (copied on assignment)
    pub fn value_object(key: impl Into<TypeKey>) -> Self {
        Self::with_kind(key, TypeKind::Object, true)
    }

    pub fn primitive(key: impl Into<TypeKey>, kind: PrimitiveKind) -> Self {
        Self::with_kind(key, TypeKind::Primitive(kind), true)
    }

    pub fn string(key: impl Into<TypeKey>) -> Self {
        Self::with_kind(key, TypeKind::String, false)
    }

    pub fn enumeration(key: impl Into<TypeKey>, values: Vec<EnumValue>) -> Self {
        Self::with_kind(key, TypeKind::Enum(values), true)
    }

    /// Enum whose values are numbered in declaration order
    pub fn enum_of(key: impl Into<TypeKey>, names: &[&str]) -> Self {
        let values = names
            .iter()
            .enumerate()
            .map(|(i, name)| EnumValue::new(*name, i as i64))
            .collect();
        Self::enumeration(key, values)
    }

    pub fn collection(key: impl Into<TypeKey>, element: impl Into<TypeKey>) -> Self {
        Self::with_kind(
            key,
            TypeKind::Collection {
                element: element.into(),
            },
            false,
        )
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }

    pub fn without_parameterless_constructor(mut self) -> Self {
        self.has_parameterless_constructor = false;
        self
    }

    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, TypeKind::Object)
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, TypeKind::String)
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.kind, TypeKind::Collection { .. })
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.kind {
            TypeKind::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn element_type(&self) -> Option<&TypeKey> {
        match &self.kind {
            TypeKind::Collection { element } => Some(element),
            _ => None,
        }
    }

    pub fn enum_values(&self) -> &[EnumValue] {
        match &self.kind {
            TypeKind::Enum(values) => values,
            _ => &[],
        }
    }

    /// Mutable reference-semantics types: the ones a deep clone must copy
    pub fn is_reference_like(&self) -> bool {
        match self.kind {
            TypeKind::Object => !self.is_value_type,
            TypeKind::Collection { .. } => true,
            _ => false,
        }
    }
}
