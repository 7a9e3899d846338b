//! Type references carrying nullability

use super::type_descriptor::TypeKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A type as it appears in a method signature: key plus nullability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub key: TypeKey,
    #[serde(default)]
    pub nullable: bool,
}

impl TypeRef {
    pub fn new(key: impl Into<TypeKey>) -> Self {
        Self {
            key: key.into(),
            nullable: false,
        }
    }

    pub fn nullable(key: impl Into<TypeKey>) -> Self {
        Self {
            key: key.into(),
            nullable: true,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}
