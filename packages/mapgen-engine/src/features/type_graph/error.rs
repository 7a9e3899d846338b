//! Error types for type graph construction

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Type '{0}' is declared more than once")]
    DuplicateType(String),

    #[error("Type '{type_key}' declares member '{member}' more than once")]
    DuplicateMember { type_key: String, member: String },

    #[error("Member '{type_key}.{member}' references unknown type '{referenced}'")]
    UnknownMemberType {
        type_key: String,
        member: String,
        referenced: String,
    },

    #[error("Collection '{collection}' references unknown element type '{element}'")]
    UnknownElementType { collection: String, element: String },

    #[error("Collection element chain through '{0}' never reaches a non-collection type")]
    CollectionCycle(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
