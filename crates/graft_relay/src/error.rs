//! Node-resolution failures.

use graft_core::resolver::ResolveError;
use thiserror::Error;

/// A malformed or unknown global id, surfaced at query-resolution time
/// from the node lookup field (never at schema-build time).
#[derive(Debug, Error)]
pub enum NodeResolutionError {
    /// The id is not valid base64.
    #[error("global id is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// The decoded id is not valid UTF-8.
    #[error("global id is not valid utf-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The decoded id has no `TypeName:RawID` separator.
    #[error("global id \"{0}\" is missing the type separator")]
    MissingSeparator(String),

    /// The decoded type name is not registered.
    #[error("global id names unknown type \"{0}\"")]
    UnknownType(String),

    /// The decoded type name is registered but is not an object type.
    #[error("global id names non-object type \"{0}\"")]
    NotAnObject(String),

    /// The object carries no id usable for encoding.
    #[error("object has no id usable for global id encoding")]
    MissingId,

    /// No concrete type could be resolved for the object.
    #[error("could not resolve a concrete type for the object")]
    UnresolvedType,
}

impl From<NodeResolutionError> for ResolveError {
    fn from(error: NodeResolutionError) -> Self {
        ResolveError::Custom(error.to_string())
    }
}
