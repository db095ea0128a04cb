//! Schema-build error taxonomy.

use thiserror::Error;

/// Errors surfaced synchronously at schema-build time.
///
/// These represent definition-time programmer errors, not transient faults;
/// none are retried. A failed construction leaves the registry exactly as
/// it was before the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A name is already bound to a different type in this registry.
    #[error("type name \"{name}\" is already registered to a different type")]
    NameCollision { name: String },

    /// A reference does not correspond to any type in this registry.
    #[error("type \"{name}\" is not registered in this registry")]
    UnregisteredType { name: String },

    /// A name resolved, but not to the expected type.
    #[error("type name \"{name}\" is bound to a different type than expected")]
    TypeMismatch { name: String },

    /// Two fields of one type computed the same wire name.
    #[error("duplicate field \"{wire_name}\" on type \"{type_name}\"")]
    DuplicateField {
        type_name: String,
        wire_name: String,
    },

    /// An abstract draft was compiled directly instead of mixed in.
    #[error("abstract definition \"{name}\" cannot be registered")]
    AbstractMisuse { name: String },
}
