//! Declarative schema-graph compiler.
//!
//! This crate turns class-shaped drafts into a linked graph of schema types
//! consumed by an external query-execution engine:
//! - `typeref`: type references and the modifier algebra
//! - `typedef`: the immutable compiled type definitions
//! - `field`: field and argument declarations
//! - `registry`: the name→type namespace and reference resolution
//! - `draft`: the declarative compiler pipeline
//! - `union`: union construction from an explicit member list
//! - `schema`: assembly of the finished schema object
//!
//! All construction happens during a one-time, sequential schema build.
//! A [`registry::TypeRegistry`] is an explicit per-session value (never a
//! process singleton) and is deliberately not `Send`: the contract is
//! single-writer, build-time-only mutation.

pub mod draft;
pub mod error;
pub mod field;
pub mod registry;
pub mod schema;
pub mod typedef;
pub mod typeref;
pub mod union;

pub use draft::{Attr, DraftKind, TypeDraft};
pub use error::SchemaError;
pub use field::{ArgSpec, FieldDef, FieldSpec, InputValueDef};
pub use registry::TypeRegistry;
pub use schema::Schema;
pub use typedef::{
    InputObjectDef, InterfaceDef, ObjectDef, ScalarDef, TypeDef, TypeHandle, TypeKind,
    TypeResolverFn, UnionDef,
};
pub use typeref::{BuiltinScalar, TypeRef};
pub use union::UnionDraft;
