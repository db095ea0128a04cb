//! Immutable compiled type definitions.
//!
//! A [`TypeDef`] is constructed once by the compiler and never mutated
//! afterwards; [`TypeHandle`]s share it by reference counting, and handle
//! identity (`Rc::ptr_eq`) is what the registry means by "the same type".

use crate::field::FieldDef;
use crate::typeref::TypeRef;
use graft_core::resolver::Context;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// A shared handle to a compiled type.
pub type TypeHandle = Rc<TypeDef>;

/// Resolves a runtime value to the name of its concrete object type.
///
/// Interfaces carry one of these so a polymorphic value can be mapped back
/// to a registered type at query time.
pub type TypeResolverFn = Rc<dyn Fn(&Value, &Context) -> Option<String>>;

/// The kind of a compiled type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    InputObject,
    Union,
}

impl TypeKind {
    /// A short lowercase label for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Scalar => "scalar",
            TypeKind::Object => "object",
            TypeKind::Interface => "interface",
            TypeKind::InputObject => "input object",
            TypeKind::Union => "union",
        }
    }
}

/// A compiled type definition.
#[derive(Debug)]
pub enum TypeDef {
    Scalar(ScalarDef),
    Object(ObjectDef),
    Interface(InterfaceDef),
    InputObject(InputObjectDef),
    Union(UnionDef),
}

impl TypeDef {
    /// The registered name.
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Scalar(d) => &d.name,
            TypeDef::Object(d) => &d.name,
            TypeDef::Interface(d) => &d.name,
            TypeDef::InputObject(d) => &d.name,
            TypeDef::Union(d) => &d.name,
        }
    }

    /// The kind of the type.
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDef::Scalar(_) => TypeKind::Scalar,
            TypeDef::Object(_) => TypeKind::Object,
            TypeDef::Interface(_) => TypeKind::Interface,
            TypeDef::InputObject(_) => TypeKind::InputObject,
            TypeDef::Union(_) => TypeKind::Union,
        }
    }

    /// The description, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            TypeDef::Scalar(d) => d.description.as_deref(),
            TypeDef::Object(d) => d.description.as_deref(),
            TypeDef::Interface(d) => d.description.as_deref(),
            TypeDef::InputObject(d) => d.description.as_deref(),
            TypeDef::Union(d) => d.description.as_deref(),
        }
    }

    /// The ordered field map, for kinds that carry fields.
    pub fn fields(&self) -> Option<&IndexMap<String, FieldDef>> {
        match self {
            TypeDef::Object(d) => Some(&d.fields),
            TypeDef::Interface(d) => Some(&d.fields),
            TypeDef::InputObject(d) => Some(&d.fields),
            TypeDef::Scalar(_) | TypeDef::Union(_) => None,
        }
    }

    /// Looks up a field by wire name.
    pub fn field(&self, wire_name: &str) -> Option<&FieldDef> {
        self.fields().and_then(|fields| fields.get(wire_name))
    }
}

/// A scalar type.
#[derive(Debug, Clone)]
pub struct ScalarDef {
    pub name: String,
    pub description: Option<String>,
}

/// An object type.
#[derive(Debug)]
pub struct ObjectDef {
    pub name: String,
    pub description: Option<String>,
    /// Fields in declaration order, keyed by wire name.
    pub fields: IndexMap<String, FieldDef>,
    /// Interfaces this object implements.
    pub implements: Vec<TypeRef>,
}

/// An interface type.
pub struct InterfaceDef {
    pub name: String,
    pub description: Option<String>,
    /// Fields in declaration order, keyed by wire name.
    pub fields: IndexMap<String, FieldDef>,
    /// Maps a runtime value to its concrete object type name.
    pub type_resolver: Option<TypeResolverFn>,
}

impl InterfaceDef {
    /// Resolves a runtime value to its concrete type name, if possible.
    pub fn resolve_concrete(&self, value: &Value, ctx: &Context) -> Option<String> {
        self.type_resolver.as_ref().and_then(|f| f(value, ctx))
    }
}

impl fmt::Debug for InterfaceDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceDef")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("has_type_resolver", &self.type_resolver.is_some())
            .finish()
    }
}

/// An input object type.
#[derive(Debug)]
pub struct InputObjectDef {
    pub name: String,
    pub description: Option<String>,
    /// Fields in declaration order, keyed by wire name.
    pub fields: IndexMap<String, FieldDef>,
}

/// A union type.
#[derive(Debug)]
pub struct UnionDef {
    pub name: String,
    pub description: Option<String>,
    /// Member references, in the order supplied.
    pub members: Vec<TypeRef>,
}
