//! Field and argument declarations.
//!
//! A [`FieldSpec`] is the explicit field constructor used inside a draft;
//! the compiler turns each one into an immutable [`FieldDef`] carrying the
//! computed wire name and the declaration-order index.

use crate::typeref::TypeRef;
use graft_core::resolver::{Context, ResolverArgs, ResolverFn, ResolverResult};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// An argument declaration on a field.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub(crate) ty: TypeRef,
    pub(crate) description: Option<String>,
    pub(crate) default_value: Option<Value>,
}

impl ArgSpec {
    /// Creates an argument of the given type.
    pub fn new(ty: impl Into<TypeRef>) -> Self {
        Self {
            ty: ty.into(),
            description: None,
            default_value: None,
        }
    }

    /// Sets the argument description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the argument default value.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }
}

impl From<TypeRef> for ArgSpec {
    fn from(ty: TypeRef) -> Self {
        Self::new(ty)
    }
}

/// The explicit field constructor.
#[derive(Clone)]
pub struct FieldSpec {
    pub(crate) ty: TypeRef,
    pub(crate) wire_name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) args: Vec<(String, ArgSpec)>,
    pub(crate) resolver: Option<ResolverFn>,
    pub(crate) default_value: Option<Value>,
}

impl FieldSpec {
    /// Creates a field of the given type.
    pub fn new(ty: impl Into<TypeRef>) -> Self {
        Self {
            ty: ty.into(),
            wire_name: None,
            description: None,
            args: Vec::new(),
            resolver: None,
            default_value: None,
        }
    }

    /// Overrides the computed wire name.
    pub fn wire_name(mut self, name: impl Into<String>) -> Self {
        self.wire_name = Some(name.into());
        self
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an argument. A later argument with the same name replaces the
    /// earlier value while keeping its position.
    pub fn arg(mut self, name: impl Into<String>, spec: impl Into<ArgSpec>) -> Self {
        self.args.push((name.into(), spec.into()));
        self
    }

    /// Sets the resolver from a closure.
    pub fn resolver<F>(self, f: F) -> Self
    where
        F: Fn(&Value, &ResolverArgs, &Context) -> ResolverResult + 'static,
    {
        self.resolver_fn(Rc::new(f))
    }

    /// Sets the resolver from an already-shared function.
    pub fn resolver_fn(mut self, f: ResolverFn) -> Self {
        self.resolver = Some(f);
        self
    }

    /// Sets the default value (input fields).
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// A compiled field definition.
#[derive(Clone)]
pub struct FieldDef {
    /// The declared attribute name.
    pub name: String,
    /// The wire name (`lowerCamelCase` unless overridden).
    pub wire_name: String,
    /// The field's type reference.
    pub ty: TypeRef,
    /// Optional description.
    pub description: Option<String>,
    /// Arguments, in declaration order, keyed by name.
    pub args: IndexMap<String, InputValueDef>,
    /// Optional resolver invoked by the execution engine.
    pub resolver: Option<ResolverFn>,
    /// Optional default value (input fields).
    pub default_value: Option<Value>,
    /// Declaration-order index, mixin fields included.
    pub index: usize,
}

impl fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("wire_name", &self.wire_name)
            .field("ty", &self.ty)
            .field("args", &self.args)
            .field("has_resolver", &self.resolver.is_some())
            .field("default_value", &self.default_value)
            .field("index", &self.index)
            .finish()
    }
}

/// A compiled argument or input value.
#[derive(Debug, Clone)]
pub struct InputValueDef {
    /// The argument name, as declared.
    pub name: String,
    /// The argument's type reference.
    pub ty: TypeRef,
    /// Optional description.
    pub description: Option<String>,
    /// Optional default value.
    pub default_value: Option<Value>,
}
