//! Union construction from an explicit member list.
//!
//! Unions build in two phases: membership is assembled first, then the
//! union is constructed and registered without touching the implementor
//! index. Linking implementors is exclusively the post-construction pass
//! in [`TypeRegistry::validate`], which also checks that every member
//! resolves to an object type. Members may still be forward names when
//! the union registers.

use crate::error::SchemaError;
use crate::registry::TypeRegistry;
use crate::typedef::{TypeDef, TypeHandle, UnionDef};
use crate::typeref::TypeRef;
use std::rc::Rc;

/// A union definition awaiting compilation.
#[derive(Clone)]
pub struct UnionDraft {
    name: String,
    description: Option<String>,
    members: Vec<TypeRef>,
}

impl UnionDraft {
    /// Starts a union draft.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            members: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a member type.
    pub fn member(mut self, member: impl Into<TypeRef>) -> Self {
        self.members.push(member.into());
        self
    }

    /// Appends several member types.
    pub fn members<I, T>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeRef>,
    {
        self.members.extend(members.into_iter().map(Into::into));
        self
    }

    /// Compiles this union against `registry` and registers it.
    pub fn compile(&self, registry: &TypeRegistry) -> Result<TypeHandle, SchemaError> {
        for member in &self.members {
            registry.check_reference(member)?;
        }
        let handle = Rc::new(TypeDef::Union(UnionDef {
            name: self.name.clone(),
            description: self.description.clone(),
            members: self.members.clone(),
        }));
        registry.register(&self.name, handle.clone())?;
        tracing::debug!(name = %self.name, members = self.members.len(), "compiled union");
        Ok(handle)
    }
}
