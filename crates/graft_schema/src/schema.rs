//! Assembly of the finished schema object.
//!
//! A [`Schema`] is what gets handed to the external query-execution
//! engine: the validated registry plus resolved root types. Building one
//! runs the deferred second resolution phase, so every forward reference
//! recorded during construction must exist by now.

use crate::error::SchemaError;
use crate::registry::TypeRegistry;
use crate::typedef::TypeHandle;

/// The finished, validated schema.
#[derive(Debug, Clone)]
pub struct Schema {
    registry: TypeRegistry,
    query: TypeHandle,
    mutation: Option<TypeHandle>,
}

impl Schema {
    /// Validates the registry and resolves the query root.
    pub fn new(registry: &TypeRegistry, query_root: &str) -> Result<Self, SchemaError> {
        registry.validate()?;
        let query = registry
            .lookup(query_root)
            .ok_or_else(|| SchemaError::UnregisteredType {
                name: query_root.to_string(),
            })?;
        Ok(Self {
            registry: registry.clone(),
            query,
            mutation: None,
        })
    }

    /// Synthesizes and attaches the mutation root from the registry's
    /// mutation namespace.
    pub fn with_mutation_root(mut self) -> Result<Self, SchemaError> {
        let root = self.registry.mutation_root()?;
        self.registry.validate()?;
        self.mutation = Some(root);
        Ok(self)
    }

    /// The query root type.
    pub fn query_type(&self) -> &TypeHandle {
        &self.query
    }

    /// The mutation root type, if attached.
    pub fn mutation_type(&self) -> Option<&TypeHandle> {
        self.mutation.as_ref()
    }

    /// The underlying registry, for type lookup during execution.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
}
