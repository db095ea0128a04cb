//! Mutation registration.

use crate::node::{DataSource, Relay};
use graft_schema::error::SchemaError;
use graft_schema::typedef::TypeHandle;
use graft_schema::TypeDraft;

impl<D: DataSource + 'static> Relay<D> {
    /// Compiles a draft into the registry's mutation namespace.
    ///
    /// The draft goes through the standard compile pipeline; only the
    /// target namespace differs, so mutation names never collide with
    /// ordinary type names.
    pub fn mutation(&self, draft: TypeDraft) -> Result<TypeHandle, SchemaError> {
        draft.into_mutation().compile(&self.registry)
    }
}
