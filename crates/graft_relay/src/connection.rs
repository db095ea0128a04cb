//! Connection/Edge synthesis and cursor pagination arguments.

use crate::node::{DataSource, Relay};
use graft_core::resolver::ResolverFn;
use graft_schema::error::SchemaError;
use graft_schema::field::{ArgSpec, FieldSpec};
use graft_schema::registry::TypeRegistry;
use graft_schema::typedef::TypeHandle;
use graft_schema::typeref::TypeRef;
use graft_schema::TypeDraft;

/// The fixed cursor pagination argument set, in wire order.
///
/// The pagination algorithm itself lives in the execution layer; these
/// names are its contract.
pub fn connection_args(registry: &TypeRegistry) -> Vec<(String, ArgSpec)> {
    vec![
        ("first".to_string(), ArgSpec::new(registry.int())),
        ("after".to_string(), ArgSpec::new(registry.string())),
        ("last".to_string(), ArgSpec::new(registry.int())),
        ("before".to_string(), ArgSpec::new(registry.string())),
    ]
}

impl<D: DataSource + 'static> Relay<D> {
    /// Synthesizes (or returns the memoized) Connection/Edge pair for
    /// `name` around `node_type`.
    ///
    /// The pair is built at most once per name within this extension;
    /// repeated calls return the identical handles.
    pub fn connection_definitions(
        &mut self,
        name: &str,
        node_type: impl Into<TypeRef>,
    ) -> Result<(TypeHandle, TypeHandle), SchemaError> {
        if let Some(pair) = self.connections.get(name) {
            return Ok(pair.clone());
        }

        let registry = &self.registry;
        let edge = TypeDraft::object(format!("{name}Edge"))
            .field(
                "node",
                FieldSpec::new(node_type.into()).description("The item at the end of the edge"),
            )
            .field(
                "cursor",
                FieldSpec::new(registry.string().non_null())
                    .description("A cursor for use in pagination"),
            )
            .compile(registry)?;

        let connection = TypeDraft::object(format!("{name}Connection"))
            .field("page_info", registry.by_name("PageInfo").non_null())
            .field("edges", TypeRef::from(&edge).list())
            .compile(registry)?;

        tracing::debug!(name = %name, "synthesized connection/edge pair");
        self.connections
            .insert(name.to_string(), (connection.clone(), edge.clone()));
        Ok((connection, edge))
    }

    /// Builds a connection field over `node_type`.
    ///
    /// Caller-supplied arguments come first; the fixed pagination
    /// arguments are appended and win on a name clash. Without an explicit
    /// resolver the data source's connection resolver is installed.
    pub fn connection_field(
        &mut self,
        name: &str,
        node_type: impl Into<TypeRef>,
        extra_args: Vec<(String, ArgSpec)>,
        resolver: Option<ResolverFn>,
    ) -> Result<FieldSpec, SchemaError> {
        let node_type = node_type.into();
        let type_name = node_type.base_name().to_string();
        let (connection, _edge) = self.connection_definitions(name, node_type)?;

        let resolver =
            resolver.unwrap_or_else(|| self.data_source.make_connection_resolver(&type_name));

        let mut spec = FieldSpec::new(TypeRef::from(&connection));
        for (arg_name, arg) in extra_args {
            spec = spec.arg(arg_name, arg);
        }
        for (arg_name, arg) in connection_args(&self.registry) {
            spec = spec.arg(arg_name, arg);
        }
        Ok(spec.resolver_fn(resolver))
    }
}
