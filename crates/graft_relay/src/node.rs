//! The Node interface and global object lookup.

use crate::error::NodeResolutionError;
use crate::global_id::{decode_id, encode_id};
use graft_core::resolver::{Context, ResolverArgs, ResolverFn, ResolverResult};
use graft_schema::error::SchemaError;
use graft_schema::field::{ArgSpec, FieldSpec};
use graft_schema::registry::TypeRegistry;
use graft_schema::typedef::{TypeDef, TypeHandle, TypeKind, TypeResolverFn};
use graft_schema::TypeDraft;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::rc::Rc;

/// The external data-source collaborator.
///
/// The relay extension never touches storage itself: node lookups and
/// connection resolution are delegated here. Implementations are supplied
/// by the embedding application.
pub trait DataSource {
    /// Fetches the object addressed by a decoded global id.
    fn fetch_node(&self, node_type: &TypeHandle, raw_id: &str, ctx: &Context) -> ResolverResult;

    /// Builds the default resolver for a connection field over the named
    /// node type.
    fn make_connection_resolver(&self, type_name: &str) -> ResolverFn;
}

/// The relay extension over one registry.
///
/// Holds the connection memo and the data source; all synthesized types
/// register into the registry handed to [`Relay::new`].
pub struct Relay<D> {
    pub(crate) registry: TypeRegistry,
    pub(crate) data_source: Rc<D>,
    pub(crate) connections: FxHashMap<String, (TypeHandle, TypeHandle)>,
    pub(crate) node: Option<TypeHandle>,
    pub(crate) page_info: Option<TypeHandle>,
    pub(crate) type_resolver: TypeResolverFn,
}

/// The default dynamic type resolver: reads `__typename` from the value.
fn typename_resolver(value: &Value, _ctx: &Context) -> Option<String> {
    value
        .get("__typename")
        .and_then(Value::as_str)
        .map(str::to_string)
}

impl<D: DataSource + 'static> Relay<D> {
    /// Creates the extension over `registry`, delegating to `data_source`.
    pub fn new(registry: &TypeRegistry, data_source: D) -> Self {
        Self {
            registry: registry.clone(),
            data_source: Rc::new(data_source),
            connections: FxHashMap::default(),
            node: None,
            page_info: None,
            type_resolver: Rc::new(typename_resolver),
        }
    }

    /// Replaces the dynamic type resolver installed on the Node interface.
    ///
    /// Call before [`Relay::register_types`].
    #[must_use]
    pub fn with_type_resolver<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Context) -> Option<String> + 'static,
    {
        self.type_resolver = Rc::new(f);
        self
    }

    /// Registers the `Node` interface and the `PageInfo` object.
    pub fn register_types(&mut self) -> Result<(), SchemaError> {
        let registry = &self.registry;

        let type_resolver = Rc::clone(&self.type_resolver);
        let id_resolver = {
            let type_resolver = Rc::clone(&self.type_resolver);
            move |obj: &Value, _args: &ResolverArgs, ctx: &Context| -> ResolverResult {
                let id = node_id_with(&type_resolver, obj, ctx)?;
                Ok(Value::String(id))
            }
        };
        let node = TypeDraft::interface("Node")
            .description("An object with an ID")
            .field(
                "id",
                FieldSpec::new(registry.id().non_null())
                    .description("The id of the object.")
                    .resolver(id_resolver),
            )
            .type_resolver_fn(type_resolver)
            .compile(registry)?;

        let page_info = TypeDraft::object("PageInfo")
            .description("Information about pagination in a connection.")
            .field(
                "has_next_page",
                FieldSpec::new(registry.boolean().non_null())
                    .description("When paginating forwards, are there more items?"),
            )
            .field(
                "has_previous_page",
                FieldSpec::new(registry.boolean().non_null())
                    .description("When paginating backwards, are there more items?"),
            )
            .field(
                "start_cursor",
                FieldSpec::new(registry.string())
                    .description("When paginating backwards, the cursor to continue."),
            )
            .field(
                "end_cursor",
                FieldSpec::new(registry.string())
                    .description("When paginating forwards, the cursor to continue."),
            )
            .compile(registry)?;

        self.node = Some(node);
        self.page_info = Some(page_info);
        Ok(())
    }

    /// The registered Node interface, once [`Relay::register_types`] ran.
    pub fn node_interface(&self) -> Option<&TypeHandle> {
        self.node.as_ref()
    }

    /// The registered PageInfo object, once [`Relay::register_types`] ran.
    pub fn page_info(&self) -> Option<&TypeHandle> {
        self.page_info.as_ref()
    }

    /// The root lookup field: fetches an object given its global id.
    ///
    /// The resolver decodes the id, looks the concrete type up by its
    /// decoded name, and delegates to the data source. Malformed or
    /// unknown ids surface as [`NodeResolutionError`] at query time.
    pub fn node_field(&self) -> FieldSpec {
        let registry = self.registry.clone();
        let source = Rc::clone(&self.data_source);
        FieldSpec::new(self.registry.by_name("Node"))
            .description("Fetches an object given its ID")
            .arg(
                "id",
                ArgSpec::new(self.registry.id().non_null()).description("The ID of an object"),
            )
            .resolver(move |_parent, args, ctx| {
                let id: String = args.require("id")?;
                let (type_name, raw_id) = decode_id(&id)?;
                let node_type = registry
                    .lookup(&type_name)
                    .ok_or(NodeResolutionError::UnknownType(type_name.clone()))?;
                if node_type.kind() != TypeKind::Object {
                    return Err(NodeResolutionError::NotAnObject(type_name).into());
                }
                source.fetch_node(&node_type, &raw_id, ctx)
            })
    }

    /// Encodes the global id of `obj`.
    ///
    /// The concrete type is resolved through the Node interface's dynamic
    /// type-resolution capability; the raw id comes from the object's `id`
    /// value. The id is built per request and never persisted.
    pub fn node_id_for(&self, obj: &Value, ctx: &Context) -> Result<String, NodeResolutionError> {
        match &self.node {
            Some(handle) => match &**handle {
                TypeDef::Interface(def) => {
                    let type_name = def
                        .resolve_concrete(obj, ctx)
                        .ok_or(NodeResolutionError::UnresolvedType)?;
                    Ok(encode_id(&type_name, &raw_id_of(obj)?))
                }
                _ => Err(NodeResolutionError::UnresolvedType),
            },
            None => {
                let id = node_id_with(&self.type_resolver, obj, ctx)?;
                Ok(id)
            }
        }
    }
}

fn node_id_with(
    type_resolver: &TypeResolverFn,
    obj: &Value,
    ctx: &Context,
) -> Result<String, NodeResolutionError> {
    let type_name = type_resolver(obj, ctx).ok_or(NodeResolutionError::UnresolvedType)?;
    Ok(encode_id(&type_name, &raw_id_of(obj)?))
}

fn raw_id_of(obj: &Value) -> Result<String, NodeResolutionError> {
    match obj.get("id") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(NodeResolutionError::MissingId),
    }
}
