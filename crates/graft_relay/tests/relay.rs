//! Integration tests for the relay extension.

use graft_core::resolver::{Context, ResolverArgs, ResolverFn, ResolverResult};
use graft_relay::{connection_args, decode_id, encode_id, DataSource, Relay};
use graft_schema::typedef::TypeHandle;
use graft_schema::{Schema, TypeDraft, TypeRegistry};
use serde_json::{json, Value};
use std::rc::Rc;

/// A data source that echoes what it was asked for.
struct StubSource;

impl DataSource for StubSource {
    fn fetch_node(&self, node_type: &TypeHandle, raw_id: &str, _ctx: &Context) -> ResolverResult {
        Ok(json!({
            "__typename": node_type.name(),
            "id": raw_id,
        }))
    }

    fn make_connection_resolver(&self, type_name: &str) -> ResolverFn {
        let type_name = type_name.to_string();
        Rc::new(move |_parent, _args, _ctx| {
            Ok(json!({
                "nodeType": type_name,
                "edges": [],
            }))
        })
    }
}

fn relay_fixture() -> (TypeRegistry, Relay<StubSource>) {
    let registry = TypeRegistry::new();
    let mut relay = Relay::new(&registry, StubSource);
    relay.register_types().unwrap();
    (registry, relay)
}

#[test]
fn test_register_types_builds_node_and_page_info() {
    let (registry, relay) = relay_fixture();

    let node = registry.lookup("Node").unwrap();
    assert!(Rc::ptr_eq(&node, relay.node_interface().unwrap()));
    assert_eq!(node.field("id").unwrap().ty.to_string(), "ID!");

    let page_info = registry.lookup("PageInfo").unwrap();
    let wire_names: Vec<&String> = page_info.fields().unwrap().keys().collect();
    assert_eq!(
        wire_names,
        ["hasNextPage", "hasPreviousPage", "startCursor", "endCursor"],
    );
    assert_eq!(
        page_info.field("hasNextPage").unwrap().ty.to_string(),
        "Boolean!",
    );
    assert_eq!(
        page_info.field("startCursor").unwrap().ty.to_string(),
        "String",
    );
}

#[test]
fn test_node_field_fetches_through_the_data_source() {
    let (registry, relay) = relay_fixture();
    TypeDraft::object("Dog")
        .field("id", registry.id().non_null())
        .field("name", registry.string())
        .compile(&registry)
        .unwrap();
    let query = TypeDraft::object("Query")
        .field("node", relay.node_field())
        .compile(&registry)
        .unwrap();
    Schema::new(&registry, "Query").unwrap();

    let field = query.field("node").unwrap();
    assert_eq!(field.args.keys().collect::<Vec<_>>(), ["id"]);
    assert_eq!(field.args["id"].ty.to_string(), "ID!");

    let resolver = field.resolver.as_ref().unwrap();
    let mut args = ResolverArgs::new();
    args.set("id", json!(encode_id("Dog", "42")));
    let fetched = resolver(&Value::Null, &args, &Context::new()).unwrap();
    assert_eq!(fetched, json!({"__typename": "Dog", "id": "42"}));
}

#[test]
fn test_node_field_rejects_bad_ids() {
    let (registry, relay) = relay_fixture();
    TypeDraft::object("Query")
        .field("node", relay.node_field())
        .compile(&registry)
        .unwrap();

    let query = registry.lookup("Query").unwrap();
    let resolver = query.field("node").unwrap().resolver.as_ref().unwrap();
    let ctx = Context::new();

    // Not base64 at all.
    let mut args = ResolverArgs::new();
    args.set("id", json!("!!!"));
    assert!(resolver(&Value::Null, &args, &ctx).is_err());

    // Unknown decoded type.
    let mut args = ResolverArgs::new();
    args.set("id", json!(encode_id("Ghost", "1")));
    let err = resolver(&Value::Null, &args, &ctx).unwrap_err();
    assert!(err.to_string().contains("Ghost"));

    // A registered name that is not an object type.
    let mut args = ResolverArgs::new();
    args.set("id", json!(encode_id("Node", "1")));
    let err = resolver(&Value::Null, &args, &ctx).unwrap_err();
    assert!(err.to_string().contains("Node"));
}

#[test]
fn test_node_id_round_trips_through_the_interface() {
    let (_registry, relay) = relay_fixture();
    let ctx = Context::new();

    let dog = json!({"__typename": "Dog", "id": "42"});
    let global_id = relay.node_id_for(&dog, &ctx).unwrap();
    assert_eq!(
        decode_id(&global_id).unwrap(),
        ("Dog".to_string(), "42".to_string()),
    );

    // The Node interface's id field computes the same value.
    let id_field = relay.node_interface().unwrap().field("id").unwrap();
    let resolver = id_field.resolver.as_ref().unwrap();
    let resolved = resolver(&dog, &ResolverArgs::new(), &ctx).unwrap();
    assert_eq!(resolved, json!(global_id));
}

#[test]
fn test_connection_definitions_are_memoized() {
    let (registry, mut relay) = relay_fixture();
    let dog = TypeDraft::object("Dog")
        .field("id", registry.id().non_null())
        .compile(&registry)
        .unwrap();

    let (first_conn, first_edge) = relay.connection_definitions("Dog", &dog).unwrap();
    let (second_conn, second_edge) = relay.connection_definitions("Dog", &dog).unwrap();
    assert!(Rc::ptr_eq(&first_conn, &second_conn));
    assert!(Rc::ptr_eq(&first_edge, &second_edge));

    assert_eq!(first_conn.name(), "DogConnection");
    assert_eq!(first_edge.name(), "DogEdge");
    assert_eq!(
        first_conn.field("pageInfo").unwrap().ty.to_string(),
        "PageInfo!",
    );
    assert_eq!(first_conn.field("edges").unwrap().ty.to_string(), "[DogEdge]");
    assert_eq!(first_edge.field("cursor").unwrap().ty.to_string(), "String!");

    let node_field = first_edge.field("node").unwrap();
    assert!(Rc::ptr_eq(&registry.resolve(&node_field.ty).unwrap(), &dog));
}

#[test]
fn test_connection_field_merges_pagination_args() {
    let (registry, mut relay) = relay_fixture();
    TypeDraft::object("Dog")
        .field("id", registry.id().non_null())
        .compile(&registry)
        .unwrap();

    let extra = vec![("breed".to_string(), registry.string().into())];
    let spec = relay
        .connection_field("Dog", registry.by_name("Dog"), extra, None)
        .unwrap();
    let query = TypeDraft::object("Query")
        .field("dogs", spec)
        .compile(&registry)
        .unwrap();
    Schema::new(&registry, "Query").unwrap();

    let field = query.field("dogs").unwrap();
    assert_eq!(field.ty.to_string(), "DogConnection");
    assert_eq!(
        field.args.keys().collect::<Vec<_>>(),
        ["breed", "first", "after", "last", "before"],
    );

    // The default resolver comes from the data source.
    let resolver = field.resolver.as_ref().unwrap();
    let value = resolver(&Value::Null, &ResolverArgs::new(), &Context::new()).unwrap();
    assert_eq!(value["nodeType"], json!("Dog"));
}

#[test]
fn test_connection_args_contract() {
    let registry = TypeRegistry::new();
    let names: Vec<String> = connection_args(&registry)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, ["first", "after", "last", "before"]);
}

#[test]
fn test_relay_mutations_use_the_mutation_namespace() {
    let (registry, relay) = relay_fixture();
    TypeDraft::object("Query")
        .field("node", relay.node_field())
        .compile(&registry)
        .unwrap();

    let add_dog = relay
        .mutation(
            TypeDraft::object("AddDog")
                .field("client_mutation_id", registry.string())
                .field("dog_name", registry.string().non_null()),
        )
        .unwrap();

    assert!(registry.lookup("AddDog").is_none());
    assert!(Rc::ptr_eq(&registry.mutation("AddDog").unwrap(), &add_dog));
    let wire_names: Vec<&String> = add_dog.fields().unwrap().keys().collect();
    assert_eq!(wire_names, ["clientMutationId", "dogName"]);

    let schema = Schema::new(&registry, "Query")
        .unwrap()
        .with_mutation_root()
        .unwrap();
    let mutation = schema.mutation_type().unwrap();
    assert!(mutation.field("addDog").is_some());
}
