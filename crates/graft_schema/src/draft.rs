//! The declarative compiler.
//!
//! A [`TypeDraft`] is a class-shaped definition: an ordered list of named
//! attributes, optionally preceded by the attributes of mixin drafts.
//! Compiling a draft extracts its field-shaped attributes in declaration
//! order, computes wire names, rejects duplicates, checks references
//! against the owning registry, constructs the immutable [`TypeDef`] and
//! registers it. Construction either completes or leaves the registry
//! untouched.

use crate::error::SchemaError;
use crate::field::{FieldDef, FieldSpec, InputValueDef};
use crate::registry::TypeRegistry;
use crate::typedef::{
    InputObjectDef, InterfaceDef, ObjectDef, TypeDef, TypeHandle, TypeResolverFn,
};
use crate::typeref::TypeRef;
use graft_core::resolver::Context;
use graft_core::to_camel_case;
use indexmap::IndexMap;
use serde_json::Value;
use std::rc::Rc;

/// A named attribute in a draft body.
///
/// Only type references and explicit field constructors become fields;
/// any other value is carried but ignored by field extraction.
#[derive(Clone)]
pub enum Attr {
    /// Shorthand: the attribute is a bare type reference.
    Type(TypeRef),
    /// An explicit field constructor.
    Field(FieldSpec),
    /// A non-field attribute, ignored by extraction.
    Value(Value),
}

impl From<TypeRef> for Attr {
    fn from(ty: TypeRef) -> Self {
        Self::Type(ty)
    }
}

impl From<FieldSpec> for Attr {
    fn from(spec: FieldSpec) -> Self {
        Self::Field(spec)
    }
}

impl From<Value> for Attr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// What a draft compiles into, and which namespace receives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKind {
    Object,
    Interface,
    InputObject,
    /// Compiles like an object but registers into the mutation namespace.
    Mutation,
}

/// A class-shaped type definition awaiting compilation.
#[derive(Clone)]
pub struct TypeDraft {
    kind: DraftKind,
    name: String,
    description: Option<String>,
    is_abstract: bool,
    mixins: Vec<TypeDraft>,
    attrs: Vec<(String, Attr)>,
    implements: Vec<TypeRef>,
    type_resolver: Option<TypeResolverFn>,
}

impl TypeDraft {
    fn new(kind: DraftKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: None,
            is_abstract: false,
            mixins: Vec::new(),
            attrs: Vec::new(),
            implements: Vec::new(),
            type_resolver: None,
        }
    }

    /// Starts an object type draft.
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(DraftKind::Object, name)
    }

    /// Starts an interface draft.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(DraftKind::Interface, name)
    }

    /// Starts an input object draft.
    pub fn input(name: impl Into<String>) -> Self {
        Self::new(DraftKind::InputObject, name)
    }

    /// Starts a mutation draft.
    pub fn mutation(name: impl Into<String>) -> Self {
        Self::new(DraftKind::Mutation, name)
    }

    /// Re-targets this draft at the mutation namespace.
    #[must_use]
    pub fn into_mutation(mut self) -> Self {
        self.kind = DraftKind::Mutation;
        self
    }

    /// The draft's declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks this draft abstract: it contributes fields through
    /// [`TypeDraft::mixin`] only and can never be compiled directly.
    #[must_use]
    pub fn abstract_only(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Appends a field-shaped attribute.
    pub fn field(mut self, name: impl Into<String>, def: impl Into<Attr>) -> Self {
        self.attrs.push((name.into(), def.into()));
        self
    }

    /// Appends a non-field attribute; extraction ignores it.
    pub fn attr(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attrs.push((name.into(), Attr::Value(value)));
        self
    }

    /// Mixes in another draft: its attributes are inserted ahead of this
    /// draft's own, in the mixin's declared order.
    pub fn mixin(mut self, draft: TypeDraft) -> Self {
        self.mixins.push(draft);
        self
    }

    /// Declares an implemented interface (object drafts).
    pub fn implements(mut self, interface: impl Into<TypeRef>) -> Self {
        self.implements.push(interface.into());
        self
    }

    /// Installs a dynamic type resolver (interface drafts).
    pub fn type_resolver<F>(self, f: F) -> Self
    where
        F: Fn(&Value, &Context) -> Option<String> + 'static,
    {
        self.type_resolver_fn(Rc::new(f))
    }

    /// Installs an already-shared dynamic type resolver.
    pub fn type_resolver_fn(mut self, f: TypeResolverFn) -> Self {
        self.type_resolver = Some(f);
        self
    }

    /// Collects attributes depth-first: mixins ahead of the draft's own.
    fn collect_attrs<'a>(&'a self, out: &mut Vec<&'a (String, Attr)>) {
        for mixin in &self.mixins {
            mixin.collect_attrs(out);
        }
        out.extend(self.attrs.iter());
    }

    /// Compiles this draft against `registry` and registers the result.
    ///
    /// The returned handle is the stable reference to the constructed type.
    /// Abstract drafts fail with [`SchemaError::AbstractMisuse`]; duplicate
    /// wire names fail with [`SchemaError::DuplicateField`]; a concrete
    /// reference to a foreign or shadowed type fails before anything is
    /// registered.
    pub fn compile(&self, registry: &TypeRegistry) -> Result<TypeHandle, SchemaError> {
        if self.is_abstract {
            return Err(SchemaError::AbstractMisuse {
                name: self.name.clone(),
            });
        }

        let mut ordered = Vec::new();
        self.collect_attrs(&mut ordered);

        let mut fields: IndexMap<String, FieldDef> = IndexMap::new();
        let mut index = 0;
        for (attr_name, attr) in ordered {
            let spec = match attr {
                Attr::Type(ty) => FieldSpec::new(ty.clone()),
                Attr::Field(spec) => spec.clone(),
                Attr::Value(_) => continue,
            };

            let wire_name = spec
                .wire_name
                .clone()
                .unwrap_or_else(|| to_camel_case(attr_name));
            if fields.contains_key(&wire_name) {
                return Err(SchemaError::DuplicateField {
                    type_name: self.name.clone(),
                    wire_name,
                });
            }

            registry.check_reference(&spec.ty)?;
            let mut args: IndexMap<String, InputValueDef> = IndexMap::new();
            for (arg_name, arg) in &spec.args {
                registry.check_reference(&arg.ty)?;
                // Last write wins; the first occurrence keeps its position.
                args.insert(
                    arg_name.clone(),
                    InputValueDef {
                        name: arg_name.clone(),
                        ty: arg.ty.clone(),
                        description: arg.description.clone(),
                        default_value: arg.default_value.clone(),
                    },
                );
            }

            fields.insert(
                wire_name.clone(),
                FieldDef {
                    name: attr_name.clone(),
                    wire_name,
                    ty: spec.ty,
                    description: spec.description,
                    args,
                    resolver: spec.resolver,
                    default_value: spec.default_value,
                    index,
                },
            );
            index += 1;
        }

        for interface in &self.implements {
            registry.check_reference(interface)?;
        }

        let def = match self.kind {
            DraftKind::Object | DraftKind::Mutation => TypeDef::Object(ObjectDef {
                name: self.name.clone(),
                description: self.description.clone(),
                fields,
                implements: self.implements.clone(),
            }),
            DraftKind::Interface => TypeDef::Interface(InterfaceDef {
                name: self.name.clone(),
                description: self.description.clone(),
                fields,
                type_resolver: self.type_resolver.clone(),
            }),
            DraftKind::InputObject => TypeDef::InputObject(InputObjectDef {
                name: self.name.clone(),
                description: self.description.clone(),
                fields,
            }),
        };

        let handle = Rc::new(def);
        match self.kind {
            DraftKind::Mutation => registry.register_mutation(&self.name, handle.clone())?,
            _ => registry.register(&self.name, handle.clone())?,
        }
        tracing::debug!(
            name = %self.name,
            fields = handle.fields().map_or(0, IndexMap::len),
            "compiled type"
        );
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_keep_declaration_order() {
        let registry = TypeRegistry::new();
        let dog = TypeDraft::object("Dog")
            .field("id", registry.id())
            .field("name", registry.string())
            .field("dog", registry.by_name("Dog"))
            .field("some_other_field", registry.string())
            .compile(&registry)
            .unwrap();

        let wire_names: Vec<&String> = dog.fields().unwrap().keys().collect();
        assert_eq!(wire_names, ["id", "name", "dog", "someOtherField"]);

        // The self-reference resolves to the very same handle.
        let field = dog.field("dog").unwrap();
        let resolved = registry.resolve(&field.ty).unwrap();
        assert!(Rc::ptr_eq(&resolved, &dog));
    }

    #[test]
    fn test_non_field_attrs_are_ignored() {
        let registry = TypeRegistry::new();
        let dog = TypeDraft::object("Dog")
            .attr("table_name", json!("dogs"))
            .field("name", registry.string())
            .attr("cache_ttl", json!(60))
            .compile(&registry)
            .unwrap();

        let fields = dog.fields().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["name"].index, 0);
    }

    #[test]
    fn test_duplicate_wire_names_are_rejected() {
        let registry = TypeRegistry::new();
        let err = TypeDraft::object("Dog")
            .field("some_name", registry.string())
            .field("someName", registry.string())
            .compile(&registry)
            .unwrap_err();

        assert_eq!(
            err,
            SchemaError::DuplicateField {
                type_name: "Dog".to_string(),
                wire_name: "someName".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "duplicate field \"someName\" on type \"Dog\"",
        );
        // Nothing was registered by the failed construction.
        assert!(registry.lookup("Dog").is_none());
    }

    #[test]
    fn test_mixin_fields_come_first() {
        let registry = TypeRegistry::new();
        let timestamps = TypeDraft::object("Timestamps")
            .abstract_only()
            .field("created_at", registry.string())
            .field("updated_at", registry.string());

        let dog = TypeDraft::object("Dog")
            .mixin(timestamps.clone())
            .field("name", registry.string())
            .compile(&registry)
            .unwrap();

        let wire_names: Vec<&String> = dog.fields().unwrap().keys().collect();
        assert_eq!(wire_names, ["createdAt", "updatedAt", "name"]);
        assert_eq!(dog.field("name").unwrap().index, 2);

        // The abstract draft itself never registers.
        let err = timestamps.compile(&registry).unwrap_err();
        assert_eq!(
            err,
            SchemaError::AbstractMisuse {
                name: "Timestamps".to_string()
            }
        );
        assert!(registry.lookup("Timestamps").is_none());
    }

    #[test]
    fn test_nested_mixins_flatten_in_order() {
        let registry = TypeRegistry::new();
        let base = TypeDraft::object("Base")
            .abstract_only()
            .field("id", registry.id());
        let named = TypeDraft::object("Named")
            .abstract_only()
            .mixin(base)
            .field("name", registry.string());

        let dog = TypeDraft::object("Dog")
            .mixin(named)
            .field("breed", registry.string())
            .compile(&registry)
            .unwrap();

        let wire_names: Vec<&String> = dog.fields().unwrap().keys().collect();
        assert_eq!(wire_names, ["id", "name", "breed"]);
    }

    #[test]
    fn test_wire_name_override() {
        let registry = TypeRegistry::new();
        let dog = TypeDraft::object("Dog")
            .field(
                "internal_name",
                FieldSpec::new(registry.string()).wire_name("label"),
            )
            .compile(&registry)
            .unwrap();

        let field = dog.field("label").unwrap();
        assert_eq!(field.name, "internal_name");
        assert_eq!(field.wire_name, "label");
    }

    #[test]
    fn test_foreign_concrete_reference_aborts_compilation() {
        let home = TypeRegistry::new();
        let away = TypeRegistry::new();
        let cat = TypeDraft::object("Cat")
            .field("name", away.string())
            .compile(&away)
            .unwrap();

        let err = TypeDraft::object("Dog")
            .field("enemy", TypeRef::from(&cat))
            .compile(&home)
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnregisteredType { .. }));
        assert!(home.lookup("Dog").is_none());
    }

    #[test]
    fn test_mutation_draft_targets_mutation_namespace() {
        let registry = TypeRegistry::new();
        let add_dog = TypeDraft::mutation("AddDog")
            .field("dog", registry.by_name("Dog"))
            .compile(&registry)
            .unwrap();

        assert!(registry.lookup("AddDog").is_none());
        assert!(Rc::ptr_eq(&registry.mutation("AddDog").unwrap(), &add_dog));
    }
}
