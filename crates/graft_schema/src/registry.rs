//! The name→type namespace and reference resolution.

use crate::error::SchemaError;
use crate::field::FieldDef;
use crate::typedef::{ScalarDef, TypeDef, TypeHandle, TypeKind};
use crate::typeref::{BuiltinScalar, TypeRef};
use graft_core::to_camel_case;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct Inner {
    /// The general namespace, in registration order. Built-in scalars are
    /// pre-registered and occupy the first entries.
    types: IndexMap<String, TypeHandle>,
    /// The mutation namespace, in registration order.
    mutations: IndexMap<String, TypeHandle>,
    /// Interface name → implementor names; rebuilt by [`TypeRegistry::validate`].
    implementors: FxHashMap<String, Vec<String>>,
}

/// The per-session type registry.
///
/// A registry owns one name→type namespace plus a separate mutation
/// namespace. It is a cheaply-cloneable handle: clones share the same
/// underlying maps, which is what lets resolver closures consult the
/// registry at query time. The handle is deliberately not `Send`: all
/// mutation happens on one thread during schema build, and multiple
/// independent registries coexist freely (one per schema-build session).
#[derive(Clone)]
pub struct TypeRegistry {
    inner: Rc<RefCell<Inner>>,
}

impl TypeRegistry {
    /// Creates a registry with the built-in scalars pre-registered.
    pub fn new() -> Self {
        let mut types = IndexMap::new();
        for scalar in BuiltinScalar::ALL {
            let name = scalar.name();
            types.insert(
                name.to_string(),
                Rc::new(TypeDef::Scalar(ScalarDef {
                    name: name.to_string(),
                    description: Some(format!("Built-in {name} scalar")),
                })),
            );
        }
        Self {
            inner: Rc::new(RefCell::new(Inner {
                types,
                mutations: IndexMap::new(),
                implementors: FxHashMap::default(),
            })),
        }
    }

    /// Returns true if both handles refer to the same registry.
    pub fn same_registry(&self, other: &TypeRegistry) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Registers a type under `name`.
    ///
    /// Registering the same handle under the same name again is an
    /// idempotent no-op; a different handle fails with
    /// [`SchemaError::NameCollision`]. Names are immutable once bound.
    pub fn register(&self, name: impl Into<String>, handle: TypeHandle) -> Result<(), SchemaError> {
        let name = name.into();
        let mut inner = self.inner.borrow_mut();
        match inner.types.get(&name) {
            Some(existing) if Rc::ptr_eq(existing, &handle) => Ok(()),
            Some(_) => Err(SchemaError::NameCollision { name }),
            None => {
                tracing::debug!(name = %name, kind = handle.kind().as_str(), "registered type");
                inner.types.insert(name, handle);
                Ok(())
            }
        }
    }

    /// Registers a type into the mutation namespace.
    ///
    /// Same collision semantics as [`TypeRegistry::register`], scoped to
    /// the mutation namespace.
    pub fn register_mutation(
        &self,
        name: impl Into<String>,
        handle: TypeHandle,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        let mut inner = self.inner.borrow_mut();
        match inner.mutations.get(&name) {
            Some(existing) if Rc::ptr_eq(existing, &handle) => Ok(()),
            Some(_) => Err(SchemaError::NameCollision { name }),
            None => {
                tracing::debug!(name = %name, "registered mutation");
                inner.mutations.insert(name, handle);
                Ok(())
            }
        }
    }

    /// Returns a lazy reference to `name`.
    ///
    /// The reference is valid even before `name` finishes construction;
    /// resolution is deferred until the owner's field list is finalized.
    pub fn by_name(&self, name: impl Into<String>) -> TypeRef {
        TypeRef::Named(name.into())
    }

    /// The built-in `String` scalar.
    pub fn string(&self) -> TypeRef {
        TypeRef::Builtin(BuiltinScalar::String)
    }

    /// The built-in `Int` scalar.
    pub fn int(&self) -> TypeRef {
        TypeRef::Builtin(BuiltinScalar::Int)
    }

    /// The built-in `Float` scalar.
    pub fn float(&self) -> TypeRef {
        TypeRef::Builtin(BuiltinScalar::Float)
    }

    /// The built-in `Boolean` scalar.
    pub fn boolean(&self) -> TypeRef {
        TypeRef::Builtin(BuiltinScalar::Boolean)
    }

    /// The built-in `ID` scalar.
    pub fn id(&self) -> TypeRef {
        TypeRef::Builtin(BuiltinScalar::Id)
    }

    /// Looks up a registered type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeHandle> {
        self.inner.borrow().types.get(name).cloned()
    }

    /// Looks up a registered mutation by name.
    pub fn mutation(&self, name: &str) -> Option<TypeHandle> {
        self.inner.borrow().mutations.get(name).cloned()
    }

    /// All registered types, in registration order.
    pub fn types(&self) -> Vec<(String, TypeHandle)> {
        self.inner
            .borrow()
            .types
            .iter()
            .map(|(n, h)| (n.clone(), h.clone()))
            .collect()
    }

    /// All registered mutations, in registration order.
    pub fn mutations(&self) -> Vec<(String, TypeHandle)> {
        self.inner
            .borrow()
            .mutations
            .iter()
            .map(|(n, h)| (n.clone(), h.clone()))
            .collect()
    }

    /// The implementors of an interface, as linked by the last
    /// [`TypeRegistry::validate`] pass.
    pub fn implementors(&self, interface: &str) -> Vec<String> {
        self.inner
            .borrow()
            .implementors
            .get(interface)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolves a reference to its concrete type handle.
    ///
    /// Modifiers are unwrapped first; resolution then walks the base name,
    /// never a live object graph, so cyclic type graphs resolve without
    /// re-entering an unfinished construction. Concrete handles must have
    /// been registered with *this* registry
    /// ([`SchemaError::UnregisteredType`] otherwise), and must still be the
    /// type their name is bound to ([`SchemaError::TypeMismatch`]).
    pub fn resolve(&self, reference: &TypeRef) -> Result<TypeHandle, SchemaError> {
        match reference {
            TypeRef::NonNull(inner) | TypeRef::List(inner) => self.resolve(inner),
            TypeRef::Builtin(scalar) => {
                self.lookup(scalar.name())
                    .ok_or_else(|| SchemaError::UnregisteredType {
                        name: scalar.name().to_string(),
                    })
            }
            TypeRef::Named(name) => {
                self.lookup(name)
                    .ok_or_else(|| SchemaError::UnregisteredType { name: name.clone() })
            }
            TypeRef::Concrete(handle) => {
                let name = handle.name();
                let inner = self.inner.borrow();
                let mut found = false;
                for namespace in [&inner.types, &inner.mutations] {
                    if let Some(existing) = namespace.get(name) {
                        found = true;
                        if Rc::ptr_eq(existing, handle) {
                            return Ok(existing.clone());
                        }
                    }
                }
                if found {
                    Err(SchemaError::TypeMismatch {
                        name: name.to_string(),
                    })
                } else {
                    Err(SchemaError::UnregisteredType {
                        name: name.to_string(),
                    })
                }
            }
        }
    }

    /// Checks that a reference is safe to embed in a field list.
    ///
    /// Named references stay deferred (they may point at types that do not
    /// exist yet); concrete handles are verified against this registry
    /// immediately.
    pub(crate) fn check_reference(&self, reference: &TypeRef) -> Result<(), SchemaError> {
        match reference {
            TypeRef::NonNull(inner) | TypeRef::List(inner) => self.check_reference(inner),
            TypeRef::Builtin(_) | TypeRef::Named(_) => Ok(()),
            TypeRef::Concrete(_) => self.resolve(reference).map(|_| ()),
        }
    }

    /// Validates the whole registry: every reference held by every
    /// registered type must resolve.
    ///
    /// This is the deferred second phase of reference resolution: named
    /// references recorded during construction are only now required to
    /// exist. It also performs the one-time implementor linking (interface
    /// name → implementor names) as an explicit post-construction pass, and
    /// checks that union members and implemented interfaces have the right
    /// kind. The implementor index is rebuilt from scratch on every call,
    /// so a failed validation leaves no partial links observable.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let registered: Vec<TypeHandle> = {
            let inner = self.inner.borrow();
            inner
                .types
                .values()
                .chain(inner.mutations.values())
                .cloned()
                .collect()
        };

        let mut links: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for handle in &registered {
            match &**handle {
                TypeDef::Scalar(_) => {}
                TypeDef::Object(object) => {
                    self.validate_fields(&object.fields)?;
                    for implemented in &object.implements {
                        let interface = self.resolve(implemented)?;
                        if interface.kind() != TypeKind::Interface {
                            return Err(SchemaError::TypeMismatch {
                                name: interface.name().to_string(),
                            });
                        }
                        links
                            .entry(interface.name().to_string())
                            .or_default()
                            .push(object.name.clone());
                    }
                }
                TypeDef::Interface(interface) => self.validate_fields(&interface.fields)?,
                TypeDef::InputObject(input) => self.validate_fields(&input.fields)?,
                TypeDef::Union(union) => {
                    for member in &union.members {
                        let member_type = self.resolve(member)?;
                        if member_type.kind() != TypeKind::Object {
                            return Err(SchemaError::TypeMismatch {
                                name: member_type.name().to_string(),
                            });
                        }
                    }
                }
            }
        }

        self.inner.borrow_mut().implementors = links;
        Ok(())
    }

    fn validate_fields(&self, fields: &IndexMap<String, FieldDef>) -> Result<(), SchemaError> {
        for field in fields.values() {
            self.resolve(&field.ty)?;
            for arg in field.args.values() {
                self.resolve(&arg.ty)?;
            }
        }
        Ok(())
    }

    /// Synthesizes the mutation root: an object whose fields are the
    /// registered mutations, in registration order, and registers it under
    /// `Mutation` in the general namespace.
    pub fn mutation_root(&self) -> Result<TypeHandle, SchemaError> {
        let mutations = self.mutations();
        let mut fields = IndexMap::new();
        for (index, (name, handle)) in mutations.into_iter().enumerate() {
            let wire_name = to_camel_case(&name);
            if fields.contains_key(&wire_name) {
                return Err(SchemaError::DuplicateField {
                    type_name: "Mutation".to_string(),
                    wire_name,
                });
            }
            fields.insert(
                wire_name.clone(),
                FieldDef {
                    name,
                    wire_name,
                    ty: TypeRef::Concrete(handle),
                    description: None,
                    args: IndexMap::new(),
                    resolver: None,
                    default_value: None,
                    index,
                },
            );
        }
        let root = Rc::new(TypeDef::Object(crate::typedef::ObjectDef {
            name: "Mutation".to_string(),
            description: None,
            fields,
            implements: Vec::new(),
        }));
        self.register("Mutation", root.clone())?;
        Ok(root)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TypeRegistry")
            .field("types", &inner.types.len())
            .field("mutations", &inner.mutations.len())
            .finish()
    }
}
