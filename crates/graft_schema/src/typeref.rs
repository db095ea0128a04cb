//! Type references and the modifier algebra.

use crate::typedef::TypeHandle;
use std::fmt;
use std::rc::Rc;

/// The built-in scalar types, pre-registered in every registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinScalar {
    Int,
    Float,
    String,
    Boolean,
    Id,
}

impl BuiltinScalar {
    /// All built-in scalars, in registration order.
    pub const ALL: [BuiltinScalar; 5] = [
        BuiltinScalar::Int,
        BuiltinScalar::Float,
        BuiltinScalar::String,
        BuiltinScalar::Boolean,
        BuiltinScalar::Id,
    ];

    /// The registered name of the scalar.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinScalar::Int => "Int",
            BuiltinScalar::Float => "Float",
            BuiltinScalar::String => "String",
            BuiltinScalar::Boolean => "Boolean",
            BuiltinScalar::Id => "ID",
        }
    }
}

/// A reference to a type, possibly wrapped in modifiers.
///
/// References come in three base shapes: a built-in scalar, a name resolved
/// lazily against the owning registry (valid before the named type exists,
/// which is what makes self- and mutual recursion work), and a concrete
/// handle compared by object identity.
///
/// The modifier algebra wraps any reference, including an already-wrapped
/// one: each chained call wraps the accumulated reference, left to right as
/// written, so `x.non_null().list()` denotes `List(NonNull(x))` and
/// `x.non_null().list().non_null()` denotes `NonNull(List(NonNull(x)))`.
#[derive(Clone)]
pub enum TypeRef {
    /// A built-in scalar.
    Builtin(BuiltinScalar),
    /// A named reference, resolved lazily.
    Named(String),
    /// A concrete, already-constructed type.
    Concrete(TypeHandle),
    /// The value may not be null.
    NonNull(Box<TypeRef>),
    /// The value is a list of the inner type.
    List(Box<TypeRef>),
}

impl TypeRef {
    /// Creates a lazy named reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps this reference in `NonNull`.
    #[must_use]
    pub fn non_null(self) -> Self {
        Self::NonNull(Box::new(self))
    }

    /// Wraps this reference in `List`.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// The name of the innermost base reference.
    pub fn base_name(&self) -> &str {
        match self {
            Self::Builtin(s) => s.name(),
            Self::Named(n) => n,
            Self::Concrete(h) => h.name(),
            Self::NonNull(inner) | Self::List(inner) => inner.base_name(),
        }
    }
}

impl From<BuiltinScalar> for TypeRef {
    fn from(scalar: BuiltinScalar) -> Self {
        Self::Builtin(scalar)
    }
}

impl From<TypeHandle> for TypeRef {
    fn from(handle: TypeHandle) -> Self {
        Self::Concrete(handle)
    }
}

impl From<&TypeHandle> for TypeRef {
    fn from(handle: &TypeHandle) -> Self {
        Self::Concrete(Rc::clone(handle))
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Builtin(a), Self::Builtin(b)) => a == b,
            (Self::Named(a), Self::Named(b)) => a == b,
            // Concrete references compare by object identity.
            (Self::Concrete(a), Self::Concrete(b)) => Rc::ptr_eq(a, b),
            (Self::NonNull(a), Self::NonNull(b)) | (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(s) => write!(f, "{}", s.name()),
            Self::Named(n) => write!(f, "{n}"),
            Self::Concrete(h) => write!(f, "{}", h.name()),
            Self::NonNull(inner) => write!(f, "{inner}!"),
            Self::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({self})")
    }
}
