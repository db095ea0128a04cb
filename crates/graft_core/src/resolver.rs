//! The resolver calling convention.
//!
//! The schema core stores resolvers but never invokes them; an external
//! execution engine calls each resolver as `(parent, args, context)` and
//! consumes the returned value. Everything here is synchronous and
//! single-threaded; resolvers are `Rc`-shared and deliberately not `Send`.

use serde_json::Value;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Error surfaced from a resolver at query-resolution time.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// Missing required argument.
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    /// Argument was present but could not be read as the requested type.
    #[error("failed to parse argument \"{0}\": {1}")]
    ArgumentParse(String, String),

    /// Any other resolution failure.
    #[error("{0}")]
    Custom(String),
}

/// Result type for resolvers.
pub type ResolverResult = Result<Value, ResolveError>;

/// A field resolver: `(parent value, arguments, context) -> value`.
pub type ResolverFn = Rc<dyn Fn(&Value, &ResolverArgs, &Context) -> ResolverResult>;

/// Arguments passed to a resolver.
#[derive(Debug, Clone, Default)]
pub struct ResolverArgs {
    args: HashMap<String, Value>,
}

impl ResolverArgs {
    /// Creates empty resolver args.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates resolver args from a list of (name, value) pairs.
    pub fn from_pairs(pairs: Vec<(String, Value)>) -> Self {
        Self {
            args: pairs.into_iter().collect(),
        }
    }

    /// Gets an argument by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Gets an argument as a specific type.
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.args
            .get(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Gets a required argument, returning an error if not found.
    pub fn require<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T, ResolveError> {
        self.args
            .get(name)
            .ok_or_else(|| ResolveError::MissingArgument(name.to_string()))
            .and_then(|v| {
                serde_json::from_value(v.clone())
                    .map_err(|e| ResolveError::ArgumentParse(name.to_string(), e.to_string()))
            })
    }

    /// Returns true if no arguments were supplied.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Sets an argument.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.args.insert(name.into(), value);
    }
}

/// Request-scoped data handed to every resolver by the execution engine.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Request-scoped data.
    pub data: HashMap<String, Value>,
}

impl Context {
    /// Creates a new context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value in the context.
    pub fn set<T: serde::Serialize>(&mut self, key: impl Into<String>, value: T) {
        if let Ok(v) = serde_json::to_value(value) {
            self.data.insert(key.into(), v);
        }
    }

    /// Gets a value from the context.
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_args() {
        let mut args = ResolverArgs::new();
        args.set("id", serde_json::json!(123));
        args.set("name", serde_json::json!("test"));

        assert_eq!(args.get_as::<i64>("id"), Some(123));
        assert_eq!(args.get_as::<String>("name"), Some("test".to_string()));
        assert_eq!(args.get_as::<i64>("missing"), None);
    }

    #[test]
    fn test_require_missing_argument() {
        let args = ResolverArgs::new();
        let err = args.require::<String>("id").unwrap_err();
        assert!(matches!(err, ResolveError::MissingArgument(_)));
        assert_eq!(err.to_string(), "missing required argument: id");
    }

    #[test]
    fn test_require_parse_failure() {
        let args = ResolverArgs::from_pairs(vec![("id".to_string(), serde_json::json!("oops"))]);
        let err = args.require::<i64>("id").unwrap_err();
        assert!(matches!(err, ResolveError::ArgumentParse(_, _)));
    }

    #[test]
    fn test_context_round_trip() {
        let mut ctx = Context::new();
        ctx.set("viewer", "alice");
        assert_eq!(ctx.get::<String>("viewer"), Some("alice".to_string()));
        assert_eq!(ctx.get::<String>("missing"), None);
    }
}
