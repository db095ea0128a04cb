//! Core utilities for graft.
//!
//! This crate provides the pieces shared by the schema core and the relay
//! extension:
//! - `name`: wire-name casing
//! - `resolver`: the resolver calling convention

pub mod name;
pub mod resolver;

pub use name::to_camel_case;
pub use resolver::{Context, ResolveError, ResolverArgs, ResolverFn, ResolverResult};
