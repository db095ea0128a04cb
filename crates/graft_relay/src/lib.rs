//! Relay extension for graft.
//!
//! Builds on the registry + compiler contract of `graft_schema`:
//! - `global_id`: the opaque, type-prefixed identifier codec
//! - `node`: the Node interface, the root lookup field, and the
//!   [`DataSource`] collaborator trait
//! - `connection`: Connection/Edge synthesis and the cursor pagination
//!   argument set
//! - `mutation`: registration into the registry's mutation namespace
//! - `error`: node-resolution failures surfaced at query time

pub mod connection;
pub mod error;
pub mod global_id;
pub mod mutation;
pub mod node;

pub use connection::connection_args;
pub use error::NodeResolutionError;
pub use global_id::{decode_id, encode_id};
pub use node::{DataSource, Relay};
