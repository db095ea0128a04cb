//! The global-id codec.
//!
//! A global id is an opaque string addressing any node-capable entity:
//! standard base64 of UTF-8 `"<TypeName>:<RawID>"`. Decoding splits on the
//! *first* colon, so the raw id may itself contain colons; type names
//! never do. Ids are constructed per lookup request and never persisted.

use crate::error::NodeResolutionError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encodes a `(type name, raw id)` pair into a global id.
pub fn encode_id(type_name: &str, raw_id: &str) -> String {
    STANDARD.encode(format!("{type_name}:{raw_id}"))
}

/// Decodes a global id back into its `(type name, raw id)` pair.
pub fn decode_id(global_id: &str) -> Result<(String, String), NodeResolutionError> {
    let bytes = STANDARD.decode(global_id)?;
    let decoded = String::from_utf8(bytes)?;
    match decoded.split_once(':') {
        Some((type_name, raw_id)) => Ok((type_name.to_string(), raw_id.to_string())),
        None => Err(NodeResolutionError::MissingSeparator(decoded)),
    }
}
