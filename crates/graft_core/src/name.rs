//! Wire-name casing.
//!
//! Declared attribute names use Rust-style `snake_case`; the wire format
//! uses `lowerCamelCase`. The conversion is applied once, at schema-build
//! time, unless a field carries an explicit wire-name override.

/// Converts a declared name to its `lowerCamelCase` wire form.
///
/// Underscores are dropped and the following character is uppercased; the
/// first character of the result is always lowercased, so registered type
/// names (`SimpleMutation`) convert to field position (`simpleMutation`)
/// with the same function.
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '_' {
            // A leading underscore does not capitalize the first character.
            upper_next = !result.is_empty();
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else if result.is_empty() {
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
