//! Name validation for introspection elements.

use crate::error::SchemaError;

/// Returns true if `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns true if `name` is a dot-separated sequence of identifiers.
#[must_use]
pub fn is_interface_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

/// Validates an interface name.
///
/// # Errors
/// Returns `SchemaError::InvalidAttribute` naming `interface@name`.
pub fn validate_interface_name(name: &str) -> Result<(), SchemaError> {
    if is_interface_name(name) {
        Ok(())
    } else {
        Err(SchemaError::invalid_attr("interface", "name", name))
    }
}

/// Validates a method, property or signal name.
///
/// # Errors
/// Returns `SchemaError::InvalidAttribute` naming `<element>@name`.
pub fn validate_member_name(element: &str, name: &str) -> Result<(), SchemaError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(SchemaError::invalid_attr(element, "name", name))
    }
}
