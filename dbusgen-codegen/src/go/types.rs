//! Go type mapping.

use dbusgen_core::{Primitive, Type};

/// Returns the Go type of a primitive.
#[must_use]
pub const fn primitive_type(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Byte => "byte",
        Primitive::Boolean => "bool",
        Primitive::Int16 => "int16",
        Primitive::Uint16 => "uint16",
        Primitive::Int32 => "int32",
        Primitive::Uint32 => "uint32",
        Primitive::Int64 => "int64",
        Primitive::Uint64 => "uint64",
        Primitive::Double => "float64",
        Primitive::UnixFd => "dbus.UnixFD",
        Primitive::String => "string",
        Primitive::ObjectPath => "dbus.ObjectPath",
        Primitive::Signature => "dbus.Signature",
    }
}

/// Returns the Go type of a decoded wire type.
///
/// Structure fields are exported as `V0`, `V1`, ... so the D-Bus library
/// can decode into them.
#[must_use]
pub fn go_type(ty: &Type) -> String {
    match ty {
        Type::Primitive(p) => primitive_type(*p).to_string(),
        Type::Variant => "dbus.Variant".to_string(),
        Type::Array(element) => format!("[]{}", go_type(element)),
        Type::Dictionary(key, value) => {
            format!("map[{}]{}", primitive_type(*key), go_type(value))
        }
        Type::Structure(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .enumerate()
                .map(|(i, field)| format!("V{i} {}", go_type(field)))
                .collect();
            format!("struct {{ {} }}", fields.join("; "))
        }
    }
}
