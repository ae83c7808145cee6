//! Type descriptors for decoded D-Bus signatures.
//!
//! A [`Type`] is a finite tree: compound types own their element types,
//! structures own their positional fields.

use std::fmt;

/// D-Bus primitive (basic) types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    /// Unsigned 8-bit integer, `y`.
    Byte,
    /// Boolean, `b`.
    Boolean,
    /// Signed 16-bit integer, `n`.
    Int16,
    /// Unsigned 16-bit integer, `q`.
    Uint16,
    /// Signed 32-bit integer, `i`.
    Int32,
    /// Unsigned 32-bit integer, `u`.
    Uint32,
    /// Signed 64-bit integer, `x`.
    Int64,
    /// Unsigned 64-bit integer, `t`.
    Uint64,
    /// IEEE 754 double, `d`.
    Double,
    /// Unix file descriptor index, `h`.
    UnixFd,
    /// UTF-8 string, `s`.
    String,
    /// Object path, `o`.
    ObjectPath,
    /// Type signature, `g`.
    Signature,
}

impl Primitive {
    /// All primitive kinds in wire-code table order.
    pub const ALL: [Primitive; 13] = [
        Self::Byte,
        Self::Boolean,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Int64,
        Self::Uint64,
        Self::Double,
        Self::UnixFd,
        Self::String,
        Self::ObjectPath,
        Self::Signature,
    ];

    /// Returns the single-byte wire code for this primitive.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Byte => b'y',
            Self::Boolean => b'b',
            Self::Int16 => b'n',
            Self::Uint16 => b'q',
            Self::Int32 => b'i',
            Self::Uint32 => b'u',
            Self::Int64 => b'x',
            Self::Uint64 => b't',
            Self::Double => b'd',
            Self::UnixFd => b'h',
            Self::String => b's',
            Self::ObjectPath => b'o',
            Self::Signature => b'g',
        }
    }

    /// Parses a primitive from its wire code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            b'y' => Some(Self::Byte),
            b'b' => Some(Self::Boolean),
            b'n' => Some(Self::Int16),
            b'q' => Some(Self::Uint16),
            b'i' => Some(Self::Int32),
            b'u' => Some(Self::Uint32),
            b'x' => Some(Self::Int64),
            b't' => Some(Self::Uint64),
            b'd' => Some(Self::Double),
            b'h' => Some(Self::UnixFd),
            b's' => Some(Self::String),
            b'o' => Some(Self::ObjectPath),
            b'g' => Some(Self::Signature),
            _ => None,
        }
    }
}

/// A decoded wire type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A basic type.
    Primitive(Primitive),
    /// `a` followed by exactly one element type.
    Array(Box<Type>),
    /// `a{KV}`, the key is always a primitive.
    Dictionary(Primitive, Box<Type>),
    /// `v`, a value carrying its own signature.
    Variant,
    /// `(...)`, ordered positional fields.
    Structure(Vec<Type>),
}

impl Type {
    /// Returns the primitive kind if this is a basic type.
    #[must_use]
    pub const fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Renders the canonical wire signature of this type.
    #[must_use]
    pub fn signature(&self) -> String {
        let mut out = String::new();
        self.write_signature(&mut out);
        out
    }

    fn write_signature(&self, out: &mut String) {
        match self {
            Self::Primitive(p) => out.push(char::from(p.code())),
            Self::Array(element) => {
                out.push('a');
                element.write_signature(out);
            }
            Self::Dictionary(key, value) => {
                out.push_str("a{");
                out.push(char::from(key.code()));
                value.write_signature(out);
                out.push('}');
            }
            Self::Variant => out.push('v'),
            Self::Structure(fields) => {
                out.push('(');
                for field in fields {
                    field.write_signature(out);
                }
                out.push(')');
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

impl From<Primitive> for Type {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}
