//! Interface model built from introspection documents.
//!
//! Values are plain owned trees. The parser is the only producer; the
//! merger and the code generator only read them.

use crate::merge::merge;
use dbusgen_core::Type;

/// Annotation marking an element as deprecated.
pub const DEPRECATED: &str = "org.freedesktop.DBus.Deprecated";

/// Annotation marking a method as not expecting a reply.
pub const NO_REPLY: &str = "org.freedesktop.DBus.Method.NoReply";

/// A name/value annotation attached to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Annotation name, e.g. `org.freedesktop.DBus.Deprecated`.
    pub name: String,
    /// Annotation value.
    pub value: String,
}

impl Annotation {
    /// Creates a new annotation.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Elements that carry annotations.
pub trait Annotated {
    /// Returns the annotations in document order.
    fn annotations(&self) -> &[Annotation];

    /// Returns the value of the first annotation with the given name.
    fn annotation(&self, name: &str) -> Option<&str> {
        self.annotations()
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns true if the element is annotated as deprecated.
    fn is_deprecated(&self) -> bool {
        self.annotation(DEPRECATED) == Some("true")
    }
}

macro_rules! impl_annotated {
    ($($ty:ty),+) => {
        $(
            impl Annotated for $ty {
                fn annotations(&self) -> &[Annotation] {
                    &self.annotations
                }
            }
        )+
    };
}

impl_annotated!(Interface, Method, Property, Signal);

/// A named, typed argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    /// Wire name, empty for anonymous arguments.
    pub name: String,
    /// Decoded type.
    pub ty: Type,
}

impl Arg {
    /// Creates a new argument.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A method with its input and output arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Wire name.
    pub name: String,
    /// Arguments with direction `in`.
    pub in_args: Vec<Arg>,
    /// Arguments with direction `out`.
    pub out_args: Vec<Arg>,
    /// Annotations.
    pub annotations: Vec<Annotation>,
}

impl Method {
    /// Creates a method with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            in_args: Vec::new(),
            out_args: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Returns true if callers should not wait for a reply.
    #[must_use]
    pub fn is_no_reply(&self) -> bool {
        self.annotation(NO_REPLY) == Some("true")
    }
}

/// Property access mode. A property is always readable, writable or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `read`
    Read,
    /// `write`
    Write,
    /// `readwrite`
    ReadWrite,
}

impl Access {
    /// Builds the access mode from capability flags.
    ///
    /// Returns `None` when neither flag is set.
    #[must_use]
    pub const fn from_flags(read: bool, write: bool) -> Option<Self> {
        match (read, write) {
            (true, true) => Some(Self::ReadWrite),
            (true, false) => Some(Self::Read),
            (false, true) => Some(Self::Write),
            (false, false) => None,
        }
    }

    /// Returns true if the property can be read.
    #[must_use]
    pub const fn can_read(&self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    /// Returns true if the property can be written.
    #[must_use]
    pub const fn can_write(&self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }

    /// Returns the introspection attribute value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::ReadWrite => "readwrite",
        }
    }
}

/// A property. Its argument carries the property name and type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Wire name.
    pub name: String,
    /// Value argument, named after the property.
    pub arg: Arg,
    /// Access mode.
    pub access: Access,
    /// Annotations.
    pub annotations: Vec<Annotation>,
}

impl Property {
    /// Creates a property of the given type.
    pub fn new(name: impl Into<String>, ty: Type, access: Access) -> Self {
        let name = name.into();
        Self {
            arg: Arg::new(name.clone(), ty),
            name,
            access,
            annotations: Vec::new(),
        }
    }
}

/// A signal and its body arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    /// Wire name.
    pub name: String,
    /// Body arguments.
    pub args: Vec<Arg>,
    /// Annotations.
    pub annotations: Vec<Annotation>,
}

impl Signal {
    /// Creates a signal with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

/// An interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Dot-separated wire name, e.g. `org.freedesktop.DBus`.
    pub name: String,
    /// Methods in document order.
    pub methods: Vec<Method>,
    /// Properties in document order.
    pub properties: Vec<Property>,
    /// Signals in document order.
    pub signals: Vec<Signal>,
    /// Annotations.
    pub annotations: Vec<Annotation>,
}

impl Interface {
    /// Creates an empty interface.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            properties: Vec::new(),
            signals: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Gets a method by wire name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Returns true if any member of the interface is a signal.
    #[must_use]
    pub fn has_signals(&self) -> bool {
        !self.signals.is_empty()
    }
}

/// An object node: its own interfaces plus nested child nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Node name, relative for children, absent on most roots.
    pub name: Option<String>,
    /// Interfaces declared directly on this node.
    pub interfaces: Vec<Interface>,
    /// Child nodes, possibly with inline interfaces.
    pub children: Vec<Node>,
}

impl Node {
    /// Returns the names of the direct child nodes.
    #[must_use]
    pub fn child_names(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter_map(|c| c.name.as_deref())
            .collect()
    }

    /// Flattens the tree into its interfaces, parents before children.
    ///
    /// An interface repeated on several object paths is kept once, at its
    /// first occurrence.
    #[must_use]
    pub fn into_interfaces(self) -> Vec<Interface> {
        let own = merge(Vec::new(), self.interfaces);
        self.children
            .into_iter()
            .fold(own, |acc, child| merge(acc, child.into_interfaces()))
    }
}
