//! # dbusgen Schema
//!
//! D-Bus introspection XML parser and interface model.
//!
//! This crate provides:
//! - A raw XML element tree reader
//! - Parsing of introspection documents into interfaces
//! - First-definition-wins merging and name filtering across documents
//! - Re-serialization of interfaces into one introspection document

pub mod error;
pub mod merge;
pub mod parser;
pub mod types;
pub mod validation;
pub mod writer;
pub mod xml;

pub use error::SchemaError;
pub use merge::{InterfaceFilter, merge, merge_all};
pub use parser::{parse_bytes, parse_document, parse_introspection, parse_node};
pub use types::{Access, Annotated, Annotation, Arg, Interface, Method, Node, Property, Signal};
pub use writer::write_introspection;
pub use xml::{Element, read_document};
