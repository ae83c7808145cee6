//! # dbusgen
//!
//! Go bindings generator for D-Bus introspection XML.
//!
//! ## Features
//!
//! - **Signature decoding** - D-Bus type signatures into typed trees
//! - **Introspection parsing** - Interfaces, methods, properties and signals
//! - **Multi-source merging** - First definition of an interface wins
//! - **Go generation** - Client proxies, server contracts, signal helpers
//!
//! ## Quick Start
//!
//! ```ignore
//! use dbusgen::prelude::*;
//!
//! let mut sources = [FileSource::new("org.bluez.xml")];
//! let config = GeneratorConfig::default().with_package("bluez");
//! let go = generate(&mut sources, &config)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Signature decoding and wire types
//! - [`schema`] - Introspection parsing, merging and writing
//! - [`codegen`] - Go code generation
//! - [`source`] - Schema sources
//! - [`pipeline`] - End-to-end generation

pub mod error;
pub mod pipeline;
pub mod prelude;
pub mod source;

/// Signature decoding and wire types.
pub mod core {
    pub use dbusgen_core::*;
}

/// Introspection parsing, merging and writing.
pub mod schema {
    pub use dbusgen_schema::*;
}

/// Go code generation.
pub mod codegen {
    pub use dbusgen_codegen::*;
}

pub use error::{Error, Result};
pub use pipeline::{combine_xml, generate, load};
pub use source::{FileSource, ReaderSource, SchemaSource};
