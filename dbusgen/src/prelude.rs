//! Prelude module for convenient imports.
//!
//! ```ignore
//! use dbusgen::prelude::*;
//! ```

// Wire types
pub use dbusgen_core::{Primitive, SignatureError, Type, decode_all, decode_one};

// Schema types
pub use dbusgen_schema::{
    Access, Annotated, Annotation, Arg, Interface, InterfaceFilter, Method, Node, Property,
    SchemaError, Signal, parse_introspection, write_introspection,
};

// Generation
pub use dbusgen_codegen::{
    CodegenError, ConfigError, GenerationMode, Generator, GeneratorConfig, NameStyle,
    PostProcessor,
};

// Pipeline
pub use crate::error::{Error, Result};
pub use crate::pipeline::{combine_xml, generate};
pub use crate::source::{FileSource, ReaderSource, SchemaSource};
