//! Error types for the generation pipeline.

use dbusgen_codegen::{CodegenError, ConfigError};
use dbusgen_schema::SchemaError;
use std::io;
use thiserror::Error;

/// Pipeline error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A schema source could not be read.
    #[error("failed to read {name}: {source}")]
    Read {
        /// Source name.
        name: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A schema source is not a valid introspection document.
    #[error("{name}: {source}")]
    Schema {
        /// Source name.
        name: String,
        /// Underlying parse error.
        #[source]
        source: SchemaError,
    },

    /// Generation failed.
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Codegen(err.into())
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
