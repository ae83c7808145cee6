//! Error types for code generation.

use thiserror::Error;

/// Invalid generator configuration, detected before any parsing work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The package name is empty.
    #[error("package name is empty")]
    EmptyPackageName,

    /// The package name is not a valid Go identifier.
    #[error("package name '{name}' is not a valid identifier")]
    InvalidPackageName {
        /// Rejected name.
        name: String,
    },

    /// Client-only and server-only were both requested.
    #[error("client-only and server-only are mutually exclusive")]
    ConflictingModes,

    /// Include and exclude lists were both given.
    #[error("interface include and exclude lists are mutually exclusive")]
    ConflictingFilters,

    /// A prefix to strip is empty.
    #[error("interface name prefix is empty")]
    EmptyPrefix,

    /// Nothing is left to generate.
    #[error("no interfaces given")]
    NoInterfaces,
}

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Introspection parsing error.
    #[error("schema error: {0}")]
    Schema(#[from] dbusgen_schema::SchemaError),

    /// Two wire names map to the same generated identifier.
    #[error("'{first}' and '{second}' both generate identifier '{name}'")]
    AmbiguousName {
        /// Generated identifier.
        name: String,
        /// Wire name that claimed the identifier first.
        first: String,
        /// Wire name that collided with it.
        second: String,
    },

    /// Post-processing of the generated source failed.
    #[error("format error: {message}")]
    Format {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    /// Creates a format error with the given message.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Creates an ambiguous name error.
    pub fn ambiguous(
        name: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::AmbiguousName {
            name: name.into(),
            first: first.into(),
            second: second.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: CodegenError = ConfigError::ConflictingModes.into();
        assert_eq!(
            err.to_string(),
            "configuration error: client-only and server-only are mutually exclusive"
        );
    }

    #[test]
    fn test_ambiguous_name_display() {
        let err = CodegenError::ambiguous("Org_Foo", "org.foo", "org.Foo");
        assert_eq!(
            err.to_string(),
            "'org.foo' and 'org.Foo' both generate identifier 'Org_Foo'"
        );
    }
}
