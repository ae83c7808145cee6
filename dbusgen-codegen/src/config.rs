//! Generator configuration.

use crate::error::ConfigError;
use crate::naming::{GoKeywords, NameStyle, ReservedWords};
use dbusgen_schema::InterfaceFilter;
use dbusgen_schema::validation::is_identifier;

/// Default package name of generated files.
pub const DEFAULT_PACKAGE: &str = "dbusgen";

/// Which sides of the bindings to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationMode {
    /// Client and server code.
    #[default]
    Both,
    /// Client proxies and signal helpers only.
    ClientOnly,
    /// Server contracts, export helpers and introspection data only.
    ServerOnly,
}

impl GenerationMode {
    /// Builds the mode from the two command line flags.
    ///
    /// # Errors
    /// Returns `ConfigError::ConflictingModes` if both flags are set.
    pub const fn from_flags(client_only: bool, server_only: bool) -> Result<Self, ConfigError> {
        match (client_only, server_only) {
            (false, false) => Ok(Self::Both),
            (true, false) => Ok(Self::ClientOnly),
            (false, true) => Ok(Self::ServerOnly),
            (true, true) => Err(ConfigError::ConflictingModes),
        }
    }

    /// Returns true if client code is generated.
    #[must_use]
    pub const fn client(&self) -> bool {
        matches!(self, Self::Both | Self::ClientOnly)
    }

    /// Returns true if server code is generated.
    #[must_use]
    pub const fn server(&self) -> bool {
        matches!(self, Self::Both | Self::ServerOnly)
    }
}

/// Configuration of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Go package name of the generated file.
    pub package_name: String,
    /// Sides to generate.
    pub mode: GenerationMode,
    /// Interface name prefixes to strip from type names.
    pub prefixes: Vec<String>,
    /// Separator style of interface-derived type names.
    pub style: NameStyle,
    /// Interfaces to generate.
    pub filter: InterfaceFilter,
    /// Pipe the output through `gofmt`.
    pub format: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE.to_string(),
            mode: GenerationMode::Both,
            prefixes: Vec::new(),
            style: NameStyle::Underscore,
            filter: InterfaceFilter::default(),
            format: false,
        }
    }
}

impl GeneratorConfig {
    /// Sets the package name.
    #[must_use]
    pub fn with_package(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    /// Sets the generation mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the prefixes to strip.
    #[must_use]
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the identifier style.
    #[must_use]
    pub fn with_style(mut self, style: NameStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the interface filter.
    #[must_use]
    pub fn with_filter(mut self, filter: InterfaceFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Enables or disables `gofmt` post-processing.
    #[must_use]
    pub fn with_format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` for an empty or invalid package name, both
    /// filter lists set, or an empty prefix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package_name.is_empty() {
            return Err(ConfigError::EmptyPackageName);
        }
        if !is_identifier(&self.package_name) || GoKeywords.is_reserved(&self.package_name) {
            return Err(ConfigError::InvalidPackageName {
                name: self.package_name.clone(),
            });
        }
        if self.filter.is_conflicting() {
            return Err(ConfigError::ConflictingFilters);
        }
        if self
            .prefixes
            .iter()
            .any(|p| p.strip_suffix('.').unwrap_or(p).is_empty())
        {
            return Err(ConfigError::EmptyPrefix);
        }
        Ok(())
    }
}
