//! End-to-end generation: read, parse, merge, filter, emit.

use crate::error::{Error, Result};
use crate::source::SchemaSource;
use dbusgen_codegen::{ConfigError, Generator, GeneratorConfig};
use dbusgen_schema::{Interface, InterfaceFilter, merge, parse_bytes, write_introspection};
use tracing::{debug, info};

/// Reads and parses every source, keeping the first definition of each
/// interface.
///
/// # Errors
/// Returns `Error::Read` or `Error::Schema` naming the failing source.
pub fn load<S: SchemaSource>(sources: &mut [S]) -> Result<Vec<Interface>> {
    let mut interfaces = Vec::new();
    for source in sources.iter_mut() {
        let bytes = source.read().map_err(|e| Error::Read {
            name: source.name().to_string(),
            source: e,
        })?;
        let chunk = parse_bytes(&bytes).map_err(|e| Error::Schema {
            name: source.name().to_string(),
            source: e,
        })?;
        debug!(
            source = source.name(),
            bytes = bytes.len(),
            interfaces = chunk.len(),
            "read schema source"
        );
        interfaces = merge(interfaces, chunk);
    }
    Ok(interfaces)
}

/// Generates Go bindings for the interfaces declared by `sources`.
///
/// The configuration is validated before any source is read.
///
/// # Errors
/// Returns `Error` if the configuration is invalid, a source cannot be
/// read or parsed, or generation fails.
pub fn generate<S: SchemaSource>(sources: &mut [S], config: &GeneratorConfig) -> Result<Vec<u8>> {
    let generator = Generator::new(config)?;
    let interfaces = load(sources)?;
    info!(
        sources = sources.len(),
        interfaces = interfaces.len(),
        "loaded schema"
    );
    Ok(generator.generate(&interfaces)?)
}

/// Merges `sources` into a single introspection document holding the
/// interfaces `filter` allows.
///
/// # Errors
/// Returns `Error` if the filter is conflicting or a source cannot be read
/// or parsed.
pub fn combine_xml<S: SchemaSource>(sources: &mut [S], filter: &InterfaceFilter) -> Result<String> {
    if filter.is_conflicting() {
        return Err(ConfigError::ConflictingFilters.into());
    }
    let interfaces = filter.apply(load(sources)?);
    info!(interfaces = interfaces.len(), "combined schema");
    Ok(write_introspection(&interfaces))
}
