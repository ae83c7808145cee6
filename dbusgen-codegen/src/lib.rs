//! # dbusgen Codegen
//!
//! Go binding generation from D-Bus introspection data.
//!
//! This crate provides:
//! - Identifier generation with reserved word and collision handling
//! - Client proxies, signal types and signal helpers
//! - Server contracts, export helpers and embedded introspection data
//! - Optional `gofmt` post-processing

pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod go;
pub mod naming;

pub use config::{DEFAULT_PACKAGE, GenerationMode, GeneratorConfig};
pub use error::{CodegenError, ConfigError};
pub use format::{Gofmt, Identity, PostProcessor};
pub use generator::Generator;
pub use naming::{NameStyle, Namer};

/// Generates Go bindings from an introspection XML string.
///
/// # Arguments
/// * `xml` - Introspection document
/// * `config` - Generation options
///
/// # Returns
/// Generated Go source.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_xml(xml: &str, config: &GeneratorConfig) -> Result<Vec<u8>, CodegenError> {
    let generator = Generator::new(config)?;
    let interfaces = dbusgen_schema::parse_introspection(xml)?;
    generator.generate(&interfaces)
}

/// Generates Go bindings from an introspection XML file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: &GeneratorConfig,
) -> Result<Vec<u8>, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const XML: &str = r#"<node><interface name="org.example.Echo">
  <method name="Echo">
    <arg name="text" type="s" direction="in"/>
    <arg name="text" type="s" direction="out"/>
  </method>
</interface></node>"#;

    #[test]
    fn test_generate_from_xml() {
        let output = generate_from_xml(XML, &GeneratorConfig::default()).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains(
            "func (o *Org_Example_Echo) Echo(ctx context.Context, text string) (out0 string, err error) {\n"
        ));
    }

    #[test]
    fn test_generate_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(XML.as_bytes()).unwrap();
        let output = generate_from_file(file.path(), &GeneratorConfig::default()).unwrap();
        assert!(output.starts_with(b"// Code generated by dbusgen. DO NOT EDIT.\n"));
    }

    #[test]
    fn test_generate_from_missing_file() {
        let err = generate_from_file(
            std::path::Path::new("/nonexistent/introspect.xml"),
            &GeneratorConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::Io(_)));
    }

    #[test]
    fn test_invalid_xml() {
        assert!(matches!(
            generate_from_xml("<node><interface>", &GeneratorConfig::default()),
            Err(CodegenError::Schema(_))
        ));
    }
}
