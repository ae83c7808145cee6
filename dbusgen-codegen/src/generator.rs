//! Generated file assembly.

use crate::config::GeneratorConfig;
use crate::error::{CodegenError, ConfigError};
use crate::format::{Gofmt, Identity, PostProcessor};
use crate::go::{
    ClientGenerator, IntrospectGenerator, Model, ServerGenerator, SignalHelperGenerator, quote,
};
use dbusgen_schema::Interface;
use tracing::{debug, info};

/// First line of every generated file.
pub const HEADER: &str = "// Code generated by dbusgen. DO NOT EDIT.";

const DBUS_IMPORT: &str = "github.com/godbus/dbus/v5";
const INTROSPECT_IMPORT: &str = "github.com/godbus/dbus/v5/introspect";

/// Go file generator.
#[derive(Debug)]
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a generator for a validated configuration.
    ///
    /// # Errors
    /// Returns `CodegenError::Config` if the configuration is invalid.
    pub fn new(config: &'a GeneratorConfig) -> Result<Self, CodegenError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generates one Go source file for the interfaces the configured
    /// filter allows, post-processed with `gofmt` when enabled.
    ///
    /// # Errors
    /// Returns `CodegenError` if no interface is left, two names collide,
    /// or formatting fails.
    pub fn generate(&self, interfaces: &[Interface]) -> Result<Vec<u8>, CodegenError> {
        if self.config.format {
            self.generate_with(interfaces, &Gofmt::default())
        } else {
            self.generate_with(interfaces, &Identity)
        }
    }

    /// Generates the file and runs it through the given post-processor.
    ///
    /// # Errors
    /// Same as [`Generator::generate`].
    pub fn generate_with(
        &self,
        interfaces: &[Interface],
        post: &dyn PostProcessor,
    ) -> Result<Vec<u8>, CodegenError> {
        let source = self.assemble(interfaces)?;
        post.process(source.into_bytes())
    }

    /// Builds the unformatted Go source.
    ///
    /// # Errors
    /// Same as [`Generator::generate`], minus formatting.
    pub fn assemble(&self, interfaces: &[Interface]) -> Result<String, CodegenError> {
        let selected: Vec<&Interface> = interfaces
            .iter()
            .filter(|iface| {
                let allowed = self.config.filter.allows(&iface.name);
                if !allowed {
                    debug!(interface = %iface.name, "interface filtered out");
                }
                allowed
            })
            .collect();
        if selected.is_empty() {
            return Err(ConfigError::NoInterfaces.into());
        }

        let model = Model::resolve(&selected, self.config)?;
        let mode = self.config.mode;

        let mut output = String::new();
        output.push_str(HEADER);
        output.push_str("\n\n");
        output.push_str(&format!("package {}\n\n", self.config.package_name));
        output.push_str(&self.generate_imports(&model));
        output.push_str(&generate_consts(&model));

        if mode.server() {
            output.push_str(&IntrospectGenerator::new(&model).generate());
        }
        if mode.client() {
            output.push_str(&SignalHelperGenerator::new(&model).generate());
        }
        for iface in &model.interfaces {
            if mode.client() {
                output.push_str(&ClientGenerator::new(iface).generate());
            }
            if mode.server() {
                output.push_str(&ServerGenerator::new(iface).generate());
            }
        }

        let trimmed = output.trim_end().len();
        output.truncate(trimmed);
        output.push('\n');

        info!(
            package = %self.config.package_name,
            interfaces = model.interfaces.len(),
            bytes = output.len(),
            "generated bindings"
        );
        Ok(output)
    }

    fn generate_imports(&self, model: &Model<'_>) -> String {
        let mode = self.config.mode;
        let mut std = Vec::new();
        if mode.client() && model.has_calls() {
            std.push("context");
        }
        if mode.client() && model.has_signals() {
            std.push("errors");
        }
        if mode.client() && model.has_signal_args() {
            std.push("fmt");
        }
        let mut third_party = vec![DBUS_IMPORT];
        if mode.server() {
            third_party.push(INTROSPECT_IMPORT);
        }

        let mut output = String::from("import (\n");
        for path in &std {
            output.push_str(&format!("\t{}\n", quote(path)));
        }
        if !std.is_empty() {
            output.push('\n');
        }
        for path in &third_party {
            output.push_str(&format!("\t{}\n", quote(path)));
        }
        output.push_str(")\n\n");
        output
    }
}

fn generate_consts(model: &Model<'_>) -> String {
    let rows: Vec<(String, String)> = model
        .interfaces
        .iter()
        .map(|iface| (iface.name_const(), format!("= {}", quote(&iface.iface.name))))
        .collect();

    let mut output = String::from("// Interface names.\nconst (\n");
    output.push_str(&crate::go::aligned(&rows, "\t"));
    output.push_str(")\n\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationMode;
    use dbusgen_schema::{InterfaceFilter, parse_introspection};

    const PLAYER: &str = r#"<node>
  <interface name="org.example.Player">
    <method name="Play"><arg name="uri" type="s"/></method>
    <signal name="Seeked"><arg name="position" type="x"/></signal>
  </interface>
  <interface name="org.example.Tracks">
    <property name="Count" type="u" access="read"/>
  </interface>
</node>"#;

    fn assemble(xml: &str, config: &GeneratorConfig) -> Result<String, CodegenError> {
        let ifaces = parse_introspection(xml)?;
        Generator::new(config)?.assemble(&ifaces)
    }

    #[test]
    fn test_file_layout() {
        let output = assemble(PLAYER, &GeneratorConfig::default().with_package("player")).unwrap();
        assert!(output.starts_with(
            "// Code generated by dbusgen. DO NOT EDIT.\n\n\
             package player\n\n\
             import (\n\
             \t\"context\"\n\
             \t\"errors\"\n\
             \t\"fmt\"\n\n\
             \t\"github.com/godbus/dbus/v5\"\n\
             \t\"github.com/godbus/dbus/v5/introspect\"\n\
             )\n\n\
             // Interface names.\n\
             const (\n\
             \tInterfaceOrg_Example_Player = \"org.example.Player\"\n\
             \tInterfaceOrg_Example_Tracks = \"org.example.Tracks\"\n\
             )\n\n"
        ));
        assert!(output.ends_with("}\n"));
        assert!(!output.ends_with("}\n\n"));

        let introspect = output.find("var IntrospectDataOrg_Example_Player").unwrap();
        let helpers = output.find("type Signal interface").unwrap();
        let client = output.find("type Org_Example_Player struct").unwrap();
        let server = output.find("type Org_Example_Playerer interface").unwrap();
        let tracks = output.find("type Org_Example_Tracks struct").unwrap();
        assert!(introspect < helpers && helpers < client && client < server && server < tracks);
    }

    #[test]
    fn test_server_only_imports() {
        let config = GeneratorConfig::default().with_mode(GenerationMode::ServerOnly);
        let output = assemble(PLAYER, &config).unwrap();
        assert!(output.contains(
            "import (\n\
             \t\"github.com/godbus/dbus/v5\"\n\
             \t\"github.com/godbus/dbus/v5/introspect\"\n\
             )\n"
        ));
        assert!(!output.contains("LookupSignal"));
        assert!(!output.contains("func NewOrg_Example_Player"));
        assert!(output.contains("func ExportOrg_Example_Player("));
    }

    #[test]
    fn test_client_only_imports() {
        let config = GeneratorConfig::default().with_mode(GenerationMode::ClientOnly);
        let output = assemble(PLAYER, &config).unwrap();
        assert!(output.contains("\t\"fmt\"\n\n\t\"github.com/godbus/dbus/v5\"\n)\n"));
        assert!(!output.contains("introspect"));
        assert!(!output.contains("Unimplemented"));
    }

    #[test]
    fn test_minimal_client_imports() {
        let config = GeneratorConfig::default().with_mode(GenerationMode::ClientOnly);
        let output = assemble(r#"<node><interface name="a.b"/></node>"#, &config).unwrap();
        assert!(output.contains("import (\n\t\"github.com/godbus/dbus/v5\"\n)\n"));
    }

    #[test]
    fn test_filter_and_no_interfaces() {
        let config = GeneratorConfig::default()
            .with_filter(InterfaceFilter::only(["org.example.Tracks"]));
        let output = assemble(PLAYER, &config).unwrap();
        assert!(!output.contains("Org_Example_Player"));
        assert!(output.contains("type Org_Example_Tracks struct"));

        let config = GeneratorConfig::default()
            .with_filter(InterfaceFilter::except(["org.example.Tracks", "org.example.Player"]));
        assert!(matches!(
            assemble(PLAYER, &config),
            Err(CodegenError::Config(ConfigError::NoInterfaces))
        ));
        assert!(matches!(
            assemble("<node/>", &GeneratorConfig::default()),
            Err(CodegenError::Config(ConfigError::NoInterfaces))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected_early() {
        let config = GeneratorConfig::default().with_package("");
        assert!(matches!(
            Generator::new(&config),
            Err(CodegenError::Config(ConfigError::EmptyPackageName))
        ));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = GeneratorConfig::default();
        let ifaces = parse_introspection(PLAYER).unwrap();
        let generator = Generator::new(&config).unwrap();
        assert_eq!(
            generator.generate(&ifaces).unwrap(),
            generator.generate(&ifaces).unwrap()
        );
    }

    #[test]
    fn test_post_processor_receives_source() {
        struct Upper;
        impl PostProcessor for Upper {
            fn process(&self, source: Vec<u8>) -> Result<Vec<u8>, CodegenError> {
                Ok(source.to_ascii_uppercase())
            }
        }

        let config = GeneratorConfig::default();
        let ifaces = parse_introspection(PLAYER).unwrap();
        let output = Generator::new(&config)
            .unwrap()
            .generate_with(&ifaces, &Upper)
            .unwrap();
        assert!(output.starts_with(b"// CODE GENERATED BY DBUSGEN"));
    }
}
