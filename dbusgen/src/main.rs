//! dbusgen CLI - Go bindings generator for D-Bus introspection XML
//!
//! Reads one or more introspection documents (stdin when no path is given)
//! and writes either the generated Go source or the merged XML.

use anyhow::Context;
use clap::Parser;
use dbusgen::codegen::{DEFAULT_PACKAGE, GenerationMode, GeneratorConfig, NameStyle};
use dbusgen::schema::InterfaceFilter;
use dbusgen::{FileSource, ReaderSource, SchemaSource};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dbusgen")]
#[command(
    author,
    version,
    about = "Generate Go bindings from D-Bus introspection XML",
    long_about = None
)]
struct Cli {
    /// Introspection XML files (default: stdin)
    paths: Vec<PathBuf>,

    /// Generated package name
    #[arg(long, default_value = DEFAULT_PACKAGE)]
    package: String,

    /// Generate only the named interfaces
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,

    /// Skip the named interfaces
    #[arg(long, value_delimiter = ',')]
    except: Vec<String>,

    /// Prefix to strip from interface names
    #[arg(long, value_delimiter = ',')]
    prefix: Vec<String>,

    /// Generate only server code
    #[arg(long)]
    server_only: bool,

    /// Generate only client code
    #[arg(long)]
    client_only: bool,

    /// Camelize type names omitting underscores
    #[arg(long)]
    camelize: bool,

    /// Pipe the result through gofmt
    #[arg(long)]
    gofmt: bool,

    /// Print the merged introspection XML instead of code
    #[arg(long)]
    xml: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn filter(&self) -> InterfaceFilter {
        InterfaceFilter {
            include: non_empty(&self.only),
            exclude: non_empty(&self.except),
        }
    }

    fn config(&self) -> anyhow::Result<GeneratorConfig> {
        let style = if self.camelize {
            NameStyle::Camel
        } else {
            NameStyle::Underscore
        };
        Ok(GeneratorConfig::default()
            .with_package(self.package.as_str())
            .with_mode(GenerationMode::from_flags(self.client_only, self.server_only)?)
            .with_prefixes(non_empty(&self.prefix))
            .with_style(style)
            .with_filter(self.filter())
            .with_format(self.gofmt))
    }

    fn sources(&self) -> Vec<Box<dyn SchemaSource>> {
        if self.paths.is_empty() {
            return vec![Box::new(ReaderSource::stdin())];
        }
        self.paths
            .iter()
            .map(|path| Box::new(FileSource::new(path)) as Box<dyn SchemaSource>)
            .collect()
    }
}

fn non_empty(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut sources = cli.sources();
    let output = if cli.xml {
        dbusgen::combine_xml(&mut sources, &cli.filter())?.into_bytes()
    } else {
        let config = cli.config()?;
        dbusgen::generate(&mut sources, &config)?
    };

    match &cli.output {
        Some(path) => std::fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&output)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
