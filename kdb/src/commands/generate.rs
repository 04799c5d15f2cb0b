use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use kdb_codegen_rust::{Generator, Indent, RenderOptions};
use kdb_core::{
    Config, Destination, KdbToml, NamingConfig, NamingPipeline, TypeStyle, WriteResult,
};
use kdb_introspect::AssembleOptions;
use tracing::info;

use super::{DEFAULT_PACKAGE, UnwrapOrExit};
use crate::source::SourceArgs;

/// Configuration file picked up from the working directory.
const DEFAULT_CONFIG: &str = "kdb.toml";

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    source: SourceArgs,

    /// Struct name format: comma-separated capitalize, lowercase, nounderscore
    /// [default: capitalize,nounderscore]
    #[arg(long, value_name = "FMT")]
    struct_name: Option<NamingPipeline>,

    /// Field name format, same steps as --struct-name [default: none]
    #[arg(long, value_name = "FMT")]
    field_name: Option<NamingPipeline>,

    /// Package name recorded in the generated file [default: model]
    #[arg(long)]
    package: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field types: base, nullable or option [default: base]
    #[arg(long, value_name = "STYLE")]
    types: Option<TypeStyle>,

    /// Derive sqlx::FromRow and map renamed fields to their columns
    #[arg(long)]
    from_row: bool,

    /// Omit the generated-code header
    #[arg(long)]
    omit_header: bool,

    /// Indent width in spaces, 0 for tabs [default: 4]
    #[arg(long, value_name = "N")]
    indent: Option<u8>,

    /// Path to kdb.toml (defaults to ./kdb.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Settings after merging flags, the configuration file and defaults.
#[derive(Debug, PartialEq)]
struct Settings {
    package: String,
    naming: NamingConfig,
    destination: Destination,
    render: RenderOptions,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let settings = self.resolve(self.load_config());

        let options = AssembleOptions::new(&settings.package)
            .source_args(self.source.command_line())
            .naming(settings.naming);
        let metadata = self.source.introspect(&options)?;

        let code = Generator::new(&metadata).options(settings.render).render();
        if let WriteResult::Written(path) = settings.destination.write(&code)? {
            info!(
                path = %path.display(),
                tables = metadata.tables.len(),
                "Wrote generated code"
            );
        }

        Ok(())
    }

    fn load_config(&self) -> Config {
        match &self.config {
            Some(path) => KdbToml::open(path).unwrap_or_exit().into_config(),
            None => KdbToml::open_if_exists(Path::new(DEFAULT_CONFIG))
                .unwrap_or_exit()
                .map(KdbToml::into_config)
                .unwrap_or_default(),
        }
    }

    fn resolve(&self, config: Config) -> Settings {
        let Config { naming, output } = config;
        let defaults = NamingConfig::default();

        Settings {
            package: self
                .package
                .clone()
                .or(output.package)
                .unwrap_or_else(|| DEFAULT_PACKAGE.to_string()),
            naming: NamingConfig::new(
                self.struct_name.clone().or(naming.table).unwrap_or(defaults.table),
                self.field_name.clone().or(naming.field).unwrap_or(defaults.field),
            ),
            destination: Destination::from_path(self.output.clone().or(output.path)),
            render: RenderOptions {
                style: self.types.or(output.types).unwrap_or_default(),
                from_row: self.from_row || output.from_row.unwrap_or(false),
                omit_header: self.omit_header || output.omit_header.unwrap_or(false),
                indent: self
                    .indent
                    .or(output.indent)
                    .map(Indent::from_width)
                    .unwrap_or_default(),
            },
        }
    }
}
