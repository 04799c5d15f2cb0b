//! The optional `kdb.toml` configuration file.
//!
//! Every setting is optional. Callers layer command line flags over the
//! values found here, and built-in defaults under them.

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use miette::NamedSource;
use serde::Deserialize;
use toml::Spanned;

use crate::error::{ConfigError, Result};
use crate::naming::NamingPipeline;
use crate::style::TypeStyle;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    naming: RawNaming,
    output: RawOutput,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawNaming {
    table: Option<Spanned<String>>,
    field: Option<Spanned<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawOutput {
    package: Option<String>,
    path: Option<PathBuf>,
    types: Option<Spanned<String>>,
    from_row: Option<bool>,
    omit_header: Option<bool>,
    indent: Option<u8>,
}

/// Naming pipelines set in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingOverrides {
    pub table: Option<NamingPipeline>,
    pub field: Option<NamingPipeline>,
}

/// Output settings set in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub package: Option<String>,
    pub path: Option<PathBuf>,
    pub types: Option<TypeStyle>,
    pub from_row: Option<bool>,
    pub omit_header: Option<bool>,
    pub indent: Option<u8>,
}

/// Validated configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub naming: NamingOverrides,
    pub output: OutputConfig,
}

impl Config {
    /// Parse and validate configuration text. `filename` is only used for
    /// error reporting.
    pub fn parse(src: &str, filename: &str) -> Result<Self> {
        let named = || NamedSource::new(filename, src.to_string());

        let raw: RawConfig = toml::from_str(src).map_err(|source| {
            Box::new(ConfigError::Parse {
                src: named(),
                span: source.span().map(Into::into),
                source,
            })
        })?;

        let pipeline = |value: Option<Spanned<String>>| -> Result<Option<NamingPipeline>> {
            value
                .map(|spanned| {
                    let span = spanned.span();
                    NamingPipeline::from_str(spanned.get_ref()).map_err(|e| {
                        Box::new(ConfigError::Naming {
                            src: named(),
                            span: span_of(span),
                            message: e.to_string(),
                        })
                    })
                })
                .transpose()
        };

        let naming = NamingOverrides {
            table: pipeline(raw.naming.table)?,
            field: pipeline(raw.naming.field)?,
        };

        let types = raw
            .output
            .types
            .map(|spanned| {
                let span = spanned.span();
                TypeStyle::from_str(spanned.get_ref()).map_err(|e| {
                    Box::new(ConfigError::TypeStyle {
                        src: named(),
                        span: span_of(span),
                        message: e.to_string(),
                    })
                })
            })
            .transpose()?;

        Ok(Self {
            naming,
            output: OutputConfig {
                package: raw.output.package,
                path: raw.output.path,
                types,
                from_row: raw.output.from_row,
                omit_header: raw.output.omit_header,
                indent: raw.output.indent,
            },
        })
    }
}

fn span_of(range: Range<usize>) -> miette::SourceSpan {
    range.into()
}

/// A configuration file loaded from disk.
#[derive(Debug, Clone)]
pub struct KdbToml {
    path: PathBuf,
    config: Config,
}

impl KdbToml {
    /// Read and validate the configuration file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            Box::new(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "kdb.toml".to_string());
        let config = Config::parse(&content, &filename)?;

        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// Open `path` if it exists, otherwise return `None`.
    pub fn open_if_exists(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if path.exists() {
            Self::open(path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}
