//! Naming pipelines.
//!
//! A pipeline is an ordered list of identifier transforms applied strictly
//! left to right, each step consuming the previous step's output. Order is
//! significant: `lowercase,capitalize` turns `ABC` into `Abc` while
//! `capitalize,lowercase` turns it into `abc`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when parsing an unknown transform name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("unknown name format '{0}' (expected capitalize, lowercase or nounderscore)")]
    UnknownFormat(String),
}

/// A single identifier transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameFormat {
    /// Upper-case the first character only.
    Capitalize,
    /// Lower-case the whole name.
    Lowercase,
    /// Remove every underscore.
    NoUnderscore,
}

impl NameFormat {
    /// Get the name used in pipeline strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            NameFormat::Capitalize => "capitalize",
            NameFormat::Lowercase => "lowercase",
            NameFormat::NoUnderscore => "nounderscore",
        }
    }

    /// Apply this transform to a name.
    pub fn apply(&self, name: &str) -> String {
        match self {
            NameFormat::Capitalize => capitalize(name),
            NameFormat::Lowercase => name.to_lowercase(),
            NameFormat::NoUnderscore => name.replace('_', ""),
        }
    }
}

impl FromStr for NameFormat {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "capitalize" => Ok(NameFormat::Capitalize),
            "lowercase" => Ok(NameFormat::Lowercase),
            "nounderscore" => Ok(NameFormat::NoUnderscore),
            other => Err(NamingError::UnknownFormat(other.to_string())),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// An ordered sequence of [`NameFormat`] steps.
///
/// Parsed from a comma-separated list such as `"capitalize,nounderscore"`.
/// The empty string parses to the identity pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NamingPipeline {
    steps: Vec<NameFormat>,
}

impl NamingPipeline {
    pub fn new(steps: Vec<NameFormat>) -> Self {
        Self { steps }
    }

    /// The pipeline that leaves names untouched.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[NameFormat] {
        &self.steps
    }

    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run `name` through every step in order.
    pub fn format(&self, name: &str) -> String {
        self.steps
            .iter()
            .fold(name.to_string(), |acc, step| step.apply(&acc))
    }
}

impl FromStr for NamingPipeline {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(NameFormat::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }
}

impl fmt::Display for NamingPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.steps.iter().map(NameFormat::as_str).collect();
        f.write_str(&names.join(","))
    }
}

/// Format `name` with a comma-separated pipeline string.
pub fn format_name(name: &str, pipeline: &str) -> Result<String, NamingError> {
    Ok(pipeline.parse::<NamingPipeline>()?.format(name))
}

/// Naming pipelines for table and field identifiers.
///
/// Passed explicitly into assembly; there is no process-wide naming state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConfig {
    /// Applied to table names to produce type names.
    pub table: NamingPipeline,
    /// Applied to column names to produce field names.
    pub field: NamingPipeline,
}

impl NamingConfig {
    pub fn new(table: NamingPipeline, field: NamingPipeline) -> Self {
        Self { table, field }
    }

    pub fn table_name(&self, name: &str) -> String {
        self.table.format(name)
    }

    pub fn field_name(&self, name: &str) -> String {
        self.field.format(name)
    }
}

impl Default for NamingConfig {
    /// Tables use `capitalize,nounderscore`, fields are left as is.
    fn default() -> Self {
        Self {
            table: NamingPipeline::new(vec![NameFormat::Capitalize, NameFormat::NoUnderscore]),
            field: NamingPipeline::identity(),
        }
    }
}
