//! Core utilities and types for the kdb schema generator.
//!
//! This crate provides the naming pipeline shared by schema assembly and
//! code emission, the optional `kdb.toml` configuration file, and output
//! destination handling.

mod config;
mod error;
mod file;
mod naming;
mod style;

// Configuration
pub use config::{Config, KdbToml, NamingOverrides, OutputConfig};
pub use error::{ConfigError, Result};
// Output
pub use file::{Destination, WriteResult};
// Naming
pub use naming::{NameFormat, NamingConfig, NamingError, NamingPipeline, format_name};
pub use style::{TypeStyle, TypeStyleError};
