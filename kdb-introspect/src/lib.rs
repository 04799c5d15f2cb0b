//! Schema introspection and type mapping for kdb.
//!
//! Each supported database exposes its schema differently (catalog tables,
//! pragma commands, `information_schema` views) and names its types with an
//! overlapping vocabulary. This crate hides those differences behind two
//! per-dialect traits and assembles a single [`kdb_ir::Metadata`].
//!
//! # Module Organization
//!
//! - [`catalog`] - The [`CatalogConnection`] boundary to a database client
//! - [`mapper`] - [`TypeMapper`] and raw type parsing
//! - [`introspector`] - [`Introspector`] and the raw table/column shapes
//! - [`dialect`] - MySQL, PostgreSQL, SQLite and SQL Server implementations
//! - [`assemble`] - Builds the IR from an introspector and a mapper
//!
//! Everything here is synchronous. A catalog query blocks until the
//! connection returns rows or an error, and the first error aborts the run.

pub mod assemble;
pub mod catalog;
pub mod dialect;
mod error;
pub mod introspector;
pub mod mapper;

#[cfg(test)]
mod testing;

pub use assemble::{AssembleOptions, Assembler, assemble};
pub use catalog::{CatalogConnection, CatalogRow, CatalogValue, DriverError, QueryError};
pub use dialect::{Dialect, DialectParseError};
pub use error::{Error, Result};
pub use introspector::{Introspector, RawColumn, RawTable};
pub use mapper::{ParsedType, TypeMapper};
