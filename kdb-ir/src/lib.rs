//! Intermediate representation types for the kdb schema generator.
//!
//! This crate holds the dialect-agnostic object graph produced by schema
//! introspection and consumed by code emitters.
//!
//! # Architecture
//!
//! ```text
//! database catalog → kdb-introspect (assembly) → kdb-ir (Metadata) → codegen
//! ```
//!
//! The IR types are designed to be:
//! - Dialect-agnostic (no MySQL/PostgreSQL/SQLite/SQL Server concerns)
//! - Language-agnostic (no Rust-specific rendering decisions)
//! - Immutable once assembled

mod schema;
mod types;

pub use schema::{Field, Metadata, NameCollision, Table};
pub use types::CanonicalType;
