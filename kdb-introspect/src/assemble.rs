//! Builds [`Metadata`] from an [`Introspector`] and a [`TypeMapper`].
//!
//! Table order follows the introspector's enumeration and field order
//! follows column ordinal order. If any catalog query fails, the error is
//! returned as is and no partial metadata is produced.

use kdb_core::NamingConfig;
use kdb_ir::{Field, Metadata, Table};
use tracing::info;

use crate::catalog::CatalogConnection;
use crate::error::Result;
use crate::introspector::{Introspector, RawColumn, RawTable};
use crate::mapper::TypeMapper;

/// Inputs to assembly that do not come from the database.
#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    /// Package name recorded on the metadata.
    pub package_name: String,
    /// Invoking command line, without the connection string.
    pub source_args: Vec<String>,
    /// Naming pipelines for tables and fields.
    pub naming: NamingConfig,
}

impl AssembleOptions {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Default::default()
        }
    }

    pub fn source_args(mut self, args: Vec<String>) -> Self {
        self.source_args = args;
        self
    }

    pub fn naming(mut self, naming: NamingConfig) -> Self {
        self.naming = naming;
        self
    }
}

/// Converts raw introspection output into IR entities.
pub struct Assembler<'a> {
    mapper: &'a dyn TypeMapper,
    naming: &'a NamingConfig,
}

impl<'a> Assembler<'a> {
    pub fn new(mapper: &'a dyn TypeMapper, naming: &'a NamingConfig) -> Self {
        Self { mapper, naming }
    }

    pub fn table(&self, raw: RawTable) -> Table {
        let emit_name = self.naming.table_name(&raw.name);
        let fields = raw.columns.into_iter().map(|c| self.field(c)).collect();
        Table::new(raw.name, emit_name, fields)
    }

    pub fn field(&self, raw: RawColumn) -> Field {
        let parsed = self.mapper.parse(&raw.raw_type);
        Field {
            emit_name: self.naming.field_name(&raw.name),
            ty: self.mapper.classify(&parsed.base),
            unsigned: parsed.is_unsigned(),
            nullable: raw.nullable,
            source_name: raw.name,
            raw_type: raw.raw_type,
        }
    }
}

/// Run `introspector` against `conn` and assemble the IR.
pub fn assemble(
    conn: &mut dyn CatalogConnection,
    introspector: &dyn Introspector,
    mapper: &dyn TypeMapper,
    options: &AssembleOptions,
) -> Result<Metadata> {
    let raw_tables = introspector.introspect(conn)?;

    let assembler = Assembler::new(mapper, &options.naming);
    let tables: Vec<Table> = raw_tables.into_iter().map(|t| assembler.table(t)).collect();

    let metadata = Metadata::new(
        options.package_name.clone(),
        options.source_args.clone(),
        tables,
    );

    info!(
        dialect = %introspector.dialect(),
        tables = metadata.tables.len(),
        fields = metadata.field_count(),
        "Assembled schema metadata"
    );

    Ok(metadata)
}
