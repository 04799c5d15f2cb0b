//! Metadata, tables and fields.
//!
//! Ownership is strictly hierarchical: a [`Metadata`] owns its tables and a
//! [`Table`] owns its fields. Order is significant everywhere. Tables keep
//! the order the catalog enumerated them in, and fields keep the column
//! ordinal order so generated types can bind positional query results.

use serde::{Deserialize, Serialize};

use crate::CanonicalType;

/// Root of the IR, built once per run and handed to an emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Name of the package/module the generated code belongs to.
    pub package_name: String,
    /// The invoking command line, without the connection string.
    pub source_args: Vec<String>,
    /// Tables in catalog enumeration order.
    pub tables: Vec<Table>,
}

impl Metadata {
    pub fn new(
        package_name: impl Into<String>,
        source_args: Vec<String>,
        tables: Vec<Table>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            source_args,
            tables,
        }
    }

    /// Look up a table by its verbatim catalog name.
    pub fn table(&self, source_name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.source_name == source_name)
    }

    /// Iterate over every field whose type no mapper recognized.
    pub fn unknown_fields(&self) -> impl Iterator<Item = (&Table, &Field)> {
        self.tables.iter().flat_map(|table| {
            table
                .fields
                .iter()
                .filter(|field| field.ty.is_unknown())
                .map(move |field| (table, field))
        })
    }

    /// Emitted names shared by more than one table, or by more than one field
    /// of the same table, in first-occurrence order. Tables come first.
    pub fn name_collisions(&self) -> Vec<NameCollision<'_>> {
        let tables = collisions(
            None,
            self.tables
                .iter()
                .map(|t| (t.emit_name.as_str(), t.source_name.as_str())),
        );
        let fields = self.tables.iter().flat_map(|table| {
            collisions(
                Some(table.source_name.as_str()),
                table
                    .fields
                    .iter()
                    .map(|f| (f.emit_name.as_str(), f.source_name.as_str())),
            )
        });
        tables.into_iter().chain(fields).collect()
    }

    /// Total number of fields across all tables.
    pub fn field_count(&self) -> usize {
        self.tables.iter().map(|t| t.fields.len()).sum()
    }
}

/// Several source names that the naming pipeline mapped onto one emitted name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision<'a> {
    /// Owning table for field collisions, `None` for table collisions.
    pub table: Option<&'a str>,
    pub emit_name: &'a str,
    /// Colliding source names in catalog order.
    pub sources: Vec<&'a str>,
}

fn collisions<'a>(
    table: Option<&'a str>,
    names: impl Iterator<Item = (&'a str, &'a str)>,
) -> Vec<NameCollision<'a>> {
    let mut groups: Vec<NameCollision<'a>> = Vec::new();
    for (emit_name, source) in names {
        match groups.iter_mut().find(|g| g.emit_name == emit_name) {
            Some(group) => group.sources.push(source),
            None => groups.push(NameCollision {
                table,
                emit_name,
                sources: vec![source],
            }),
        }
    }
    groups.retain(|g| g.sources.len() > 1);
    groups
}

/// A database table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Verbatim table name from the catalog.
    pub source_name: String,
    /// Name after the table naming pipeline.
    pub emit_name: String,
    /// Fields in column ordinal order.
    pub fields: Vec<Field>,
}

impl Table {
    pub fn new(
        source_name: impl Into<String>,
        emit_name: impl Into<String>,
        fields: Vec<Field>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            emit_name: emit_name.into(),
            fields,
        }
    }

    /// Look up a field by its verbatim column name.
    pub fn field(&self, source_name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.source_name == source_name)
    }
}

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Verbatim column name, needed for query binding metadata.
    pub source_name: String,
    /// Name after the field naming pipeline.
    pub emit_name: String,
    /// Unmodified type declaration reported by the catalog.
    pub raw_type: String,
    /// Canonical type the raw type collapsed into.
    pub ty: CanonicalType,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the raw type carried an `unsigned` qualifier. Informational
    /// only: it never changes `ty`.
    pub unsigned: bool,
}
