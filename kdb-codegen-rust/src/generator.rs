//! Rendering of assembled table metadata into a Rust source file.

use kdb_core::TypeStyle;
use kdb_ir::{Field as IrField, Metadata, Table};

use crate::ast::{Const, Field, Impl, Struct};
use crate::naming::{rust_ident, unraw};
use crate::{CodeBuilder, Indent, RustTypeMapper};

/// First header line of every generated file.
pub const GENERATED_MARKER: &str = "// Code generated by kdb. DO NOT EDIT.";

/// Options controlling the emitted source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub style: TypeStyle,
    /// Derive `sqlx::FromRow` and emit `#[sqlx(rename)]` where needed.
    pub from_row: bool,
    /// Drop the generated-code marker and command line comments.
    pub omit_header: bool,
    pub indent: Indent,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: TypeStyle::Base,
            from_row: false,
            omit_header: false,
            indent: Indent::RUST,
        }
    }
}

/// Rust generator for one [`Metadata`].
pub struct Generator<'a> {
    metadata: &'a Metadata,
    options: RenderOptions,
    types: RustTypeMapper,
}

impl<'a> Generator<'a> {
    pub fn new(metadata: &'a Metadata) -> Self {
        Self {
            metadata,
            options: RenderOptions::default(),
            types: RustTypeMapper,
        }
    }

    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Render the whole file.
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new(self.options.indent);

        if !self.options.omit_header {
            builder.push_line(GENERATED_MARKER);
            builder.push_line(&self.command_line());
            builder.push_blank();
        }

        builder.push_line(&format!(
            "//! Table types for the `{}` package.",
            self.metadata.package_name
        ));
        builder.push_blank();
        builder.push_line("#![allow(non_snake_case)]");

        for table in &self.metadata.tables {
            let ident = rust_ident(&table.emit_name);
            builder.push_blank();
            builder.emit(&self.table_struct(table, &ident));
            builder.push_blank();
            builder.emit(&Impl::new(&ident).constant(
                Const::str("TABLE", &table.source_name).doc("Name of the source table."),
            ));
        }

        builder.build()
    }

    fn command_line(&self) -> String {
        std::iter::once("// kdb")
            .chain(self.metadata.source_args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn table_struct(&self, table: &Table, ident: &str) -> Struct {
        let mut derives = vec!["Debug", "Clone"];
        if self.options.from_row {
            derives.push("sqlx::FromRow");
        }

        derives
            .into_iter()
            .fold(Struct::new(ident), |s, derive| s.derive(derive))
            .fields(table.fields.iter().map(|field| self.field(field)))
    }

    fn field(&self, field: &IrField) -> Field {
        let ident = rust_ident(&field.emit_name);
        let ty = self.types.field_type(field, self.options.style);
        let mut out = Field::new(&ident, ty);

        if field.ty.is_unknown() {
            out = out.doc(format!("Unmapped database type `{}`.", field.raw_type));
        }
        if self.options.from_row && unraw(&ident) != field.source_name {
            out = out.attr(format!("sqlx(rename = {:?})", field.source_name));
        }

        out
    }
}
