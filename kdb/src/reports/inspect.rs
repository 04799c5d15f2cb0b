//! Inspect command report.

use kdb_introspect::Dialect;
use kdb_ir::{Field, Metadata};

use super::output::{Output, Report};

/// Tables and columns as the assembler saw them.
#[derive(Debug)]
pub struct InspectReport<'a> {
    dialect: Dialect,
    metadata: &'a Metadata,
}

impl<'a> InspectReport<'a> {
    pub fn new(dialect: Dialect, metadata: &'a Metadata) -> Self {
        Self { dialect, metadata }
    }
}

fn cells(field: &Field) -> [&str; 4] {
    [
        &field.source_name,
        &field.raw_type,
        field.ty.as_str(),
        if field.nullable { "null" } else { "not null" },
    ]
}

impl Report for InspectReport<'_> {
    fn render(&self, out: &mut dyn Output) {
        out.title(&format!("{} schema", self.dialect.display_name()));
        out.key_value("Tables", &self.metadata.tables.len().to_string());
        out.key_value("Columns", &self.metadata.field_count().to_string());

        let mut widths = [0usize; 4];
        for field in self.metadata.tables.iter().flat_map(|t| &t.fields) {
            for (width, cell) in widths.iter_mut().zip(cells(field)) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for table in &self.metadata.tables {
            out.newline();
            out.section(&format!("{} -> {}", table.source_name, table.emit_name));
            for field in &table.fields {
                out.row(&cells(field), &widths);
            }
        }

        let unknown = self.metadata.unknown_fields().count();
        if unknown > 0 {
            out.warning(&format!(
                "{} column(s) have unmapped types and will be emitted as String",
                unknown
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use kdb_ir::{CanonicalType, Table};

    use super::super::output::format_row;
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Output for Recorder {
        fn title(&mut self, text: &str) {
            self.0.push(format!("# {}", text));
        }

        fn section(&mut self, name: &str) {
            self.0.push(format!("{}:", name));
        }

        fn key_value(&mut self, key: &str, value: &str) {
            self.0.push(format!("{}: {}", key, value));
        }

        fn row(&mut self, cells: &[&str], widths: &[usize]) {
            self.0.push(format!("  {}", format_row(cells, widths)));
        }

        fn warning(&mut self, msg: &str) {
            self.0.push(format!("warning: {}", msg));
        }

        fn newline(&mut self) {
            self.0.push(String::new());
        }
    }

    fn field(name: &str, raw: &str, ty: CanonicalType, nullable: bool) -> Field {
        Field {
            source_name: name.into(),
            emit_name: name.into(),
            raw_type: raw.into(),
            ty,
            nullable,
            unsigned: false,
        }
    }

    #[test]
    fn test_render_report() {
        let metadata = Metadata::new(
            "model",
            vec![],
            vec![Table::new(
                "users",
                "Users",
                vec![
                    field("id", "integer", CanonicalType::Int64, false),
                    field("shape", "geometry", CanonicalType::Unknown, true),
                ],
            )],
        );

        let mut out = Recorder::default();
        InspectReport::new(Dialect::Postgres, &metadata).render(&mut out);

        assert_eq!(
            out.0,
            [
                "# PostgreSQL schema",
                "Tables: 1",
                "Columns: 2",
                "",
                "users -> Users:",
                "  id     integer   int64    not null",
                "  shape  geometry  unknown  null",
                "warning: 1 column(s) have unmapped types and will be emitted as String",
            ]
        );
    }
}
