//! Canonical type to Rust type mapping.

use kdb_core::TypeStyle;
use kdb_ir::{CanonicalType, Field};

/// Maps canonical types to Rust type syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper;

impl RustTypeMapper {
    /// The Rust type for a canonical type. Unknown types fall back to
    /// `String`, like the catalog text they came from.
    pub fn map(&self, ty: CanonicalType) -> &'static str {
        match ty {
            CanonicalType::String | CanonicalType::Unknown => "String",
            CanonicalType::Int64 => "i64",
            CanonicalType::Float64 => "f64",
            CanonicalType::Float32 => "f32",
            CanonicalType::Bool => "bool",
            CanonicalType::Bytes => "Vec<u8>",
            CanonicalType::Timestamp => "chrono::NaiveDateTime",
        }
    }

    pub fn map_optional(&self, inner: &str) -> String {
        format!("Option<{}>", inner)
    }

    /// The Rust type for a field under `style`.
    pub fn field_type(&self, field: &Field, style: TypeStyle) -> String {
        let base = self.map(field.ty);
        if style.is_optional(field.nullable) {
            self.map_optional(base)
        } else {
            base.to_string()
        }
    }
}
