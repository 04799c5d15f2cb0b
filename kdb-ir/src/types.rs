//! The canonical value type system.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dialect-independent semantic type of a column.
///
/// Every raw type name reported by a database catalog collapses into exactly
/// one of these values. Names that no mapper recognizes become
/// [`CanonicalType::Unknown`] instead of failing introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalType {
    String,
    Int64,
    Float64,
    /// 32-bit float, only produced for PostgreSQL `real`.
    Float32,
    Bool,
    Bytes,
    Timestamp,
    /// Fallback for unrecognized type names. Emitters render it as a string
    /// but may warn about it.
    Unknown,
}

impl CanonicalType {
    /// Get the type name used in reports and serialized IR.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalType::String => "string",
            CanonicalType::Int64 => "int64",
            CanonicalType::Float64 => "float64",
            CanonicalType::Float32 => "float32",
            CanonicalType::Bool => "bool",
            CanonicalType::Bytes => "bytes",
            CanonicalType::Timestamp => "timestamp",
            CanonicalType::Unknown => "unknown",
        }
    }

    /// Returns true if no mapper recognized the raw type name.
    pub fn is_unknown(&self) -> bool {
        matches!(self, CanonicalType::Unknown)
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(CanonicalType::Int64.to_string(), "int64");
        assert_eq!(CanonicalType::Timestamp.to_string(), "timestamp");
        assert_eq!(CanonicalType::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_is_unknown() {
        assert!(CanonicalType::Unknown.is_unknown());
        assert!(!CanonicalType::String.is_unknown());
    }

    #[test]
    fn test_serializes_as_snake_case() {
        let json = serde_json::to_string(&CanonicalType::Float32).unwrap();
        assert_eq!(json, "\"float32\"");
    }
}
