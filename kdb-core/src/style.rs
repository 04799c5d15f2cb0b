//! Field type styles for emitted code.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown type style '{0}' (expected base, nullable or option)")]
pub struct TypeStyleError(pub String);

/// How emitted field types treat NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeStyle {
    /// Plain types for every field.
    #[default]
    Base,
    /// Optional types for nullable columns only.
    Nullable,
    /// Optional types for every field.
    Option,
}

impl TypeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeStyle::Base => "base",
            TypeStyle::Nullable => "nullable",
            TypeStyle::Option => "option",
        }
    }

    /// Whether a column with the given nullability is wrapped in an option.
    pub fn is_optional(&self, nullable: bool) -> bool {
        match self {
            TypeStyle::Base => false,
            TypeStyle::Nullable => nullable,
            TypeStyle::Option => true,
        }
    }
}

impl FromStr for TypeStyle {
    type Err = TypeStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(TypeStyle::Base),
            "nullable" | "null" => Ok(TypeStyle::Nullable),
            "option" | "pointer" => Ok(TypeStyle::Option),
            other => Err(TypeStyleError(other.to_string())),
        }
    }
}

impl fmt::Display for TypeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
