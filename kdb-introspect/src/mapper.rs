//! Raw type parsing and the [`TypeMapper`] trait.
//!
//! Catalogs report declarations such as `varchar(255)` or `INT(11) unsigned`.
//! A mapper first parses that text into a lower-cased base name plus an
//! optional qualifier, then classifies the base name. Classification is
//! total: names outside a dialect's vocabulary become
//! [`CanonicalType::Unknown`].

use kdb_ir::CanonicalType;

use crate::dialect::Dialect;

/// A raw type declaration split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedType {
    /// Lower-cased base type name without precision/length.
    pub base: String,
    /// Trailing qualifier word such as `unsigned`.
    pub qualifier: Option<String>,
}

impl ParsedType {
    pub fn is_unsigned(&self) -> bool {
        self.qualifier.as_deref() == Some("unsigned")
    }

    /// Parse the `TYPE(precision) qualifier` shape used by MySQL's
    /// `SHOW COLUMNS`. Only the first word after the type is kept.
    pub fn positional(raw: &str) -> Self {
        let raw = raw.trim().to_lowercase();
        let mut words = raw.split_whitespace();
        let ty = words.next().unwrap_or_default();
        let qualifier = words.next().map(str::to_string);

        Self {
            base: strip_precision(ty).to_string(),
            qualifier,
        }
    }

    /// Parse free-form declarations (SQLite, SQL Server) where the type name
    /// may contain spaces. The `unsigned` qualifier is detected anywhere in
    /// the text.
    pub fn free_form(raw: &str) -> Self {
        let raw = raw.trim().to_lowercase();
        let qualifier = raw.contains("unsigned").then(|| "unsigned".to_string());

        Self {
            base: strip_precision(&raw).trim_end().to_string(),
            qualifier,
        }
    }

    /// Parse a bare type name that never carries precision or qualifiers.
    pub fn bare(raw: &str) -> Self {
        Self {
            base: strip_precision(&raw.trim().to_lowercase())
                .trim_end()
                .to_string(),
            qualifier: None,
        }
    }
}

fn strip_precision(s: &str) -> &str {
    match s.find('(') {
        Some(idx) => &s[..idx],
        None => s,
    }
}

/// Maps a dialect's raw type text to a [`CanonicalType`].
///
/// Implementations must be pure: the same input always yields the same
/// output, and no input is an error.
pub trait TypeMapper {
    /// The dialect this mapper understands.
    fn dialect(&self) -> Dialect;

    /// Split raw type text into base name and qualifier.
    fn parse(&self, raw: &str) -> ParsedType;

    /// Classify a lower-cased base type name.
    fn classify(&self, base: &str) -> CanonicalType;

    /// Parse and classify in one step.
    fn map_type(&self, raw: &str) -> CanonicalType {
        self.classify(&self.parse(raw).base)
    }
}
