//! Rust identifier rules for emitted names.

/// Strict and reserved Rust keywords across editions.
const RESERVED_WORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_WORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Whether `name` is a Rust keyword.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Turn an emitted name into a valid Rust identifier.
///
/// Characters that are neither alphanumeric nor `_` become `_`. A leading
/// digit gains a `_` prefix. Keywords are escaped as `r#name`, or suffixed
/// with `_` where a raw identifier is not allowed.
pub fn rust_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if ident == "_" {
        return "_unnamed".to_string();
    }

    if NON_RAW_WORDS.contains(&ident.as_str()) {
        ident.push('_');
        ident
    } else if is_reserved(&ident) {
        format!("r#{}", ident)
    } else {
        ident
    }
}

/// The identifier as seen by derive macros, without any `r#` prefix.
pub(crate) fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}
