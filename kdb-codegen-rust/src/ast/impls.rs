//! Rust inherent impl block builder.

use crate::{CodeBuilder, CodeFragment, Renderable};

/// A public associated constant.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    ty: String,
    value: String,
    doc: Option<String>,
}

impl Const {
    /// `value` is emitted verbatim, so string values must already be quoted.
    pub fn new(name: impl Into<String>, ty: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            value: value.into(),
            doc: None,
        }
    }

    /// A `&'static str` constant holding `value` as a string literal.
    pub fn str(name: impl Into<String>, value: &str) -> Self {
        Self::new(name, "&'static str", format!("{:?}", value))
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::rust_doc(doc));
        }
        fragments.push(CodeFragment::Line(format!(
            "pub const {}: {} = {};",
            self.name, self.ty, self.value
        )));
        fragments
    }
}

/// Builder for inherent impl blocks.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    consts: Vec<Const>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            consts: Vec::new(),
        }
    }

    pub fn constant(mut self, constant: Const) -> Self {
        self.consts.push(constant);
        self
    }

    /// Build the impl block as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Impl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::block(
            format!("impl {} {{", self.type_name),
            self.consts.to_fragments(),
            "}",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_impl() {
        assert_eq!(Impl::new("Foo").build(), "impl Foo {\n}\n");
    }

    #[test]
    fn test_impl_with_const() {
        let i = Impl::new("Foo")
            .constant(Const::str("TABLE", "foo").doc("Source table name."))
            .build();
        assert_eq!(
            i,
            "impl Foo {\n    /// Source table name.\n    \
             pub const TABLE: &'static str = \"foo\";\n}\n"
        );
    }

    #[test]
    fn test_str_const_escapes_quotes() {
        let i = Impl::new("Odd")
            .constant(Const::str("TABLE", "we\"ird"))
            .build();
        assert!(i.contains(r#"pub const TABLE: &'static str = "we\"ird";"#));
    }
}
