//! Rust code generation for kdb.
//!
//! Turns an assembled [`Metadata`](kdb_ir::Metadata) into a Rust source
//! file with one `struct` per table.

pub mod ast;
mod code_builder;
mod generator;
mod indent;
mod naming;
mod renderable;
mod type_mapper;

pub use code_builder::CodeBuilder;
pub use generator::{Generator, RenderOptions};
pub use indent::Indent;
pub use naming::{is_reserved, rust_ident};
pub use renderable::{CodeFragment, Renderable};
pub use type_mapper::RustTypeMapper;
