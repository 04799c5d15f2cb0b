//! Rust AST builders for generated table types.

mod impls;
mod structs;

pub use impls::{Const, Impl};
pub use structs::{Field, Struct};
