//! Rust AST builders for foreign declarations, structs, enums and impls.
//!
//! These provide a high-level API for constructing Rust syntax as
//! [`CodeFragment`](polyglot_codegen::builder::CodeFragment)s.

mod enums;
mod externs;
mod fns;
mod impls;
mod structs;

pub use enums::{Enum, Variant};
pub use externs::{EXTERN_BLOCK_OPEN, ExternBlock};
pub use fns::{ExternFn, Fn, Param};
pub use impls::Impl;
pub use structs::{Field, Struct};
