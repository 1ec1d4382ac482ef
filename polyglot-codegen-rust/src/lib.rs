//! Rust backend for Polyglot.
//!
//! Renders a module tree as Rust source: `unsafe extern "C"` declarations
//! bound by `#[link_name]`, `#[repr]` enums, `#[repr(C)]` structs with
//! forwarding methods, and safe string wrappers over proxied functions.

mod generator;
mod naming;
mod type_mapper;

pub mod ast;

pub use generator::Generator;
pub use naming::RUST_NAMING;
pub use polyglot_codegen::language::BindingCodegen;
pub use type_mapper::RustTypeMapper;
