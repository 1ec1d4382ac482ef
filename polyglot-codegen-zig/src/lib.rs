//! Zig backend for Polyglot.
//!
//! Renders a module tree as a Zig source file: `extern fn` declarations
//! named after their mangled symbol with `pub const` aliases, namespaces as
//! nested container structs, `extern struct` classes and allocator-based
//! wrappers over proxied functions.

mod generator;
mod naming;
mod type_mapper;

pub mod ast;

pub use generator::Generator;
pub use naming::ZIG_NAMING;
pub use polyglot_codegen::language::BindingCodegen;
pub use type_mapper::ZigTypeMapper;
