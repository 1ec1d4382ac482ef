//! D backend for Polyglot.
//!
//! Renders a module tree as a D module. Declarations live in `extern(C++)`
//! blocks and are pinned to their mangled symbols with `pragma(mangle)`,
//! so the D compiler never has to reproduce the C++ mangling itself.

mod generator;
mod naming;
mod type_mapper;

pub mod ast;

pub use generator::Generator;
pub use naming::D_NAMING;
pub use polyglot_codegen::language::BindingCodegen;
pub use type_mapper::DTypeMapper;
