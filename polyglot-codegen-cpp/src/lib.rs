//! C++ proxy shim backend for Polyglot.
//!
//! Unlike the binding backends, this one renders the C++ side of the
//! call boundary: a translation unit that defines, for every proxied
//! function, an `extern "C"` function converting raw character buffers to
//! and from `std::string` around a call to the original. Declarations
//! that need no proxy are left out entirely.

mod generator;
mod type_mapper;

pub mod ast;

pub use generator::Generator;
pub use polyglot_codegen::language::BindingCodegen;
pub use type_mapper::CppTypeMapper;
