//! Intermediate representation for the Polyglot binding generator.
//!
//! Declarations harvested from a source language are stored here in a form
//! that is precise enough to regenerate ABI-correct bindings for every
//! supported target.
//!
//! # Architecture
//!
//! ```text
//! polyglot.toml → polyglot-manifest (parsing) → polyglot-ir (modules) → codegen
//! ```
//!
//! - [`QualifiedType`] and [`Value`] describe types and literal values.
//! - [`Node`] is the closed set of declaration kinds.
//! - [`Ast`] holds the declarations of one module, nested by namespace.
//! - [`ModuleRegistry`] maps module names to their [`Ast`].

mod ast;
mod error;
mod language;
mod registry;
mod types;
mod value;

pub use ast::{
    Ast, ClassKind, ClassNode, EnumNode, Enumerator, FunctionFlags, FunctionNode, NamespaceNode,
    Node, NodeKind, TypeProxy, VariableNode,
};
pub use error::IrError;
pub use language::Language;
pub use registry::{ModuleRegistry, SOURCE_EXTENSIONS, module_name};
pub use types::{BaseType, QualifiedType};
pub use value::{Literal, Value};
