// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Declaration manifest (`polyglot.toml`) parsing and validation.
//!
//! The manifest is the boundary between an extraction front-end and the
//! binding generator: one `[[decl]]` table per discovered declaration, with
//! pre-resolved linkage names and source locations.

mod decl;
mod error;
mod manifest;
mod spec;

pub use decl::{
    ClassDecl, Declaration, EnumDecl, EnumeratorDecl, FunctionDecl, FunctionFlag, MethodDecl,
    VarDecl, VariableDecl,
};
pub use error::{Error, Result, SourceContext};
pub use manifest::{GenerateConfig, Manifest, ParseContext, SourceConfig};
pub use spec::{DetailedType, TypeSpec, ValueSpec};
