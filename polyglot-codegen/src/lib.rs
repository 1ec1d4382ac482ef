//! Shared binding generation machinery for Polyglot.
//!
//! This crate turns a lowered module tree into target source text. Language
//! backends (e.g., `polyglot-codegen-rust`) implement the per-declaration
//! rendering; everything else is shared.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`generation`] - Banner, extern-block grouping and the emission driver
//! - [`language`] - Per-target contract (BindingCodegen, TypeMapper)
//! - [`pipeline`] - Manifest validation, lowering and proxy synthesis
//! - [`proxy`] - Marshaling proxies for values that cannot cross the ABI

pub mod builder;
mod error;
pub mod generation;
pub mod language;
pub mod pipeline;
pub mod proxy;

pub use error::{CodegenError, ConstructionError, ErrorClass};
