//! Compilation pipeline from manifest declarations to module trees.
//!
//! The [`Pipeline`] orchestrator runs explicit phases
//! (validate → lower → proxy) over a shared [`CompilationContext`],
//! collecting diagnostics along the way. Generation starts only once the
//! pipeline has finished, so generators see a complete, immutable registry.
//!
//! ```ignore
//! use polyglot_codegen::pipeline::Pipeline;
//!
//! let mut ctx = Pipeline::new().run(manifest)?;
//! for diag in ctx.warnings() {
//!     eprintln!("{diag}");
//! }
//! let registry = ctx.take_registry()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::{Plugin, TracingPlugin};
pub use runner::Pipeline;
