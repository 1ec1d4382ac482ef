//! Module emission and output management.
//!
//! - [`emit_module`] - Single-pass driver shared by every backend
//! - [`Emitter`] - Per-declaration rendering implemented by backends
//! - [`ExternBlockTracker`] - Grouping of consecutive functions
//! - [`Banner`], [`GenerateOptions`] - File header and its timestamp
//! - [`ModuleOutput`] - Rendered module plus omitted declarations
//! - [`method_bindings`], [`FunctionAliases`] - Names for overloads

mod emit;
mod extern_block;
mod header;
mod methods;
mod output;

pub use emit::{Emitter, ProxyFragments, Scope, emit_module};
pub use extern_block::{BlockState, ExternBlockTracker, Transition};
pub use header::{Banner, GenerateOptions, SOURCE_DATE_EPOCH, Timestamp};
pub use methods::{FunctionAliases, MethodBinding, method_bindings};
pub use output::{ModuleOutput, SkippedDeclaration};
