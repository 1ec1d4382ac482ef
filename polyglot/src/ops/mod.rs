//! Core operations.
//!
//! This module contains the business logic for polyglot commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod list;

pub use check::check;
pub use generate::{GenerateRequest, generate};
pub use list::list;
use polyglot_codegen::pipeline::{Diagnostic, Pipeline, TracingPlugin};

/// The pipeline every command runs, with phase timings logged at debug level.
fn pipeline() -> Pipeline {
    Pipeline::new().plugin(TracingPlugin::new())
}

/// One-line description of a diagnostic with its source location.
fn describe(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}
