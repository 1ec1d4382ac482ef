//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod list;
mod output;

pub use check::{CheckReport, ModuleStats};
pub use generate::{FileOutcome, FileResult, GenerateReport};
pub use list::ListReport;
pub use output::{Report, TerminalOutput};
