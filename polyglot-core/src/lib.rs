//! Core utilities shared across the Polyglot crates.

mod file;
mod time;
mod utils;

/// Tool version stamped into every generated file.
pub const POLYGLOT_VERSION: &str = env!("CARGO_PKG_VERSION");

// File operations
pub use file::{OutputFile, WriteResult};
// Timestamps for generated file banners
pub use time::{format_unix_utc, now_utc};
// Identifier and literal utilities
pub use utils::{UnicodeEscape, escape_c_string, is_identifier, sanitize_symbol};
