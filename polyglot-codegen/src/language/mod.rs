//! Language-specific abstractions.
//!
//! - [`BindingCodegen`] - Main trait for per-target binding generators
//! - [`TypeMapper`] - Table-driven type and literal rendering
//! - [`NamingConvention`], [`LocalNames`] - Reserved words and body locals

mod naming;
mod traits;

pub use naming::{LocalNames, NamingConvention};
pub use traits::{BindingCodegen, TypeMapper};
