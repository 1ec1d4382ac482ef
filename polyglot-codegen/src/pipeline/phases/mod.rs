//! Built-in pipeline phases.

mod lower;
mod proxy;
pub mod validate;

pub use lower::{AstBuilder, LowerPhase};
pub use proxy::ProxyPhase;
pub use validate::{Lint, ValidatePhase};
