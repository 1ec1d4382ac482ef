//! D declaration builders.

mod aggregates;
mod fns;

pub use aggregates::{Enum, Struct};
pub use fns::{Fn, MangledFn, Param};
