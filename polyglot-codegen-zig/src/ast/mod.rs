//! Zig declaration builders.

mod consts;
mod containers;
mod fns;

pub use consts::Const;
pub use containers::Container;
pub use fns::{ExternFn, Fn, Param};
