//! Built-in lints for manifest validation.

mod duplicate_symbol;
mod empty_enum;
mod overloaded_function;

pub use duplicate_symbol::DuplicateSymbolLint;
pub use empty_enum::EmptyEnumLint;
pub use overloaded_function::OverloadedFunctionLint;
