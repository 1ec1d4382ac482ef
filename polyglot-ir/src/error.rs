use thiserror::Error;

use crate::BaseType;

/// Errors raised when IR values violate their invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("type information incomplete: {base} reference carries no type name")]
    MissingTypeName { base: BaseType },

    #[error("a {literal} literal cannot encode a value of type {ty}")]
    LiteralMismatch { ty: BaseType, literal: &'static str },

    #[error("type {ty} has no literal encoding")]
    UnsupportedLiteral { ty: BaseType },

    #[error("literal {value} does not fit in {ty}")]
    LiteralOutOfRange { ty: BaseType, value: String },
}
