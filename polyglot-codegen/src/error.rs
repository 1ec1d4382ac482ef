//! Error taxonomy for AST construction and binding generation.

use polyglot_ir::{BaseType, IrError, Language};
use thiserror::Error;

/// How a generation error propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The IR is inconsistent. Aborts the file being written.
    RepresentationIntegrity,
    /// The declaration cannot be expressed in the target. The declaration
    /// is omitted and the rest of the module is still generated.
    UnsupportedConstruct,
    /// The output sink failed. Aborts the file being written.
    Io,
}

/// Errors raised while rendering a module for one target.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("type information incomplete: {base} reference carries no type name")]
    MissingTypeName { base: BaseType },

    #[error("invalid literal: {0}")]
    InvalidLiteral(IrError),

    #[error("type '{ty}' is not supported by {}", .target.display_name())]
    UnsupportedType { ty: String, target: Language },

    #[error("{qualifier} qualifier on '{ty}' is not supported by {}", .target.display_name())]
    UnsupportedQualifier {
        qualifier: &'static str,
        ty: String,
        target: Language,
    },

    #[error("{ty} value '{value}' cannot be written in {}", .target.display_name())]
    UnsupportedValue {
        ty: BaseType,
        value: String,
        target: Language,
    },

    #[error("variable '{name}' has no constant value to bind in {}", .target.display_name())]
    MissingValue { name: String, target: Language },

    #[error("failed to write generated {} output", .target.display_name())]
    Io {
        target: Language,
        #[source]
        source: std::io::Error,
    },
}

impl CodegenError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CodegenError::MissingTypeName { .. } | CodegenError::InvalidLiteral(_) => {
                ErrorClass::RepresentationIntegrity
            }
            CodegenError::UnsupportedType { .. }
            | CodegenError::UnsupportedQualifier { .. }
            | CodegenError::UnsupportedValue { .. }
            | CodegenError::MissingValue { .. } => ErrorClass::UnsupportedConstruct,
            CodegenError::Io { .. } => ErrorClass::Io,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.class() == ErrorClass::UnsupportedConstruct
    }
}

impl From<IrError> for CodegenError {
    fn from(err: IrError) -> Self {
        match err {
            IrError::MissingTypeName { base } => CodegenError::MissingTypeName { base },
            other => CodegenError::InvalidLiteral(other),
        }
    }
}

/// Errors raised while building the AST from manifest declarations.
///
/// Each error belongs to one declaration; the declaration is skipped and
/// construction carries on with the next one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("default value of '{parameter}' in '{declaration}' is not a constant: {expr}")]
    NonConstantDefault {
        declaration: String,
        parameter: String,
        expr: String,
    },

    #[error("default value of '{parameter}' in '{declaration}' is not supported: {source}")]
    UnsupportedDefault {
        declaration: String,
        parameter: String,
        #[source]
        source: IrError,
    },

    #[error("unknown type '{spelling}' in '{declaration}'")]
    UnknownType {
        declaration: String,
        spelling: String,
    },

    #[error("{base} type in '{declaration}' does not name the referenced type")]
    MissingTypeName {
        declaration: String,
        base: BaseType,
    },

    #[error("value of enumerator '{enumerator}' in '{declaration}' could not be evaluated: {expr}")]
    UnevaluableConstant {
        declaration: String,
        enumerator: String,
        expr: String,
    },
}
