//! Literal values for default arguments and explicit enumerators.

use std::fmt;

use serde::Serialize;

use crate::{BaseType, IrError};

/// The payload of a [`Value`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Bool(bool),
    Char(i8),
    Char16(u16),
    Char32(u32),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
}

impl Literal {
    /// Short name of the literal variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Bool(_) => "bool",
            Literal::Char(_) => "char",
            Literal::Char16(_) => "char16",
            Literal::Char32(_) => "char32",
            Literal::Int(_) => "signed integer",
            Literal::Uint(_) => "unsigned integer",
            Literal::Float(_) => "floating point",
            Literal::String(_) => "string",
        }
    }

    /// Integral view of the literal, if it has one.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Literal::Bool(b) => Some(i128::from(*b)),
            Literal::Char(c) => Some(i128::from(*c)),
            Literal::Char16(c) => Some(i128::from(*c)),
            Literal::Char32(c) => Some(i128::from(*c)),
            Literal::Int(i) => Some(i128::from(*i)),
            Literal::Uint(u) => Some(i128::from(*u)),
            Literal::Float(_) | Literal::String(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Char(c) => write!(f, "{}", c),
            Literal::Char16(c) => write!(f, "{}", c),
            Literal::Char32(c) => write!(f, "{}", c),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Uint(u) => write!(f, "{}", u),
            Literal::Float(x) => write!(f, "{}", x),
            Literal::String(s) => write!(f, "{:?}", s),
        }
    }
}

/// A literal tagged by the primitive kind it represents.
///
/// The tag and payload always agree: construction goes through
/// [`Value::new`], which rejects mismatched pairs, kinds without a literal
/// encoding and integers that do not fit the tagged width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Value {
    ty: BaseType,
    literal: Literal,
}

impl Value {
    pub fn new(ty: BaseType, literal: Literal) -> Result<Self, IrError> {
        check_literal(ty, &literal)?;
        Ok(Self { ty, literal })
    }

    pub fn bool(b: bool) -> Self {
        Self {
            ty: BaseType::Bool,
            literal: Literal::Bool(b),
        }
    }

    pub fn char(c: i8) -> Self {
        Self {
            ty: BaseType::Char,
            literal: Literal::Char(c),
        }
    }

    pub fn int(i: i64) -> Self {
        Self {
            ty: BaseType::Int64,
            literal: Literal::Int(i),
        }
    }

    pub fn uint(u: u64) -> Self {
        Self {
            ty: BaseType::Uint64,
            literal: Literal::Uint(u),
        }
    }

    pub fn float(x: f64) -> Self {
        Self {
            ty: BaseType::Float64,
            literal: Literal::Float(x),
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self {
            ty: BaseType::OwnedString,
            literal: Literal::String(s.into()),
        }
    }

    pub fn ty(&self) -> BaseType {
        self.ty
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.literal.fmt(f)
    }
}

fn check_literal(ty: BaseType, literal: &Literal) -> Result<(), IrError> {
    let mismatch = || IrError::LiteralMismatch {
        ty,
        literal: literal.kind_name(),
    };
    let out_of_range = || IrError::LiteralOutOfRange {
        ty,
        value: literal.to_string(),
    };

    match ty {
        BaseType::Int128
        | BaseType::Uint128
        | BaseType::Float128
        | BaseType::Enum
        | BaseType::Class
        | BaseType::Void => Err(IrError::UnsupportedLiteral { ty }),
        BaseType::Bool => matches!(literal, Literal::Bool(_))
            .then_some(())
            .ok_or_else(mismatch),
        BaseType::Char => matches!(literal, Literal::Char(_))
            .then_some(())
            .ok_or_else(mismatch),
        BaseType::Char16 => matches!(literal, Literal::Char16(_))
            .then_some(())
            .ok_or_else(mismatch),
        BaseType::Char32 => matches!(literal, Literal::Char32(_))
            .then_some(())
            .ok_or_else(mismatch),
        BaseType::Float32 | BaseType::Float64 => matches!(literal, Literal::Float(_))
            .then_some(())
            .ok_or_else(mismatch),
        BaseType::OwnedString => matches!(literal, Literal::String(_))
            .then_some(())
            .ok_or_else(mismatch),
        BaseType::Int8 | BaseType::Int16 | BaseType::Int32 | BaseType::Int64 => {
            let Literal::Int(i) = literal else {
                return Err(mismatch());
            };
            let bits = ty.bit_width().unwrap_or(64);
            let min = -(1i128 << (bits - 1));
            let max = (1i128 << (bits - 1)) - 1;
            (min..=max)
                .contains(&i128::from(*i))
                .then_some(())
                .ok_or_else(out_of_range)
        }
        BaseType::Uint8 | BaseType::Uint16 | BaseType::Uint32 | BaseType::Uint64 => {
            let Literal::Uint(u) = literal else {
                return Err(mismatch());
            };
            let bits = ty.bit_width().unwrap_or(64);
            let max = (1u128 << bits) - 1;
            (u128::from(*u) <= max)
                .then_some(())
                .ok_or_else(out_of_range)
        }
    }
}
