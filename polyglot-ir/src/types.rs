//! Primitive kinds and qualified types.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::IrError;

/// Primitive kind of a type, independent of any qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseType {
    Void,
    Bool,
    Char,
    Char16,
    Char32,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint128,
    Float32,
    Float64,
    Float128,
    /// Reference to a user-defined enum; the name lives on [`QualifiedType`].
    Enum,
    /// Reference to a user-defined class or struct.
    Class,
    /// An owned, heap-allocated string (e.g. `std::string`).
    OwnedString,
}

impl BaseType {
    /// Every primitive kind, in declaration order.
    pub const ALL: [BaseType; 21] = [
        BaseType::Void,
        BaseType::Bool,
        BaseType::Char,
        BaseType::Char16,
        BaseType::Char32,
        BaseType::Int8,
        BaseType::Int16,
        BaseType::Int32,
        BaseType::Int64,
        BaseType::Int128,
        BaseType::Uint8,
        BaseType::Uint16,
        BaseType::Uint32,
        BaseType::Uint64,
        BaseType::Uint128,
        BaseType::Float32,
        BaseType::Float64,
        BaseType::Float128,
        BaseType::Enum,
        BaseType::Class,
        BaseType::OwnedString,
    ];

    /// Canonical spelling used in manifests and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::Void => "void",
            BaseType::Bool => "bool",
            BaseType::Char => "char",
            BaseType::Char16 => "char16",
            BaseType::Char32 => "char32",
            BaseType::Int8 => "int8",
            BaseType::Int16 => "int16",
            BaseType::Int32 => "int32",
            BaseType::Int64 => "int64",
            BaseType::Int128 => "int128",
            BaseType::Uint8 => "uint8",
            BaseType::Uint16 => "uint16",
            BaseType::Uint32 => "uint32",
            BaseType::Uint64 => "uint64",
            BaseType::Uint128 => "uint128",
            BaseType::Float32 => "float32",
            BaseType::Float64 => "float64",
            BaseType::Float128 => "float128",
            BaseType::Enum => "enum",
            BaseType::Class => "class",
            BaseType::OwnedString => "string",
        }
    }

    pub fn is_integer(&self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(
            self,
            BaseType::Int8 | BaseType::Int16 | BaseType::Int32 | BaseType::Int64 | BaseType::Int128
        )
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(
            self,
            BaseType::Uint8
                | BaseType::Uint16
                | BaseType::Uint32
                | BaseType::Uint64
                | BaseType::Uint128
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(
            self,
            BaseType::Float32 | BaseType::Float64 | BaseType::Float128
        )
    }

    /// Enum and class kinds must carry the name of the referenced type.
    pub fn is_named(&self) -> bool {
        matches!(self, BaseType::Enum | BaseType::Class)
    }

    /// Width in bits for integer, character and floating point kinds.
    pub fn bit_width(&self) -> Option<u32> {
        match self {
            BaseType::Bool | BaseType::Char | BaseType::Int8 | BaseType::Uint8 => Some(8),
            BaseType::Char16 | BaseType::Int16 | BaseType::Uint16 => Some(16),
            BaseType::Char32 | BaseType::Int32 | BaseType::Uint32 | BaseType::Float32 => Some(32),
            BaseType::Int64 | BaseType::Uint64 | BaseType::Float64 => Some(64),
            BaseType::Int128 | BaseType::Uint128 | BaseType::Float128 => Some(128),
            BaseType::Void | BaseType::Enum | BaseType::Class | BaseType::OwnedString => None,
        }
    }

    /// Resolve the fixed-width integer kind for a bit width and signedness.
    pub fn integer(bits: u32, signed: bool) -> Option<Self> {
        let ty = match (bits, signed) {
            (8, true) => BaseType::Int8,
            (16, true) => BaseType::Int16,
            (32, true) => BaseType::Int32,
            (64, true) => BaseType::Int64,
            (128, true) => BaseType::Int128,
            (8, false) => BaseType::Uint8,
            (16, false) => BaseType::Uint16,
            (32, false) => BaseType::Uint32,
            (64, false) => BaseType::Uint64,
            (128, false) => BaseType::Uint128,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BaseType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("unknown base type '{}'", s))
    }
}

/// A primitive kind plus independent qualifier flags.
///
/// `is_const` and `is_volatile` qualify the pointee when the type is a
/// pointer, reference or array; on a plain value they are top-level
/// qualifiers. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QualifiedType {
    pub base: BaseType,
    #[serde(skip_serializing_if = "is_false")]
    pub is_const: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_pointer: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_volatile: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_array: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_reference: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_rvalue_reference: bool,
    /// Name of the referenced user type for enum and class kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl QualifiedType {
    pub fn new(base: BaseType) -> Self {
        Self {
            base,
            is_const: false,
            is_pointer: false,
            is_volatile: false,
            is_array: false,
            is_reference: false,
            is_rvalue_reference: false,
            name: None,
        }
    }

    pub fn void() -> Self {
        Self::new(BaseType::Void)
    }

    pub fn string() -> Self {
        Self::new(BaseType::OwnedString)
    }

    pub fn enum_ref(name: impl Into<String>) -> Self {
        Self::new(BaseType::Enum).named(name)
    }

    pub fn class_ref(name: impl Into<String>) -> Self {
        Self::new(BaseType::Class).named(name)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn constant(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn pointer(mut self) -> Self {
        self.is_pointer = true;
        self
    }

    pub fn volatile(mut self) -> Self {
        self.is_volatile = true;
        self
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn reference(mut self) -> Self {
        self.is_reference = true;
        self
    }

    pub fn rvalue_reference(mut self) -> Self {
        self.is_rvalue_reference = true;
        self
    }

    /// Name of the referenced enum or class.
    ///
    /// Fails when the kind requires a name and none (or an empty one) was
    /// recorded. Kinds that are not named return `Ok(None)`.
    pub fn reference_name(&self) -> Result<Option<&str>, IrError> {
        if !self.base.is_named() {
            return Ok(None);
        }
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => Ok(Some(name)),
            _ => Err(IrError::MissingTypeName { base: self.base }),
        }
    }

    /// True for a pointer, array or either kind of reference.
    pub fn is_indirect(&self) -> bool {
        self.is_pointer || self.is_array || self.is_reference || self.is_rvalue_reference
    }

    /// `void` used as a value (a return type), as opposed to `void *`.
    pub fn is_void(&self) -> bool {
        self.base == BaseType::Void && !self.is_indirect()
    }

    /// An owned string passed or returned by value or by reference.
    ///
    /// Pointers and arrays of strings are raw memory and are not treated as
    /// owned values.
    pub fn is_owned_string(&self) -> bool {
        self.base == BaseType::OwnedString && !self.is_pointer && !self.is_array
    }
}

impl fmt::Display for QualifiedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            f.write_str("const ")?;
        }
        if self.is_volatile {
            f.write_str("volatile ")?;
        }
        match &self.name {
            Some(name) if self.base.is_named() => f.write_str(name)?,
            _ => f.write_str(self.base.as_str())?,
        }
        if self.is_pointer {
            f.write_str(" *")?;
        }
        if self.is_array {
            f.write_str("[]")?;
        }
        if self.is_reference {
            f.write_str(" &")?;
        }
        if self.is_rvalue_reference {
            f.write_str(" &&")?;
        }
        Ok(())
    }
}
