//! Type spellings to qualified types.
//!
//! Fixed-width spellings (`int32_t`, `char16_t`, `double`) and the canonical
//! IR names (`int32`, `float64`) resolve directly. Platform-dependent
//! integer spellings (`int`, `unsigned long`, `size_t`) resolve by an
//! explicit `bits` width or by LP64 defaults, and are flagged so the
//! caller can warn about them.

use polyglot_ir::{BaseType, QualifiedType};
use polyglot_manifest::TypeSpec;

use crate::ConstructionError;

/// Result of resolving one type spelling.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ResolvedType {
    pub ty: QualifiedType,
    /// The width came from the platform data model rather than the
    /// spelling itself.
    pub is_platform_dependent: bool,
}

pub(super) fn resolve_type(
    spec: &TypeSpec,
    declaration: &str,
) -> Result<ResolvedType, ConstructionError> {
    let detail = spec.detail();
    let spelling = detail.base.split_whitespace().collect::<Vec<_>>().join(" ");

    let (base, is_platform_dependent) =
        resolve_base(&spelling, detail.bits).ok_or_else(|| ConstructionError::UnknownType {
            declaration: declaration.to_string(),
            spelling: match detail.bits {
                Some(bits) => format!("{} ({} bits)", spelling, bits),
                None => spelling.clone(),
            },
        })?;

    let mut ty = QualifiedType::new(base);
    if base.is_named() {
        match detail.name {
            Some(name) if !name.is_empty() => ty = ty.named(name),
            _ => {
                return Err(ConstructionError::MissingTypeName {
                    declaration: declaration.to_string(),
                    base,
                });
            }
        }
    }
    ty.is_const = detail.is_const;
    ty.is_pointer = detail.pointer;
    ty.is_volatile = detail.volatile;
    ty.is_array = detail.array;
    ty.is_reference = detail.reference;
    ty.is_rvalue_reference = detail.rvalue_reference;

    Ok(ResolvedType {
        ty,
        is_platform_dependent,
    })
}

fn resolve_base(spelling: &str, bits: Option<u32>) -> Option<(BaseType, bool)> {
    let unqualified = spelling.strip_prefix("std::").unwrap_or(spelling);
    if let Some(base) = fixed_width(unqualified) {
        return Some((base, false));
    }
    if let Ok(base) = unqualified.parse::<BaseType>() {
        return Some((base, false));
    }
    platform_dependent(unqualified, bits).map(|base| (base, true))
}

fn fixed_width(spelling: &str) -> Option<BaseType> {
    let base = match spelling {
        "struct" => BaseType::Class,
        "int8_t" => BaseType::Int8,
        "int16_t" => BaseType::Int16,
        "int32_t" => BaseType::Int32,
        "int64_t" => BaseType::Int64,
        "uint8_t" => BaseType::Uint8,
        "uint16_t" => BaseType::Uint16,
        "uint32_t" => BaseType::Uint32,
        "uint64_t" => BaseType::Uint64,
        "__int128" | "__int128_t" | "signed __int128" => BaseType::Int128,
        "unsigned __int128" | "__uint128_t" => BaseType::Uint128,
        "signed char" => BaseType::Int8,
        "unsigned char" => BaseType::Uint8,
        "char16_t" => BaseType::Char16,
        "char32_t" => BaseType::Char32,
        "float" => BaseType::Float32,
        "double" => BaseType::Float64,
        "long double" => BaseType::Float128,
        _ => return None,
    };
    Some(base)
}

fn platform_dependent(spelling: &str, bits: Option<u32>) -> Option<BaseType> {
    match spelling {
        "wchar_t" => {
            return match bits.unwrap_or(32) {
                16 => Some(BaseType::Char16),
                32 => Some(BaseType::Char32),
                _ => None,
            };
        }
        "size_t" | "uintptr_t" => return BaseType::integer(bits.unwrap_or(64), false),
        "ssize_t" | "ptrdiff_t" | "intptr_t" => return BaseType::integer(bits.unwrap_or(64), true),
        _ => {}
    }

    let mut is_signed = false;
    let mut is_unsigned = false;
    let mut shorts = 0;
    let mut longs = 0;
    let mut ints = 0;
    for word in spelling.split(' ') {
        match word {
            "signed" => is_signed = true,
            "unsigned" => is_unsigned = true,
            "short" => shorts += 1,
            "long" => longs += 1,
            "int" => ints += 1,
            _ => return None,
        }
    }
    if (is_signed && is_unsigned) || ints > 1 {
        return None;
    }

    // LP64
    let default_bits = match (shorts, longs) {
        (0, 0) => 32,
        (1, 0) => 16,
        (0, 1) | (0, 2) => 64,
        _ => return None,
    };
    BaseType::integer(bits.unwrap_or(default_bits), !is_unsigned)
}
