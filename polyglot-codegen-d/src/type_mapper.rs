//! D type mapper implementation.

use polyglot_codegen::{CodegenError, language::TypeMapper};
use polyglot_core::{UnicodeEscape, escape_c_string};
use polyglot_ir::{BaseType, Language, Literal, QualifiedType, Value};

/// D type mapper implementation.
///
/// D lacks 128-bit integers and a quad-precision float (`real` is the
/// 80-bit x87 type on most platforms), so those kinds are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct DTypeMapper;

impl TypeMapper for DTypeMapper {
    fn target(&self) -> Language {
        Language::D
    }

    fn map_base(&self, base: BaseType) -> Option<&'static str> {
        let text = match base {
            BaseType::Void => "void",
            BaseType::Bool => "bool",
            BaseType::Char => "char",
            BaseType::Char16 => "wchar",
            BaseType::Char32 => "dchar",
            BaseType::Int8 => "byte",
            BaseType::Int16 => "short",
            BaseType::Int32 => "int",
            BaseType::Int64 => "long",
            BaseType::Uint8 => "ubyte",
            BaseType::Uint16 => "ushort",
            BaseType::Uint32 => "uint",
            BaseType::Uint64 => "ulong",
            BaseType::Float32 => "float",
            BaseType::Float64 => "double",
            BaseType::Int128
            | BaseType::Uint128
            | BaseType::Float128
            | BaseType::Enum
            | BaseType::Class
            | BaseType::OwnedString => return None,
        };
        Some(text)
    }

    fn qualify(&self, base: String, ty: &QualifiedType) -> Result<String, CodegenError> {
        if ty.is_volatile {
            return Err(self.unsupported_qualifier("volatile", ty));
        }

        let points = ty.is_pointer || ty.is_array;
        let mut text = if ty.is_const && (points || ty.is_reference) {
            format!("const({})", base)
        } else {
            base
        };
        if points {
            text.push('*');
        } else if ty.is_void() {
            return Err(self.unsupported_type(ty));
        }
        // Both reference kinds pass an address; `pragma(mangle)` keeps the
        // symbol independent of how D would mangle them.
        if ty.is_reference || ty.is_rvalue_reference {
            text = format!("ref {}", text);
        }
        Ok(text)
    }
}

impl DTypeMapper {
    /// Render a struct field. D fields cannot be `ref`, so references
    /// become pointers, which share their layout.
    pub fn render_field(&self, ty: &QualifiedType) -> Result<String, CodegenError> {
        if !ty.is_reference && !ty.is_rvalue_reference {
            return self.render_type(ty);
        }
        let mut pointee = ty.clone();
        pointee.is_reference = false;
        pointee.is_rvalue_reference = false;
        let text = self.render_type(&pointee)?;
        if ty.is_const && !(ty.is_pointer || ty.is_array) {
            return Ok(format!("const({})*", text));
        }
        Ok(format!("{}*", text))
    }

    /// Render a literal in D syntax.
    ///
    /// `char` is unsigned in D, and unsigned values past `long.max` need
    /// a `UL` suffix. Strings are valid for `string` parameters and
    /// manifest constants.
    pub fn literal(&self, value: &Value) -> Result<String, CodegenError> {
        match value.literal() {
            Literal::Char(c) => Ok((*c as u8).to_string()),
            Literal::String(s) => Ok(format!(
                "\"{}\"",
                escape_c_string(s, UnicodeEscape::Fixed)
            )),
            Literal::Uint(u) if *u > i64::MAX as u64 => {
                self.render_value(value).map(|text| format!("{}UL", text))
            }
            _ => self.render_value(value),
        }
    }
}
