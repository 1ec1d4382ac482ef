//! Zig type mapper implementation.

use polyglot_codegen::{CodegenError, language::TypeMapper};
use polyglot_ir::{BaseType, Language, Literal, QualifiedType, Value};

/// Zig type mapper implementation.
///
/// Pointers and arrays become C pointers (`[*c]T`), which are nullable and
/// allow arithmetic like their C++ counterparts. Zig has no references, so
/// reference-qualified types are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZigTypeMapper;

impl TypeMapper for ZigTypeMapper {
    fn target(&self) -> Language {
        Language::Zig
    }

    fn map_base(&self, base: BaseType) -> Option<&'static str> {
        let text = match base {
            BaseType::Void => "anyopaque",
            BaseType::Bool => "bool",
            BaseType::Char => "u8",
            BaseType::Char16 => "u16",
            BaseType::Char32 => "u32",
            BaseType::Int8 => "i8",
            BaseType::Int16 => "i16",
            BaseType::Int32 => "i32",
            BaseType::Int64 => "i64",
            BaseType::Int128 => "i128",
            BaseType::Uint8 => "u8",
            BaseType::Uint16 => "u16",
            BaseType::Uint32 => "u32",
            BaseType::Uint64 => "u64",
            BaseType::Uint128 => "u128",
            BaseType::Float32 => "f32",
            BaseType::Float64 => "f64",
            BaseType::Float128 => "f128",
            BaseType::Enum | BaseType::Class | BaseType::OwnedString => return None,
        };
        Some(text)
    }

    fn qualify(&self, base: String, ty: &QualifiedType) -> Result<String, CodegenError> {
        if ty.is_reference {
            return Err(self.unsupported_qualifier("reference", ty));
        }
        if ty.is_rvalue_reference {
            return Err(self.unsupported_qualifier("rvalue reference", ty));
        }

        let points = ty.is_pointer || ty.is_array;
        if !points {
            if ty.is_volatile {
                return Err(self.unsupported_qualifier("volatile", ty));
            }
            if ty.is_void() {
                return Err(self.unsupported_type(ty));
            }
            return Ok(base);
        }

        let mut pointee = String::new();
        if ty.is_const {
            pointee.push_str("const ");
        }
        if ty.is_volatile {
            pointee.push_str("volatile ");
        }
        pointee.push_str(&base);

        // C pointers cannot point to opaque types.
        if ty.is_void() {
            return Ok(format!("?*{}", pointee));
        }
        Ok(format!("[*c]{}", pointee))
    }
}

impl ZigTypeMapper {
    /// Render a literal in Zig syntax.
    ///
    /// `char` maps to `u8`, so narrow character literals are written as
    /// their unsigned byte. Strings use Zig escapes, which lack `\0`.
    pub fn literal(&self, value: &Value) -> Result<String, CodegenError> {
        match value.literal() {
            Literal::Char(c) => Ok((*c as u8).to_string()),
            Literal::String(s) => Ok(string_literal(s)),
            _ => self.render_value(value),
        }
    }
}

/// A double-quoted Zig string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
