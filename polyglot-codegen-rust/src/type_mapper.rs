//! Rust type mapper implementation.

use polyglot_codegen::{CodegenError, language::TypeMapper};
use polyglot_ir::{BaseType, Language, QualifiedType};

/// Rust type mapper implementation.
///
/// Pointers and arrays become raw pointers, references become `&T` or
/// `&mut T`. Owned strings have no direct spelling; they only cross the
/// boundary through proxies.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper;

fn raw_pointer(is_const: bool) -> &'static str {
    if is_const { "*const" } else { "*mut" }
}

impl TypeMapper for RustTypeMapper {
    fn target(&self) -> Language {
        Language::Rust
    }

    fn map_base(&self, base: BaseType) -> Option<&'static str> {
        let text = match base {
            BaseType::Void => "std::ffi::c_void",
            BaseType::Bool => "bool",
            BaseType::Char => "i8",
            BaseType::Char16 => "u16",
            // `char` must hold a valid scalar value, which foreign code
            // does not guarantee.
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
            BaseType::Float128 | BaseType::Enum | BaseType::Class | BaseType::OwnedString => {
                return None;
            }
        };
        Some(text)
    }

    fn qualify(&self, base: String, ty: &QualifiedType) -> Result<String, CodegenError> {
        if ty.is_volatile {
            return Err(self.unsupported_qualifier("volatile", ty));
        }
        if ty.is_void() {
            return Err(self.unsupported_type(ty));
        }

        let points = ty.is_pointer || ty.is_array;
        let mut text = base;
        if points {
            text = format!("{} {}", raw_pointer(ty.is_const), text);
        }
        if ty.is_reference {
            text = if ty.is_const && !points {
                format!("&{}", text)
            } else {
                format!("&mut {}", text)
            };
        } else if ty.is_rvalue_reference {
            text = format!("{} {}", raw_pointer(ty.is_const && !points), text);
        }
        Ok(text)
    }
}

impl RustTypeMapper {
    /// Render a type where a borrow has no lifetime to attach to, such as a
    /// return value or a struct field. References become raw pointers.
    pub fn render_unborrowed(&self, ty: &QualifiedType) -> Result<String, CodegenError> {
        if !ty.is_reference && !ty.is_rvalue_reference {
            return self.render_type(ty);
        }
        let mut pointee = ty.clone();
        pointee.is_reference = false;
        pointee.is_rvalue_reference = false;
        let points = ty.is_pointer || ty.is_array;
        let text = self.render_type(&pointee)?;
        Ok(format!("{} {}", raw_pointer(ty.is_const && !points), text))
    }
}
