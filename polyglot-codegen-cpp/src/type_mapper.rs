//! C++ type mapper implementation.

use polyglot_codegen::{CodegenError, language::TypeMapper};
use polyglot_ir::{BaseType, Language, QualifiedType};

/// Spells IR types the way the proxied C++ source declares them.
///
/// Fixed-width kinds use the `<cstdint>` aliases. 128-bit integers have no
/// portable spelling and are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct CppTypeMapper;

impl TypeMapper for CppTypeMapper {
    fn target(&self) -> Language {
        Language::Cpp
    }

    fn map_base(&self, base: BaseType) -> Option<&'static str> {
        let text = match base {
            BaseType::Void => "void",
            BaseType::Bool => "bool",
            BaseType::Char => "char",
            BaseType::Char16 => "char16_t",
            BaseType::Char32 => "char32_t",
            BaseType::Int8 => "int8_t",
            BaseType::Int16 => "int16_t",
            BaseType::Int32 => "int32_t",
            BaseType::Int64 => "int64_t",
            BaseType::Uint8 => "uint8_t",
            BaseType::Uint16 => "uint16_t",
            BaseType::Uint32 => "uint32_t",
            BaseType::Uint64 => "uint64_t",
            BaseType::Float32 => "float",
            BaseType::Float64 => "double",
            BaseType::Float128 => "long double",
            BaseType::OwnedString => "std::string",
            BaseType::Int128 | BaseType::Uint128 | BaseType::Enum | BaseType::Class => {
                return None;
            }
        };
        Some(text)
    }

    fn qualify(&self, base: String, ty: &QualifiedType) -> Result<String, CodegenError> {
        let mut text = String::new();
        if ty.is_const {
            text.push_str("const ");
        }
        if ty.is_volatile {
            text.push_str("volatile ");
        }
        text.push_str(&base);
        // Array parameters decay, so both spell a pointer.
        if ty.is_pointer || ty.is_array {
            text.push_str(" *");
        }
        if ty.is_reference {
            text.push_str(" &");
        } else if ty.is_rvalue_reference {
            text.push_str(" &&");
        }
        Ok(text)
    }
}

/// Join a rendered type and a name, attaching the name to a trailing
/// `*` or `&`.
pub(crate) fn declarator(ty: &str, name: &str) -> String {
    if ty.ends_with('*') || ty.ends_with('&') {
        format!("{}{}", ty, name)
    } else {
        format!("{} {}", ty, name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(ty: QualifiedType) -> String {
        CppTypeMapper.render_type(&ty).unwrap()
    }

    #[test]
    fn test_fixed_width_aliases() {
        assert_eq!(render(QualifiedType::new(BaseType::Int32)), "int32_t");
        assert_eq!(render(QualifiedType::new(BaseType::Uint8)), "uint8_t");
        assert_eq!(render(QualifiedType::new(BaseType::Char16)), "char16_t");
        assert_eq!(render(QualifiedType::new(BaseType::Float128)), "long double");
    }

    #[test]
    fn test_qualifiers() {
        assert_eq!(
            render(QualifiedType::string().constant().reference()),
            "const std::string &"
        );
        assert_eq!(render(QualifiedType::string().rvalue_reference()), "std::string &&");
        assert_eq!(
            render(QualifiedType::new(BaseType::Char).constant().pointer()),
            "const char *"
        );
        assert_eq!(render(QualifiedType::new(BaseType::Int16).array()), "int16_t *");
        assert_eq!(
            render(QualifiedType::class_ref("Widget").volatile().pointer()),
            "volatile Widget *"
        );
    }

    #[test]
    fn test_wide_integers_are_rejected() {
        for base in [BaseType::Int128, BaseType::Uint128] {
            let err = CppTypeMapper
                .render_type(&QualifiedType::new(base))
                .unwrap_err();
            assert!(err.is_recoverable());
            assert!(err.to_string().ends_with("is not supported by C++"), "{err}");
        }
    }

    #[test]
    fn test_declarator_spacing() {
        assert_eq!(declarator("const char *", "s"), "const char *s");
        assert_eq!(declarator("std::string &", "s"), "std::string &s");
        assert_eq!(declarator("int32_t", "n"), "int32_t n");
    }
}
