//! Per-target generator contract.

use std::io;

use polyglot_core::{UnicodeEscape, escape_c_string};
use polyglot_ir::{Ast, BaseType, Language, Literal, QualifiedType, Value};

use crate::{
    CodegenError,
    generation::{GenerateOptions, ModuleOutput},
};

/// A binding generator for one target language.
///
/// Generators hold no per-module state, so one instance can render many
/// modules concurrently.
pub trait BindingCodegen: Send + Sync {
    /// Target language this generator emits.
    fn language(&self) -> Language;

    /// File extension for generated source files (e.g., "rs", "zig", "d").
    fn file_extension(&self) -> &'static str;

    /// Render a qualified type in target syntax.
    fn type_to_text(&self, ty: &QualifiedType) -> Result<String, CodegenError>;

    /// Render a literal value in target syntax.
    fn value_to_text(&self, value: &Value) -> Result<String, CodegenError>;

    /// Render a whole module.
    fn render(&self, ast: &Ast, opts: &GenerateOptions) -> Result<ModuleOutput, CodegenError>;

    /// Render a module into a sink.
    ///
    /// Nothing is written when rendering fails.
    fn write(
        &self,
        ast: &Ast,
        opts: &GenerateOptions,
        sink: &mut dyn io::Write,
    ) -> Result<ModuleOutput, CodegenError> {
        let output = self.render(ast, opts)?;
        sink.write_all(output.content.as_bytes())
            .map_err(|source| CodegenError::Io {
                target: self.language(),
                source,
            })?;
        Ok(output)
    }

    /// Name of the file generated for a module.
    fn file_name(&self, module_name: &str) -> String {
        format!("{}.{}", module_name, self.file_extension())
    }
}

/// Table-driven type and literal rendering shared by the backends.
///
/// Backends supply the primitive table and the qualifier syntax; the
/// default methods resolve names, reject unsupported kinds and render
/// literals.
pub trait TypeMapper {
    /// The target language.
    fn target(&self) -> Language;

    /// Spelling of a primitive kind, or `None` when the target lacks it.
    fn map_base(&self, base: BaseType) -> Option<&'static str>;

    /// Wrap an already rendered base spelling in the target's qualifier
    /// syntax.
    fn qualify(&self, base: String, ty: &QualifiedType) -> Result<String, CodegenError>;

    /// Base spelling of a type, ignoring qualifiers.
    ///
    /// Enum and class kinds render as their name; a missing name is a
    /// representation error.
    fn base_text(&self, ty: &QualifiedType) -> Result<String, CodegenError> {
        if let Some(name) = ty.reference_name()? {
            return Ok(name.to_string());
        }
        self.map_base(ty.base)
            .map(str::to_string)
            .ok_or_else(|| self.unsupported_type(ty))
    }

    fn render_type(&self, ty: &QualifiedType) -> Result<String, CodegenError> {
        let base = self.base_text(ty)?;
        self.qualify(base, ty)
    }

    /// Render a literal.
    ///
    /// Integers are written in decimal, floats always carry a fractional
    /// part and strings use C escapes. Values whose kind the target lacks
    /// fail instead of being narrowed.
    fn render_value(&self, value: &Value) -> Result<String, CodegenError> {
        if self.map_base(value.ty()).is_none() {
            return Err(self.unsupported_value(value));
        }
        let text = match value.literal() {
            Literal::Bool(b) => b.to_string(),
            Literal::Char(c) => c.to_string(),
            Literal::Char16(c) => c.to_string(),
            Literal::Char32(c) => c.to_string(),
            Literal::Int(i) => i.to_string(),
            Literal::Uint(u) => u.to_string(),
            Literal::Float(x) if x.is_finite() => format!("{:?}", x),
            Literal::Float(_) => return Err(self.unsupported_value(value)),
            Literal::String(s) => format!("\"{}\"", escape_c_string(s, UnicodeEscape::Fixed)),
        };
        Ok(text)
    }

    /// Spelling of an enum's underlying type, or `None` when the enum
    /// declares none and the target default applies.
    ///
    /// Tags must be unqualified integer or character kinds. 128-bit tags are
    /// rejected even where the target has the width, since no target accepts
    /// them as an enum representation.
    fn render_enum_tag(
        &self,
        tag: Option<&QualifiedType>,
    ) -> Result<Option<&'static str>, CodegenError> {
        let Some(tag) = tag else {
            return Ok(None);
        };
        let integral = tag.base.is_integer()
            || matches!(tag.base, BaseType::Char | BaseType::Char16 | BaseType::Char32);
        if !integral || tag.base.bit_width() == Some(128) || tag.is_indirect() || tag.is_volatile
        {
            return Err(self.unsupported_type(tag));
        }
        self.map_base(tag.base)
            .map(Some)
            .ok_or_else(|| self.unsupported_type(tag))
    }

    fn unsupported_type(&self, ty: &QualifiedType) -> CodegenError {
        CodegenError::UnsupportedType {
            ty: ty.to_string(),
            target: self.target(),
        }
    }

    fn unsupported_qualifier(&self, qualifier: &'static str, ty: &QualifiedType) -> CodegenError {
        CodegenError::UnsupportedQualifier {
            qualifier,
            ty: ty.to_string(),
            target: self.target(),
        }
    }

    fn unsupported_value(&self, value: &Value) -> CodegenError {
        CodegenError::UnsupportedValue {
            ty: value.ty(),
            value: value.to_string(),
            target: self.target(),
        }
    }
}

#[cfg(test)]
mod tests {
    use polyglot_ir::IrError;

    use super::*;

    /// A mapper with C-like spellings and no 128-bit support.
    struct CLike;

    impl TypeMapper for CLike {
        fn target(&self) -> Language {
            Language::Cpp
        }

        fn map_base(&self, base: BaseType) -> Option<&'static str> {
            match base {
                BaseType::Int32 => Some("int"),
                BaseType::Float64 => Some("double"),
                BaseType::Bool => Some("bool"),
                BaseType::OwnedString => Some("string"),
                _ => None,
            }
        }

        fn qualify(&self, base: String, ty: &QualifiedType) -> Result<String, CodegenError> {
            if ty.is_reference {
                return Err(self.unsupported_qualifier("reference", ty));
            }
            Ok(if ty.is_pointer { format!("{}*", base) } else { base })
        }
    }

    #[test]
    fn test_render_type_uses_table_and_qualifiers() {
        let ty = QualifiedType::new(BaseType::Int32).pointer();
        assert_eq!(CLike.render_type(&ty).unwrap(), "int*");
    }

    #[test]
    fn test_named_types_render_their_name() {
        let ty = QualifiedType::class_ref("Widget").pointer();
        assert_eq!(CLike.render_type(&ty).unwrap(), "Widget*");
    }

    #[test]
    fn test_missing_name_is_integrity_error() {
        let ty = QualifiedType::new(BaseType::Enum);
        let err = CLike.render_type(&ty).unwrap_err();
        assert!(matches!(err, CodegenError::MissingTypeName { .. }));
    }

    #[test]
    fn test_unsupported_base_names_type_and_target() {
        let ty = QualifiedType::new(BaseType::Int128);
        let err = CLike.render_type(&ty).unwrap_err();
        assert_eq!(err.to_string(), "type 'int128' is not supported by C++");
    }

    #[test]
    fn test_unsupported_qualifier() {
        let ty = QualifiedType::new(BaseType::Int32).reference();
        let err = CLike.render_type(&ty).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnsupportedQualifier {
                qualifier: "reference",
                ..
            }
        ));
    }

    #[test]
    fn test_render_values() {
        assert_eq!(CLike.render_value(&Value::bool(true)).unwrap(), "true");
        assert_eq!(CLike.render_value(&Value::float(1.0)).unwrap(), "1.0");
        assert_eq!(
            CLike.render_value(&Value::string("a\"b")).unwrap(),
            "\"a\\\"b\""
        );
        let int32 = Value::new(BaseType::Int32, Literal::Int(-7)).unwrap();
        assert_eq!(CLike.render_value(&int32).unwrap(), "-7");
    }

    #[test]
    fn test_value_of_missing_kind_fails() {
        let err = CLike.render_value(&Value::int(1)).unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedValue { .. }));
        assert!(CLike.render_value(&Value::float(f64::NAN)).is_err());
    }

    #[test]
    fn test_enum_tags() {
        assert_eq!(CLike.render_enum_tag(None).unwrap(), None);
        let tag = QualifiedType::new(BaseType::Int32);
        assert_eq!(CLike.render_enum_tag(Some(&tag)).unwrap(), Some("int"));
        for tag in [
            QualifiedType::new(BaseType::Int128),
            QualifiedType::new(BaseType::Float64),
            QualifiedType::new(BaseType::Int32).pointer(),
        ] {
            let err = CLike.render_enum_tag(Some(&tag)).unwrap_err();
            assert!(err.is_recoverable(), "{tag}");
        }
    }

    #[test]
    fn test_values_without_encoding_never_exist() {
        assert_eq!(
            Value::new(BaseType::Int128, Literal::Int(1)),
            Err(IrError::UnsupportedLiteral {
                ty: BaseType::Int128
            })
        );
    }
}
