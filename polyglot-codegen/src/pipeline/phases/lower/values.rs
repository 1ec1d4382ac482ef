//! Manifest literals to IR values.

use polyglot_ir::{BaseType, IrError, Literal, QualifiedType, Value};
use polyglot_manifest::ValueSpec;

/// Why a manifest value could not become a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub(super) enum ValueError {
    /// The front-end recorded an expression it could not fold.
    NotConstant(String),
    /// The literal has no encoding for the declared type.
    Unencodable(IrError),
}

/// Convert a literal, tagging it with the declared type.
pub(super) fn lower_value(spec: &ValueSpec, ty: BaseType) -> Result<Value, ValueError> {
    let literal = match spec {
        ValueSpec::Expr { expr } => return Err(ValueError::NotConstant(expr.clone())),
        ValueSpec::Bool(b) => Literal::Bool(*b),
        ValueSpec::Float(x) => Literal::Float(*x),
        ValueSpec::Int(i) => integer_literal(*i, ty).map_err(ValueError::Unencodable)?,
        ValueSpec::Str(s) => string_literal(s, ty),
    };
    Value::new(ty, literal).map_err(ValueError::Unencodable)
}

/// Kind used to encode enumerator values.
///
/// Values follow the tag width, `int32` by default. 128-bit tags have no
/// literal encoding, so their enumerators are stored at 64 bits and the
/// generators decide whether the tag itself is representable.
pub(super) fn enumerator_kind(tag: Option<&QualifiedType>) -> BaseType {
    match tag.map(|t| t.base) {
        None => BaseType::Int32,
        Some(BaseType::Int128) => BaseType::Int64,
        Some(BaseType::Uint128) => BaseType::Uint64,
        Some(base) => base,
    }
}

fn integer_literal(i: i64, ty: BaseType) -> Result<Literal, IrError> {
    let out_of_range = || IrError::LiteralOutOfRange {
        ty,
        value: i.to_string(),
    };
    let literal = match ty {
        t if t.is_unsigned_integer() => Literal::Uint(u64::try_from(i).map_err(|_| out_of_range())?),
        t if t.is_float() => Literal::Float(i as f64),
        BaseType::Char => Literal::Char(i8::try_from(i).map_err(|_| out_of_range())?),
        BaseType::Char16 => Literal::Char16(u16::try_from(i).map_err(|_| out_of_range())?),
        BaseType::Char32 => Literal::Char32(u32::try_from(i).map_err(|_| out_of_range())?),
        _ => Literal::Int(i),
    };
    Ok(literal)
}

/// A one-character string for a character type is that character's code.
fn string_literal(s: &str, ty: BaseType) -> Literal {
    let mut chars = s.chars();
    let single = match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    };
    match (ty, single) {
        (BaseType::Char, Some(c)) if c.is_ascii() => Literal::Char(c as u8 as i8),
        (BaseType::Char16, Some(c)) if u16::try_from(u32::from(c)).is_ok() => {
            Literal::Char16(u32::from(c) as u16)
        }
        (BaseType::Char32, Some(c)) => Literal::Char32(u32::from(c)),
        _ => Literal::String(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_integers_follow_declared_type() {
        let v = lower_value(&ValueSpec::Int(-3), BaseType::Int16).unwrap();
        assert_eq!(v.literal(), &Literal::Int(-3));
        assert_eq!(v.ty(), BaseType::Int16);

        let v = lower_value(&ValueSpec::Int(7), BaseType::Uint8).unwrap();
        assert_eq!(v.literal(), &Literal::Uint(7));

        let v = lower_value(&ValueSpec::Int(2), BaseType::Float64).unwrap();
        assert_eq!(v.literal(), &Literal::Float(2.0));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            lower_value(&ValueSpec::Int(-1), BaseType::Uint32).unwrap_err(),
            ValueError::Unencodable(IrError::LiteralOutOfRange {
                ty: BaseType::Uint32,
                value: "-1".into(),
            })
        );
        assert!(matches!(
            lower_value(&ValueSpec::Int(300), BaseType::Int8),
            Err(ValueError::Unencodable(IrError::LiteralOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_mismatch_and_expressions() {
        assert!(matches!(
            lower_value(&ValueSpec::Str("hi".into()), BaseType::Int32),
            Err(ValueError::Unencodable(IrError::LiteralMismatch { .. }))
        ));
        assert_eq!(
            lower_value(
                &ValueSpec::Expr {
                    expr: "rand()".into()
                },
                BaseType::Int32
            )
            .unwrap_err(),
            ValueError::NotConstant("rand()".into())
        );
    }

    #[test]
    fn test_character_literals() {
        let v = lower_value(&ValueSpec::Str("a".into()), BaseType::Char).unwrap();
        assert_eq!(v.literal(), &Literal::Char(97));
        let v = lower_value(&ValueSpec::Str("☺".into()), BaseType::Char16).unwrap();
        assert_eq!(v.literal(), &Literal::Char16(0x263a));
        let v = lower_value(&ValueSpec::Str("hello".into()), BaseType::OwnedString).unwrap();
        assert_eq!(v.literal(), &Literal::String("hello".into()));
    }

    #[test]
    fn test_enumerator_kind() {
        assert_eq!(enumerator_kind(None), BaseType::Int32);
        let tag = QualifiedType::new(BaseType::Uint8);
        assert_eq!(enumerator_kind(Some(&tag)), BaseType::Uint8);
        let tag = QualifiedType::new(BaseType::Int128);
        assert_eq!(enumerator_kind(Some(&tag)), BaseType::Int64);
    }
}
