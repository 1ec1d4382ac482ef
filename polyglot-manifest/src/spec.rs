//! Type and value spellings as written in the manifest.
//!
//! Spellings are kept verbatim here; resolving them to IR types happens
//! when declarations are lowered.

use serde::Deserialize;

/// A type, either as a bare spelling or as a table with qualifiers.
///
/// ```toml
/// returns = "int32"
/// params = [{ name = "s", type = { base = "string", const = true, reference = true } }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    Name(String),
    Detailed(DetailedType),
}

impl TypeSpec {
    /// The base spelling, e.g. `int32`, `unsigned long` or `enum`.
    pub fn base(&self) -> &str {
        match self {
            TypeSpec::Name(name) => name,
            TypeSpec::Detailed(detail) => &detail.base,
        }
    }

    /// View the spec as a detailed table, filling in defaults for a bare
    /// spelling.
    pub fn detail(&self) -> DetailedType {
        match self {
            TypeSpec::Name(name) => DetailedType {
                base: name.clone(),
                ..DetailedType::default()
            },
            TypeSpec::Detailed(detail) => detail.clone(),
        }
    }

    /// True for `enum` and `class` bases, which must name the referenced type.
    pub fn is_named_kind(&self) -> bool {
        matches!(self.base(), "enum" | "class" | "struct")
    }
}

impl Default for TypeSpec {
    fn default() -> Self {
        TypeSpec::Name("void".to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedType {
    pub base: String,
    /// Referenced type name for `enum` and `class` bases.
    #[serde(default)]
    pub name: Option<String>,
    /// Explicit bit width for platform-dependent integer spellings.
    #[serde(default)]
    pub bits: Option<u32>,
    #[serde(default, rename = "const")]
    pub is_const: bool,
    #[serde(default)]
    pub pointer: bool,
    #[serde(default)]
    pub volatile: bool,
    #[serde(default)]
    pub array: bool,
    #[serde(default)]
    pub reference: bool,
    #[serde(default)]
    pub rvalue_reference: bool,
}

/// A default argument, member initializer or enumerator value.
///
/// Literals must already be compile-time constants. Anything the front-end
/// could not fold is recorded as `{ expr = "..." }` and rejected on
/// lowering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Expr { expr: String },
}
