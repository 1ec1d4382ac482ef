//! Rust struct builder.

use polyglot_codegen::builder::{CodeFragment, Renderable};

/// A public field in a Rust struct.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Builder for Rust structs.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    attrs: Vec<String>,
    fields: Vec<Field>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self
            .attrs
            .iter()
            .map(|attr| CodeFragment::line(format!("#[{}]", attr)))
            .collect();

        if self.fields.is_empty() {
            fragments.push(CodeFragment::line(format!("pub struct {} {{}}", self.name)));
        } else {
            fragments.push(CodeFragment::block(
                format!("pub struct {} {{", self.name),
                self.fields
                    .iter()
                    .map(|f| CodeFragment::line(format!("pub {}: {},", f.name, f.ty)))
                    .collect(),
                Some("}".to_string()),
            ));
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use polyglot_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_struct_with_fields() {
        let s = Struct::new("Point")
            .attr("repr(C)")
            .field(Field::new("x", "f64"))
            .field(Field::new("y", "f64"));
        let mut builder = CodeBuilder::rust();
        builder.emit(&s);
        assert_eq!(
            builder.build(),
            "#[repr(C)]\npub struct Point {\n    pub x: f64,\n    pub y: f64,\n}\n"
        );
    }

    #[test]
    fn test_empty_struct() {
        let mut builder = CodeBuilder::rust();
        builder.emit(&Struct::new("Opaque").attr("repr(C)"));
        assert_eq!(builder.build(), "#[repr(C)]\npub struct Opaque {}\n");
    }
}
