//! Zig container declarations.

use polyglot_codegen::builder::{CodeFragment, Renderable};

/// `pub const Name = <kind> { ... };`
///
/// Zig has no dedicated namespace, struct or enum statement: every
/// container is an anonymous type bound to a constant.
#[derive(Debug, Clone)]
pub struct Container {
    name: String,
    kind: String,
    body: Vec<CodeFragment>,
}

impl Container {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            body: Vec::new(),
        }
    }

    pub fn item(mut self, fragment: CodeFragment) -> Self {
        self.body.push(fragment);
        self
    }

    pub fn items(mut self, fragments: impl IntoIterator<Item = CodeFragment>) -> Self {
        self.body.extend(fragments);
        self
    }

    /// Header line, also used by namespaces whose body is emitted elsewhere.
    pub fn header(&self) -> String {
        format!("pub const {} = {} {{", self.name, self.kind)
    }
}

impl Renderable for Container {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.body.is_empty() {
            return vec![CodeFragment::line(format!(
                "pub const {} = {} {{}};",
                self.name, self.kind
            ))];
        }
        vec![CodeFragment::block(
            self.header(),
            self.body.clone(),
            Some("};".to_string()),
        )]
    }
}

#[cfg(test)]
mod tests {
    use polyglot_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_enum_container() {
        let e = Container::new("Color", "enum(c_int)")
            .item(CodeFragment::line("Red,"))
            .item(CodeFragment::line("Green = 100,"));
        let mut builder = CodeBuilder::zig();
        builder.emit(&e);
        assert_eq!(
            builder.build(),
            "pub const Color = enum(c_int) {\n    Red,\n    Green = 100,\n};\n"
        );
    }

    #[test]
    fn test_empty_container() {
        let mut builder = CodeBuilder::zig();
        builder.emit(&Container::new("Opaque", "extern struct"));
        assert_eq!(builder.build(), "pub const Opaque = extern struct {};\n");
    }
}
