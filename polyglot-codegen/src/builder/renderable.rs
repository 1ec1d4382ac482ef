//! Renderable trait and CodeFragment for decoupled code generation.
//!
//! Generators produce fragments first and apply them to a [`CodeBuilder`]
//! only once a whole declaration rendered successfully, so a failing
//! declaration never leaves partial text behind.
//!
//! [`CodeBuilder`]: super::CodeBuilder

/// A fragment of generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// A `//` line comment, shared by every supported target.
    Comment(String),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn blank() -> Self {
        Self::Blank
    }

    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: Option<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    pub fn comment(s: impl Into<String>) -> Self {
        Self::Comment(s.into())
    }
}

/// Trait for types that can be rendered to code fragments.
pub trait Renderable {
    /// Convert this node to a sequence of code fragments.
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_fragment_constructors() {
        assert_eq!(
            CodeFragment::line("pub fn f();"),
            CodeFragment::Line("pub fn f();".to_string())
        );
        assert_eq!(CodeFragment::blank(), CodeFragment::Blank);
        assert_eq!(
            CodeFragment::comment("note"),
            CodeFragment::Comment("note".to_string())
        );
    }

    #[test]
    fn test_block_fragment() {
        let block = CodeFragment::block(
            "extern(C++) {",
            vec![CodeFragment::line("void f();")],
            Some("}".to_string()),
        );
        let CodeFragment::Block {
            header,
            body,
            close,
        } = block
        else {
            panic!("expected Block variant");
        };
        assert_eq!(header, "extern(C++) {");
        assert_eq!(body.len(), 1);
        assert_eq!(close.as_deref(), Some("}"));
    }
}
