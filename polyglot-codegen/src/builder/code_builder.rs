//! Code builder utility for generating properly indented code.

use polyglot_ir::Language;

use super::{CodeFragment, Indent, Renderable};

/// Accumulates lines of generated code at the current indentation.
///
/// # Example
///
/// ```
/// use polyglot_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::d();
/// builder
///     .push_line("extern(C++) {")
///     .push_indent()
///     .push_line("int add(int a, int b);")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(builder.build(), "extern(C++) {\n    int add(int a, int b);\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    pub fn rust() -> Self {
        Self::new(Indent::of(Language::Rust))
    }

    pub fn zig() -> Self {
        Self::new(Indent::of(Language::Zig))
    }

    pub fn d() -> Self {
        Self::new(Indent::of(Language::D))
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.indent.write(&mut self.buffer, self.indent_level);
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Emit a Renderable node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        self.apply_all(node.to_fragments());
        self
    }

    /// Apply every fragment in order.
    pub fn apply_all(&mut self, fragments: impl IntoIterator<Item = CodeFragment>) {
        for fragment in fragments {
            self.apply_fragment(fragment);
        }
    }

    fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                self.apply_all(body);
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Comment(text) => {
                self.push_line(&format!("// {}", text));
            }
        }
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }
}
