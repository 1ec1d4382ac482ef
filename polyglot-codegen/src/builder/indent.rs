//! Indentation of generated sources.

use polyglot_ir::Language;

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Indent {
    /// The default of each language's standard formatter, so generated
    /// files survive a format pass unchanged.
    pub fn of(language: Language) -> Self {
        match language {
            Language::Go => Self::Tab,
            Language::Nim | Language::OCaml | Language::Pascal => Self::Spaces(2),
            Language::Cpp
            | Language::D
            | Language::Rust
            | Language::Swift
            | Language::V
            | Language::Vala
            | Language::Zig => Self::Spaces(4),
        }
    }

    /// Append `depth` levels to `buf`.
    pub fn write(self, buf: &mut String, depth: usize) {
        match self {
            Self::Tab => buf.extend(std::iter::repeat_n('\t', depth)),
            Self::Spaces(width) => buf.extend(std::iter::repeat_n(' ', depth * width as usize)),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(indent: Indent, depth: usize) -> String {
        let mut buf = String::new();
        indent.write(&mut buf, depth);
        buf
    }

    #[test]
    fn test_write_levels() {
        assert_eq!(levels(Indent::Spaces(4), 2), "        ");
        assert_eq!(levels(Indent::Spaces(3), 1), "   ");
        assert_eq!(levels(Indent::Tab, 2), "\t\t");
        assert_eq!(levels(Indent::Spaces(2), 0), "");
    }

    #[test]
    fn test_binding_targets_use_four_spaces() {
        for target in [Language::Rust, Language::Zig, Language::D, Language::Cpp] {
            assert_eq!(Indent::of(target), Indent::Spaces(4), "{target}");
        }
        assert_eq!(Indent::of(Language::Go), Indent::Tab);
    }
}
