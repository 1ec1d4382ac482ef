//! D-specific naming conventions.

use polyglot_codegen::language::NamingConvention;

/// D has no raw identifiers; the Phobos convention is a trailing underscore.
fn escape_d_reserved(name: &str) -> String {
    format!("{}_", name)
}

/// D naming conventions.
pub const D_NAMING: NamingConvention = NamingConvention {
    reserved_words: &[
        "abstract", "alias", "align", "asm", "assert", "auto", "body", "bool", "break", "byte",
        "case", "cast", "catch", "cdouble", "cent", "cfloat", "char", "class", "const",
        "continue", "creal", "dchar", "debug", "default", "delegate", "delete", "deprecated",
        "do", "double", "else", "enum", "export", "extern", "false", "final", "finally",
        "float", "for", "foreach", "foreach_reverse", "function", "goto", "idouble", "if",
        "ifloat", "immutable", "import", "in", "inout", "int", "interface", "invariant",
        "ireal", "is", "lazy", "long", "macro", "mixin", "module", "new", "nothrow", "null",
        "out", "override", "package", "pragma", "private", "protected", "public", "pure",
        "real", "ref", "return", "scope", "shared", "short", "static", "struct", "super",
        "switch", "synchronized", "template", "this", "throw", "true", "try", "typeid",
        "typeof", "ubyte", "ucent", "uint", "ulong", "union", "unittest", "ushort", "version",
        "void", "wchar", "while", "with",
    ],
    escape_reserved: escape_d_reserved,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d_reserved_words() {
        assert!(D_NAMING.is_reserved("version"));
        assert!(D_NAMING.is_reserved("ref"));
        assert!(!D_NAMING.is_reserved("count"));
    }

    #[test]
    fn test_d_escape_reserved() {
        assert_eq!(D_NAMING.safe_name("module"), "module_");
        assert_eq!(D_NAMING.safe_name("count"), "count");
    }
}
