//! Zig-specific naming conventions.

use polyglot_codegen::language::NamingConvention;

/// `@"name"`, Zig's syntax for identifiers that are not plain words.
pub fn quoted(name: &str) -> String {
    format!("@\"{}\"", name)
}

/// Zig naming conventions.
///
/// Primitive type names and literals are included; shadowing them is a
/// compile error.
pub const ZIG_NAMING: NamingConvention = NamingConvention {
    reserved_words: &[
        "addrspace", "align", "allowzero", "and", "anyframe", "anytype", "asm", "async",
        "await", "break", "callconv", "catch", "comptime", "const", "continue", "defer", "else",
        "enum", "errdefer", "error", "export", "extern", "fn", "for", "if", "inline",
        "linksection", "noalias", "noinline", "nosuspend", "opaque", "or", "orelse", "packed",
        "pub", "resume", "return", "struct", "suspend", "switch", "test", "threadlocal", "try",
        "union", "unreachable", "usingnamespace", "var", "volatile", "while",
        // primitives
        "anyerror", "anyopaque", "bool", "f16", "f32", "f64", "f80", "f128", "false", "i8",
        "i16", "i32", "i64", "i128", "isize", "noreturn", "null", "true", "type", "u8", "u16",
        "u32", "u64", "u128", "undefined", "usize", "void",
    ],
    escape_reserved: quoted,
};
