//! Shared identifier and literal helpers for code generation.

/// Check whether `s` is a C-style identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Turn an arbitrary linkage name into an identifier fragment.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, so MSVC-style names
/// such as `?add@@YAHHH@Z` stay usable as symbol suffixes.
pub fn sanitize_symbol(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Spelling of a control character outside ASCII inside a string literal.
///
/// `\xNN` is a byte in C-family languages and is limited to ASCII in Rust,
/// so these characters always use a code point escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnicodeEscape {
    /// `\u{85}`, as in Rust.
    Braced,
    /// `\u0085`, as in C++ and D.
    Fixed,
}

/// Escape a string for a double-quoted C-family literal (without quotes).
pub fn escape_c_string(s: &str, unicode: UnicodeEscape) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_control() => match unicode {
                UnicodeEscape::Braced => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
                UnicodeEscape::Fixed => out.push_str(&format!("\\u{:04x}", c as u32)),
            },
            c => out.push(c),
        }
    }
    out
}
