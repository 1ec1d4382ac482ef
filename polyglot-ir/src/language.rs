//! Source and target languages.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Languages known to Polyglot.
///
/// Every language can be named as a source; only a subset has a binding
/// generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    D,
    Rust,
    Swift,
    Go,
    Nim,
    #[serde(rename = "ocaml")]
    OCaml,
    Pascal,
    V,
    Vala,
    Zig,
}

impl Language {
    pub const ALL: [Language; 11] = [
        Language::Cpp,
        Language::D,
        Language::Rust,
        Language::Swift,
        Language::Go,
        Language::Nim,
        Language::OCaml,
        Language::Pascal,
        Language::V,
        Language::Vala,
        Language::Zig,
    ];

    /// Returns the language identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::D => "d",
            Language::Rust => "rust",
            Language::Swift => "swift",
            Language::Go => "go",
            Language::Nim => "nim",
            Language::OCaml => "ocaml",
            Language::Pascal => "pascal",
            Language::V => "v",
            Language::Vala => "vala",
            Language::Zig => "zig",
        }
    }

    /// Human-readable name, as printed in generated file banners.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::D => "D",
            Language::Rust => "Rust",
            Language::Swift => "Swift",
            Language::Go => "Go",
            Language::Nim => "Nim",
            Language::OCaml => "OCaml",
            Language::Pascal => "Pascal",
            Language::V => "V",
            Language::Vala => "Vala",
            Language::Zig => "Zig",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
            "d" | "dlang" => Ok(Language::D),
            "rust" | "rs" => Ok(Language::Rust),
            "swift" => Ok(Language::Swift),
            "go" | "golang" => Ok(Language::Go),
            "nim" => Ok(Language::Nim),
            "ocaml" | "ml" => Ok(Language::OCaml),
            "pascal" | "pas" => Ok(Language::Pascal),
            "v" | "vlang" => Ok(Language::V),
            "vala" => Ok(Language::Vala),
            "zig" => Ok(Language::Zig),
            _ => Err(format!("unknown language '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Language::from_str("c++").unwrap(), Language::Cpp);
        assert_eq!(Language::from_str("CPP").unwrap(), Language::Cpp);
        assert_eq!(Language::from_str("rs").unwrap(), Language::Rust);
        assert_eq!(Language::from_str("zig").unwrap(), Language::Zig);
        assert!(Language::from_str("cobol").is_err());
    }

    #[test]
    fn test_as_str_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_str(lang.as_str()).unwrap(), lang);
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Language::Cpp.display_name(), "C++");
        assert_eq!(Language::OCaml.display_name(), "OCaml");
        assert_eq!(Language::D.to_string(), "d");
    }

    #[test]
    fn test_deserialize() {
        let lang: Language = serde_json::from_str(r#""ocaml""#).unwrap();
        assert_eq!(lang, Language::OCaml);
        let lang: Language = serde_json::from_str(r#""cpp""#).unwrap();
        assert_eq!(lang, Language::Cpp);
    }
}
