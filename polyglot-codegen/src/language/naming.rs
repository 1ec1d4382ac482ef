//! Reserved-word handling for generated identifiers.
//!
//! Declaration names are kept exactly as the source spells them, so the
//! binding reads like the library it wraps. Only names that collide with a
//! target keyword are rewritten.

use std::collections::HashSet;

/// Language-specific naming rules.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Keywords that cannot be used as identifiers
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "r#type" in Rust)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }
}

/// Local names chosen for a generated function body, kept clear of the
/// function's parameters and of each other.
#[derive(Debug, Clone, Default)]
pub struct LocalNames {
    taken: HashSet<String>,
}

impl LocalNames {
    /// Start with `names` already in use.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Claim `base`, or `base_1`, `base_2`, ... when it is in use.
    pub fn fresh(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut n = 1;
        while self.taken.contains(&name) {
            name = format!("{}_{}", base, n);
            n += 1;
        }
        self.taken.insert(name.clone());
        name
    }
}
