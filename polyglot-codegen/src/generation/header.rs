//! File banner and generation options.

use polyglot_core::{POLYGLOT_VERSION, format_unix_utc, now_utc};
use polyglot_ir::Language;

use crate::builder::{CodeFragment, Renderable};

/// Environment variable fixing the banner timestamp for reproducible builds.
pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

/// Timestamp written into the banner of generated files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Timestamp {
    /// Current time, unless `SOURCE_DATE_EPOCH` is set.
    #[default]
    Now,
    /// Fixed text, so regeneration is byte-identical.
    Fixed(String),
}

impl Timestamp {
    /// Resolve to the text written in the banner.
    pub fn resolve(&self) -> String {
        match self {
            Timestamp::Fixed(text) => text.clone(),
            Timestamp::Now => std::env::var(SOURCE_DATE_EPOCH)
                .ok()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .map(format_unix_utc)
                .unwrap_or_else(now_utc),
        }
    }
}

/// Options shared by every generator.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub timestamp: Timestamp,
}

impl GenerateOptions {
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// The autogenerated-file notice at the top of every output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub version: &'static str,
    pub timestamp: String,
    pub source: Language,
    pub target: Language,
}

impl Banner {
    pub fn new(source: Language, target: Language, opts: &GenerateOptions) -> Self {
        Self {
            version: POLYGLOT_VERSION,
            timestamp: opts.timestamp.resolve(),
            source,
            target,
        }
    }
}

impl Renderable for Banner {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![
            CodeFragment::comment(
                "*** WARNING: autogenerated file, do not modify. Changes will be overwritten. ***",
            ),
            CodeFragment::comment(format!(
                "Generated by Polyglot version {} at {}.",
                self.version, self.timestamp
            )),
            CodeFragment::comment(format!(
                "This file contains symbols that have been exported from {} into {}.",
                self.source.display_name(),
                self.target.display_name()
            )),
            CodeFragment::blank(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CodeBuilder;

    #[test]
    fn test_fixed_timestamp() {
        let ts = Timestamp::Fixed("2024-01-01 00:00:00 UTC".into());
        assert_eq!(ts.resolve(), "2024-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_now_resolves_to_utc_text() {
        assert!(Timestamp::Now.resolve().ends_with(" UTC"));
    }

    #[test]
    fn test_banner_text() {
        let opts = GenerateOptions::default().with_timestamp(Timestamp::Fixed("T".into()));
        let banner = Banner::new(Language::Cpp, Language::Zig, &opts);

        let mut builder = CodeBuilder::zig();
        builder.emit(&banner);
        let expected = format!(
            "// *** WARNING: autogenerated file, do not modify. Changes will be overwritten. ***\n\
             // Generated by Polyglot version {} at T.\n\
             // This file contains symbols that have been exported from C++ into Zig.\n\n",
            POLYGLOT_VERSION
        );
        assert_eq!(builder.build(), expected);
    }
}
