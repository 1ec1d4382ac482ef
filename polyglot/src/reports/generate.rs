//! Generate command report data structures.

use std::path::PathBuf;

use polyglot_codegen::generation::SkippedDeclaration;
use polyglot_ir::Language;

use super::output::{Output, Report};

/// Report data from binding generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Whether files were only previewed.
    pub dry_run: bool,
    /// Warnings from the pipeline and about missing targets.
    pub warnings: Vec<String>,
    /// Declarations that failed to lower.
    pub errors: Vec<String>,
    /// One entry per (module, target) pair.
    pub files: Vec<FileResult>,
}

/// What happened to one generated file.
#[derive(Debug)]
pub struct FileResult {
    pub module: String,
    pub target: Language,
    /// Path relative to the output directory.
    pub path: PathBuf,
    /// Declarations the target could not express.
    pub skipped: Vec<SkippedDeclaration>,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written,
    /// Existing file already had this content.
    Unchanged,
    /// Dry run; the rendered content.
    Preview(String),
    Failed(String),
}

impl GenerateReport {
    /// Whether any declaration or file was lost.
    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty()
            || self
                .files
                .iter()
                .any(|f| matches!(f.outcome, FileOutcome::Failed(_)))
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }

        if self.dry_run {
            self.render_preview(out);
        } else {
            self.render_written(out);
        }

        let skipped: Vec<&SkippedDeclaration> =
            self.files.iter().flat_map(|f| &f.skipped).collect();
        if !skipped.is_empty() {
            out.newline();
            out.section(&format!("Skipped declarations ({})", skipped.len()));
            for decl in skipped {
                out.list_item(&format!(
                    "{} {} [{}]: {}",
                    decl.kind.as_str(),
                    decl.name,
                    decl.target,
                    decl.reason
                ));
            }
        }

        let failed: Vec<(&FileResult, &str)> = self
            .files
            .iter()
            .filter_map(|f| match &f.outcome {
                FileOutcome::Failed(reason) => Some((f, reason.as_str())),
                _ => None,
            })
            .collect();
        if !failed.is_empty() {
            out.newline();
            out.section(&format!("Failed ({})", failed.len()));
            for (file, reason) in failed {
                out.removed_item(&format!("{}: {}", file.path.display(), reason));
            }
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output) {
        out.key_value("Output", &self.output_dir.display().to_string());
        for file in &self.files {
            let path = file.path.display();
            match file.outcome {
                FileOutcome::Written => out.added_item(&path.to_string()),
                FileOutcome::Unchanged => out.list_item(&format!("{} (unchanged)", path)),
                FileOutcome::Preview(_) | FileOutcome::Failed(_) => {}
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output) {
        let mut count = 0;
        for file in &self.files {
            if let FileOutcome::Preview(content) = &file.outcome {
                out.divider(&file.path.display().to_string());
                out.preformatted(content);
                count += 1;
            }
        }
        out.divider("Summary");
        out.preformatted(&format!(
            "{} file{} would be generated",
            count,
            if count == 1 { "" } else { "s" }
        ));
    }
}

#[cfg(test)]
mod tests {
    use polyglot_ir::NodeKind;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reports::output::RecordingOutput;

    fn file(path: &str, outcome: FileOutcome) -> FileResult {
        FileResult {
            module: "m".into(),
            target: Language::Rust,
            path: path.into(),
            skipped: Vec::new(),
            outcome,
        }
    }

    #[test]
    fn test_render_written() {
        let mut written = file("rust/m.rs", FileOutcome::Written);
        written.skipped.push(SkippedDeclaration {
            name: "Foo::wide".into(),
            kind: NodeKind::Function,
            target: Language::Rust,
            reason: "type 'float128' is not supported by Rust".into(),
        });
        let report = GenerateReport {
            output_dir: "bindings".into(),
            dry_run: false,
            warnings: Vec::new(),
            errors: Vec::new(),
            files: vec![
                written,
                file("d/m.d", FileOutcome::Unchanged),
                file("zig/m.zig", FileOutcome::Failed("permission denied".into())),
            ],
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert!(report.has_failures());
        assert_eq!(
            out.lines,
            vec![
                "Output: bindings",
                "  + rust/m.rs",
                "  - d/m.d (unchanged)",
                "",
                "Skipped declarations (1):",
                "  - function Foo::wide [rust]: type 'float128' is not supported by Rust",
                "",
                "Failed (1):",
                "  ! zig/m.zig: permission denied",
            ]
        );
    }

    #[test]
    fn test_render_preview() {
        let report = GenerateReport {
            output_dir: "bindings".into(),
            dry_run: true,
            warnings: vec!["w".into()],
            errors: Vec::new(),
            files: vec![file("rust/m.rs", FileOutcome::Preview("pub fn f();".into()))],
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert!(!report.has_failures());
        assert_eq!(
            out.lines,
            vec![
                "warning: w",
                "── rust/m.rs ──",
                "pub fn f();",
                "── Summary ──",
                "1 file would be generated",
            ]
        );
    }
}
