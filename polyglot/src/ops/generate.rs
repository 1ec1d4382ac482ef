//! Generate operation - bindings for every (module, target) pair.

use std::path::{Path, PathBuf};

use eyre::{Context, Result, eyre};
use polyglot_codegen::{
    generation::{GenerateOptions, Timestamp},
    language::BindingCodegen,
};
use polyglot_core::{OutputFile, WriteResult};
use polyglot_ir::{Ast, Language};
use polyglot_manifest::Manifest;
use rayon::prelude::*;
use tracing::{debug, info_span};

use super::{describe, pipeline};
use crate::{
    language,
    reports::{FileOutcome, FileResult, GenerateReport},
};

/// Inputs of the generate operation, already merged from flags and the
/// manifest's `[generate]` section.
pub struct GenerateRequest<'a> {
    pub output_dir: &'a Path,
    pub targets: &'a [Language],
    /// Render without writing to disk.
    pub dry_run: bool,
    pub timestamp: Timestamp,
}

/// Execute the generate operation.
///
/// Declarations that fail to lower are reported and left out; a file that
/// fails to render or write is reported without stopping the others.
pub fn generate(manifest: &Manifest, request: GenerateRequest) -> Result<GenerateReport> {
    let generators = request
        .targets
        .iter()
        .map(|&target| {
            language::generator(target, manifest)
                .map(|generator| (target, generator))
                .ok_or_else(|| eyre!("no backend generates {} bindings", target.display_name()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut ctx = pipeline()
        .run(manifest.clone())
        .wrap_err("Pipeline failed")?;
    let warnings: Vec<String> = ctx.warnings().map(describe).collect();
    let errors: Vec<String> = ctx.errors().map(describe).collect();
    let registry = ctx.take_registry()?;

    let mut report = GenerateReport {
        output_dir: request.output_dir.to_path_buf(),
        dry_run: request.dry_run,
        warnings,
        errors,
        files: Vec::new(),
    };

    if !request.targets.contains(&Language::Cpp) {
        for ast in registry.modules().filter(|ast| ast.has_proxies()) {
            report.warnings.push(format!(
                "module '{}' passes strings through proxies; add the cpp target to generate the shim defining them",
                ast.module_name
            ));
        }
    }

    let opts = GenerateOptions::default().with_timestamp(request.timestamp.clone());
    let jobs: Vec<(&Ast, Language, &dyn BindingCodegen)> = registry
        .modules()
        .flat_map(|ast| {
            generators
                .iter()
                .filter(|(target, _)| language::wants_module(*target, ast))
                .map(move |(target, generator)| (ast, *target, generator.as_ref()))
        })
        .collect();

    report.files = jobs
        .par_iter()
        .map(|&(ast, target, generator)| generate_file(ast, target, generator, &opts, &request))
        .collect();
    Ok(report)
}

fn generate_file(
    ast: &Ast,
    target: Language,
    generator: &dyn BindingCodegen,
    opts: &GenerateOptions,
    request: &GenerateRequest,
) -> FileResult {
    let _span = info_span!("generate", module = %ast.module_name, %target).entered();
    let path = PathBuf::from(target.as_str()).join(generator.file_name(&ast.module_name));

    let mut result = FileResult {
        module: ast.module_name.clone(),
        target,
        path,
        skipped: Vec::new(),
        outcome: FileOutcome::Unchanged,
    };
    let output = match generator.render(ast, opts) {
        Ok(output) => output,
        Err(err) => {
            result.outcome = FileOutcome::Failed(err.to_string());
            return result;
        }
    };
    result.skipped = output.skipped;

    let file = OutputFile::new(&result.path, output.content);
    result.outcome = if request.dry_run {
        FileOutcome::Preview(file.content().to_string())
    } else {
        match file.write(request.output_dir) {
            Ok(WriteResult::Written) => FileOutcome::Written,
            Ok(WriteResult::Unchanged) => FileOutcome::Unchanged,
            Err(err) => FileOutcome::Failed(format!("{:#}", err)),
        }
    };
    debug!(path = %result.path.display(), "file generated");
    result
}

#[cfg(test)]
mod tests {
    use std::{fs, str::FromStr};

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const MANIFEST: &str = r#"
        [[decl]]
        kind = "function"
        file = "src/text.cpp"
        name = "upper"
        mangled = "_Z5upperSs"
        returns = "string"
        params = [{ name = "s", type = "string" }]

        [[decl]]
        kind = "function"
        file = "src/math.cpp"
        name = "wide"
        mangled = "_Z4widen"
        params = [{ name = "x", type = { base = "int", bits = 128 } }]
        "#;

    fn request<'a>(dir: &'a Path, targets: &'a [Language], dry_run: bool) -> GenerateRequest<'a> {
        GenerateRequest {
            output_dir: dir,
            targets,
            dry_run,
            timestamp: Timestamp::Fixed("T".into()),
        }
    }

    fn paths(report: &GenerateReport) -> Vec<String> {
        let mut paths: Vec<String> = report
            .files
            .iter()
            .map(|f| f.path.display().to_string())
            .collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_writes_one_file_per_module_and_target() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let targets = [Language::Rust, Language::D, Language::Cpp];

        let report = generate(&manifest, request(temp.path(), &targets, false)).unwrap();

        // The shim is only generated for the module with proxies.
        assert_eq!(
            paths(&report),
            vec!["cpp/text_proxies.cpp", "d/math.d", "d/text.d", "rust/math.rs", "rust/text.rs"]
        );
        assert!(report.files.iter().all(|f| f.outcome == FileOutcome::Written));
        let shim = fs::read_to_string(temp.path().join("cpp/text_proxies.cpp")).unwrap();
        assert!(shim.contains("extern \"C\" char *polyglot_proxy__Z5upperSs(const char *s) noexcept {"));
        assert!(report.warnings.iter().any(|w| w.contains("portability")), "{:?}", report.warnings);
    }

    #[test]
    fn test_skipped_declarations_are_reported_per_file() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let targets = [Language::D];

        let report = generate(&manifest, request(temp.path(), &targets, false)).unwrap();

        let math = report.files.iter().find(|f| f.module == "math").unwrap();
        assert_eq!(math.skipped.len(), 1);
        assert_eq!(math.skipped[0].name, "wide");
        assert!(!report.has_failures());
    }

    #[test]
    fn test_missing_shim_target_warns() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let targets = [Language::Zig];

        let report = generate(&manifest, request(temp.path(), &targets, false)).unwrap();

        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.starts_with("module 'text' passes strings through proxies"))
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let targets = [Language::Rust];

        let report = generate(&manifest, request(temp.path(), &targets, true)).unwrap();

        assert_eq!(report.files.len(), 2);
        assert!(
            report
                .files
                .iter()
                .all(|f| matches!(f.outcome, FileOutcome::Preview(_)))
        );
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_regeneration_is_unchanged() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let targets = [Language::Zig];

        generate(&manifest, request(temp.path(), &targets, false)).unwrap();
        let report = generate(&manifest, request(temp.path(), &targets, false)).unwrap();

        assert!(report.files.iter().all(|f| f.outcome == FileOutcome::Unchanged));
    }

    #[test]
    fn test_unwritable_output_fails_only_that_target() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("zig"), "").unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let targets = [Language::Zig, Language::D];

        let report = generate(&manifest, request(temp.path(), &targets, false)).unwrap();

        assert!(report.has_failures());
        for file in &report.files {
            let failed = matches!(file.outcome, FileOutcome::Failed(_));
            assert_eq!(failed, file.target == Language::Zig, "{}", file.path.display());
        }
    }

    #[test]
    fn test_unknown_backend_is_an_error() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let targets = [Language::Swift];

        let err = generate(&manifest, request(temp.path(), &targets, false)).unwrap_err();
        assert_eq!(err.to_string(), "no backend generates Swift bindings");
    }
}
