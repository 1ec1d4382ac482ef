//! Target dispatch.
//!
//! Maps a target language to its backend and decides which modules get a
//! file for it.

use polyglot_codegen::language::BindingCodegen;
use polyglot_codegen_cpp::Generator as CppGenerator;
use polyglot_codegen_d::Generator as DGenerator;
use polyglot_codegen_rust::Generator as RustGenerator;
use polyglot_codegen_zig::Generator as ZigGenerator;
use polyglot_ir::{Ast, Language};
use polyglot_manifest::Manifest;

/// Targets generated when neither the command line nor the manifest
/// names any.
pub const DEFAULT_TARGETS: [Language; 3] = [Language::Rust, Language::D, Language::Zig];

/// Create the generator for a target, or `None` when no backend exists.
pub fn generator(language: Language, manifest: &Manifest) -> Option<Box<dyn BindingCodegen>> {
    let generator: Box<dyn BindingCodegen> = match language {
        Language::Rust => Box::new(RustGenerator::new()),
        Language::Zig => Box::new(ZigGenerator::new()),
        Language::D => Box::new(DGenerator::new()),
        Language::Cpp => {
            Box::new(CppGenerator::new().with_headers(manifest.source.headers.iter().cloned()))
        }
        _ => return None,
    };
    Some(generator)
}

/// Whether a module gets a file for this target.
///
/// The C++ shim only exists for modules with proxies.
pub fn wants_module(language: Language, ast: &Ast) -> bool {
    language != Language::Cpp || ast.has_proxies()
}
