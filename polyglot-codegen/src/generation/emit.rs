//! Single-pass module emission shared by every backend.
//!
//! [`emit_module`] walks a module's tree once, top to bottom. Backends only
//! render individual declarations through [`Emitter`]; banner placement,
//! namespace nesting, extern-block grouping and error recovery live here.
//!
//! All mutable state is carried in a cursor owned by the call, so
//! one emitter can render many modules at the same time.

use polyglot_ir::{
    Ast, ClassNode, EnumNode, FunctionNode, Language, Node, TypeProxy, VariableNode,
};
use tracing::{debug, warn};

use super::{
    Banner, FunctionAliases, GenerateOptions, ModuleOutput, SkippedDeclaration,
    extern_block::{ExternBlockTracker, Transition},
};
use crate::{
    CodegenError,
    builder::{CodeBuilder, CodeFragment, Indent},
};

/// Where a declaration sits in its module.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub module_name: &'a str,
    /// Enclosing namespaces, outermost first.
    pub namespace: &'a [String],
    /// Overload-free names of the functions at this level.
    pub functions: &'a FunctionAliases,
}

impl Scope<'_> {
    /// Number of enclosing namespaces.
    pub fn depth(&self) -> usize {
        self.namespace.len()
    }

    /// `Outer::Inner::name`
    pub fn qualify(&self, name: &str) -> String {
        qualify(self.namespace, name)
    }

    /// Unique name for `f` in targets that cannot overload.
    pub fn binding_name<'b>(&'b self, f: &'b FunctionNode) -> &'b str {
        self.functions.name(f)
    }
}

fn qualify(namespace: &[String], name: &str) -> String {
    let mut parts: Vec<&str> = namespace.iter().map(String::as_str).collect();
    parts.push(name);
    parts.join("::")
}

/// The two halves of a proxied function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyFragments {
    /// Raw declaration using the proxy's own signature. Placed inside the
    /// extern block when the target has one.
    pub raw: Vec<CodeFragment>,
    /// Target-visible wrapper that marshals and calls the raw symbol.
    /// Always placed outside any extern block.
    pub wrapper: Vec<CodeFragment>,
}

/// Per-declaration rendering for one target.
///
/// Returning an empty fragment list emits nothing for the declaration.
pub trait Emitter: Send + Sync {
    fn target(&self) -> Language;

    fn indent(&self) -> Indent;

    /// Fragments following the banner, such as imports or a module line.
    #[allow(unused_variables)]
    fn prelude(&self, ast: &Ast) -> Vec<CodeFragment> {
        Vec::new()
    }

    /// Opening and closing lines of an extern block, or `None` when the
    /// target links each function individually.
    fn extern_block(&self) -> Option<(&'static str, &'static str)>;

    /// Lines opening a namespace wrapper.
    fn namespace_open(&self, name: &str) -> Vec<String>;

    /// Line closing a namespace wrapper.
    fn namespace_close(&self, name: &str) -> String;

    /// Whether a node belongs in this target's output at all.
    #[allow(unused_variables)]
    fn includes(&self, node: &Node) -> bool {
        true
    }

    fn function(&self, f: &FunctionNode, scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError>;

    fn proxy(
        &self,
        f: &FunctionNode,
        proxy: &TypeProxy,
        scope: &Scope,
    ) -> Result<ProxyFragments, CodegenError>;

    fn enumeration(&self, e: &EnumNode, scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError>;

    fn class(&self, c: &ClassNode, scope: &Scope) -> Result<Vec<CodeFragment>, CodegenError>;

    fn variable(&self, v: &VariableNode, scope: &Scope)
    -> Result<Vec<CodeFragment>, CodegenError>;
}

/// Mutable emission state threaded through the recursive walk.
#[derive(Debug)]
struct EmitCursor {
    /// Reentrancy depth of [`write_ast`]; the banner is written on the
    /// transition from 0 to 1.
    depth: usize,
    builder: CodeBuilder,
    namespace: Vec<String>,
    skipped: Vec<SkippedDeclaration>,
}

impl EmitCursor {
    fn new(indent: Indent) -> Self {
        Self {
            depth: 0,
            builder: CodeBuilder::new(indent),
            namespace: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn separate(&mut self, needed: bool) {
        if needed {
            self.builder.push_blank();
        }
    }
}

/// Render a whole module.
///
/// Declarations the target cannot express are omitted and reported in
/// [`ModuleOutput::skipped`]. Any other error aborts the module and no
/// partial text is returned.
pub fn emit_module<E: Emitter + ?Sized>(
    emitter: &E,
    ast: &Ast,
    opts: &GenerateOptions,
) -> Result<ModuleOutput, CodegenError> {
    let mut cursor = EmitCursor::new(emitter.indent());
    write_ast(emitter, ast, opts, &mut cursor)?;

    debug!(
        module = %ast.module_name,
        target = %emitter.target(),
        skipped = cursor.skipped.len(),
        "emitted module"
    );

    Ok(ModuleOutput {
        module_name: ast.module_name.clone(),
        target: emitter.target(),
        content: cursor.builder.build(),
        skipped: cursor.skipped,
    })
}

fn write_ast<E: Emitter + ?Sized>(
    emitter: &E,
    ast: &Ast,
    opts: &GenerateOptions,
    cursor: &mut EmitCursor,
) -> Result<(), CodegenError> {
    cursor.depth += 1;
    if cursor.depth == 1 {
        cursor
            .builder
            .emit(&Banner::new(ast.language, emitter.target(), opts));
        let prelude = emitter.prelude(ast);
        if !prelude.is_empty() {
            cursor.builder.apply_all(prelude);
            cursor.builder.push_blank();
        }
    }
    let result = write_nodes(emitter, ast, opts, cursor);
    cursor.depth -= 1;
    result
}

fn write_nodes<E: Emitter + ?Sized>(
    emitter: &E,
    ast: &Ast,
    opts: &GenerateOptions,
    cursor: &mut EmitCursor,
) -> Result<(), CodegenError> {
    let block = emitter.extern_block();
    let functions = FunctionAliases::of(ast);
    let mut tracker = ExternBlockTracker::new();
    let mut separate = false;

    for node in &ast.nodes {
        if !emitter.includes(node) {
            continue;
        }

        match node {
            Node::Namespace(ns) => {
                if tracker.transition(node.kind()) == Transition::Close {
                    close_block(block, cursor);
                }
                cursor.separate(separate);
                for line in emitter.namespace_open(&ns.name) {
                    cursor.builder.push_line(&line);
                }
                cursor.builder.push_indent();
                cursor.namespace.push(ns.name.clone());
                let result = write_ast(emitter, &ns.ast, opts, cursor);
                cursor.namespace.pop();
                cursor.builder.push_dedent();
                result?;
                cursor
                    .builder
                    .push_line(&emitter.namespace_close(&ns.name));
            }
            Node::Function(f) => {
                if let Some(proxy) = &f.type_proxy {
                    let rendered = render(emitter, ast, &functions, node, cursor, |scope| {
                        emitter.proxy(f, proxy, scope)
                    })?;
                    let Some(fragments) = rendered else { continue };
                    if fragments.raw.is_empty() && fragments.wrapper.is_empty() {
                        continue;
                    }

                    if let Some((open, close)) = block {
                        if tracker.transition(node.kind()) == Transition::Open {
                            open_block(open, cursor, separate);
                        }
                        cursor.builder.apply_all(fragments.raw);
                        tracker.close();
                        close_block(Some((open, close)), cursor);
                        cursor.builder.push_blank();
                    } else if !fragments.raw.is_empty() {
                        cursor.separate(separate);
                        cursor.builder.apply_all(fragments.raw);
                        cursor.builder.push_blank();
                    } else {
                        cursor.separate(separate);
                    }
                    cursor.builder.apply_all(fragments.wrapper);
                } else {
                    let rendered = render(emitter, ast, &functions, node, cursor, |scope| {
                        emitter.function(f, scope)
                    })?;
                    let Some(fragments) = rendered.filter(|frags| !frags.is_empty()) else {
                        continue;
                    };

                    match block {
                        Some((open, _)) => {
                            if tracker.transition(node.kind()) == Transition::Open {
                                open_block(open, cursor, separate);
                            }
                        }
                        None => cursor.separate(separate),
                    }
                    cursor.builder.apply_all(fragments);
                }
            }
            Node::Enum(e) => {
                let rendered = render(emitter, ast, &functions, node, cursor, |scope| {
                    emitter.enumeration(e, scope)
                })?;
                if !write_item(rendered, node, block, &mut tracker, cursor, separate) {
                    continue;
                }
            }
            Node::Class(c) => {
                let rendered = render(emitter, ast, &functions, node, cursor, |scope| {
                    emitter.class(c, scope)
                })?;
                if !write_item(rendered, node, block, &mut tracker, cursor, separate) {
                    continue;
                }
            }
            Node::Variable(v) => {
                let rendered = render(emitter, ast, &functions, node, cursor, |scope| {
                    emitter.variable(v, scope)
                })?;
                if !write_item(rendered, node, block, &mut tracker, cursor, separate) {
                    continue;
                }
            }
        }
        separate = true;
    }

    if tracker.finish() {
        close_block(block, cursor);
    }
    Ok(())
}

/// Append a non-function declaration, closing any open extern block.
/// Returns whether anything was written.
fn write_item(
    rendered: Option<Vec<CodeFragment>>,
    node: &Node,
    block: Option<(&'static str, &'static str)>,
    tracker: &mut ExternBlockTracker,
    cursor: &mut EmitCursor,
    separate: bool,
) -> bool {
    let Some(fragments) = rendered.filter(|frags| !frags.is_empty()) else {
        return false;
    };
    if tracker.transition(node.kind()) == Transition::Close {
        close_block(block, cursor);
    }
    cursor.separate(separate);
    cursor.builder.apply_all(fragments);
    true
}

/// Render one declaration, turning recoverable errors into skips.
fn render<E, T>(
    emitter: &E,
    ast: &Ast,
    functions: &FunctionAliases,
    node: &Node,
    cursor: &mut EmitCursor,
    f: impl FnOnce(&Scope) -> Result<T, CodegenError>,
) -> Result<Option<T>, CodegenError>
where
    E: Emitter + ?Sized,
{
    let result = f(&Scope {
        module_name: &ast.module_name,
        namespace: &cursor.namespace,
        functions,
    });

    match result {
        Ok(rendered) => Ok(Some(rendered)),
        Err(err) if err.is_recoverable() => {
            let skipped = SkippedDeclaration {
                name: qualify(&cursor.namespace, node.name()),
                kind: node.kind(),
                target: emitter.target(),
                reason: err.to_string(),
            };
            warn!(
                module = %ast.module_name,
                declaration = %skipped.name,
                target = %skipped.target,
                reason = %skipped.reason,
                "declaration omitted"
            );
            cursor.skipped.push(skipped);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn open_block(open: &str, cursor: &mut EmitCursor, separate: bool) {
    cursor.separate(separate);
    cursor.builder.push_line(open);
    cursor.builder.push_indent();
}

fn close_block(block: Option<(&'static str, &'static str)>, cursor: &mut EmitCursor) {
    if let Some((_, close)) = block {
        cursor.builder.push_dedent();
        cursor.builder.push_line(close);
    }
}
