//! List command report data structures.

use polyglot_ir::{Ast, ClassKind, ModuleRegistry, Node};

use super::output::{Output, Report};

/// The module trees of a manifest.
#[derive(Debug)]
pub struct ListReport {
    pub registry: ModuleRegistry,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.registry.is_empty() {
            out.preformatted("No declarations defined");
            return;
        }
        for (i, ast) in self.registry.modules().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.section(&ast.module_name);
            render_tree(ast, 1, out);
        }
    }
}

fn render_tree(ast: &Ast, depth: usize, out: &mut dyn Output) {
    let indent = "  ".repeat(depth);
    for node in &ast.nodes {
        let text = match node {
            Node::Function(f) if f.is_proxied() => format!("fn {} [proxy]", f.name),
            Node::Function(f) => format!("fn {}", f.name),
            Node::Class(c) => {
                let keyword = match c.kind {
                    ClassKind::Class => "class",
                    ClassKind::Struct => "struct",
                };
                match c.methods.len() {
                    0 => format!("{} {}", keyword, c.name),
                    1 => format!("{} {} (1 method)", keyword, c.name),
                    n => format!("{} {} ({} methods)", keyword, c.name, n),
                }
            }
            Node::Enum(e) => format!("enum {}", e.name),
            Node::Variable(v) => format!("var {}", v.name),
            Node::Namespace(ns) => format!("namespace {}", ns.name),
        };
        out.preformatted(&format!("{}{}", indent, text));
        if let Node::Namespace(ns) = node {
            render_tree(&ns.ast, depth + 1, out);
        }
    }
}
