//! Check command report data structures.

use std::path::PathBuf;

use polyglot_ir::{Ast, Node};

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
    /// Modules built, empty when validation stopped the pipeline.
    pub modules: Vec<ModuleStats>,
}

/// Size of one module tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleStats {
    pub name: String,
    pub declarations: usize,
    /// Functions called through a string proxy.
    pub proxies: usize,
}

impl ModuleStats {
    pub fn of(ast: &Ast) -> Self {
        Self {
            name: ast.module_name.clone(),
            declarations: ast.declaration_count(),
            proxies: count_proxies(ast),
        }
    }
}

fn count_proxies(ast: &Ast) -> usize {
    ast.nodes
        .iter()
        .map(|node| match node {
            Node::Function(f) if f.is_proxied() => 1,
            Node::Namespace(ns) => count_proxies(&ns.ast),
            _ => 0,
        })
        .sum()
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        if self.modules.is_empty() {
            return;
        }
        out.newline();
        out.section(&format!("Modules ({})", self.modules.len()));
        for module in &self.modules {
            let mut line = format!(
                "{} ({} declaration{}",
                module.name,
                module.declarations,
                if module.declarations == 1 { "" } else { "s" }
            );
            if module.proxies > 0 {
                line.push_str(&format!(", {} proxied", module.proxies));
            }
            line.push(')');
            out.list_item(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_render_valid() {
        let report = CheckReport {
            config_path: "polyglot.toml".into(),
            errors: Vec::new(),
            warnings: vec!["overloaded".into()],
            infos: Vec::new(),
            modules: vec![
                ModuleStats {
                    name: "text".into(),
                    declarations: 3,
                    proxies: 2,
                },
                ModuleStats {
                    name: "math".into(),
                    declarations: 1,
                    proxies: 0,
                },
            ],
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "warning: overloaded",
                "",
                "✓ polyglot.toml is valid",
                "",
                "Modules (2):",
                "  - text (3 declarations, 2 proxied)",
                "  - math (1 declaration)",
            ]
        );
    }

    #[test]
    fn test_render_invalid_stops_after_errors() {
        let report = CheckReport {
            config_path: "polyglot.toml".into(),
            errors: vec!["bad".into()],
            warnings: Vec::new(),
            infos: Vec::new(),
            modules: Vec::new(),
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines, vec!["warning: error: bad", ""]);
    }
}
