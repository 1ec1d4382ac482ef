//! `unsafe extern "C"` block builder.

use polyglot_codegen::builder::{CodeFragment, Renderable};

use super::ExternFn;

/// Opening line of every foreign block.
pub const EXTERN_BLOCK_OPEN: &str = "unsafe extern \"C\" {";

/// A standalone block of foreign declarations.
#[derive(Debug, Clone, Default)]
pub struct ExternBlock {
    items: Vec<ExternFn>,
}

impl ExternBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, item: ExternFn) -> Self {
        self.items.push(item);
        self
    }
}

impl Renderable for ExternBlock {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::block(
            EXTERN_BLOCK_OPEN,
            self.items.iter().flat_map(|f| f.to_fragments()).collect(),
            Some("}".to_string()),
        )]
    }
}
