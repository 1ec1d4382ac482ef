use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// A generated binding file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    path: PathBuf,
    content: String,
}

impl OutputFile {
    /// Create a new file with a path relative to the output directory.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path relative to the output directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file below `base`, always replacing what is there.
    ///
    /// Identical content is left untouched so that regenerating unchanged
    /// bindings does not bump modification times.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = base.join(&self.path);
        if let Ok(existing) = std::fs::read_to_string(&path)
            && existing == self.content
        {
            return Ok(WriteResult::Unchanged);
        }
        write_file(&path, &self.content)
            .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
        Ok(WriteResult::Written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had identical content
    Unchanged,
}
