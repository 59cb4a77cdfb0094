use std::path::{Path, PathBuf};

use eyre::Result;

/// First line of every file repogen emits.
///
/// Existing files are only overwritten when they start with this marker, so
/// hand-written files that happen to live in the output directory survive.
pub const GENERATED_HEADER: &str = "// @generated by repogen. Do not edit by hand.";

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    /// Render the file content (without header)
    fn render(&self) -> String;

    /// Render the file content with the header required by its rules
    fn render_with_header(&self) -> String {
        with_header(self.rules().header, &self.render())
    }

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        write_with_rules(&path, &self.render_with_header(), &self.rules())
    }
}

fn with_header(header: Option<&str>, body: &str) -> String {
    match header {
        Some(header) => format!("{}\n\n{}", header, body),
        None => body.to_string(),
    }
}

fn write_with_rules(path: &Path, content: &str, rules: &FileRules) -> Result<WriteResult> {
    if path.exists() {
        let existing = std::fs::read_to_string(path)?;
        if existing == content {
            return Ok(WriteResult::Unchanged);
        }
        if rules.overwrite == Overwrite::IfGenerated && !existing.starts_with(GENERATED_HEADER) {
            return Ok(WriteResult::Skipped);
        }
    }

    write_file(path, content)?;
    Ok(WriteResult::Written)
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
    /// File already had the exact content; left untouched
    Unchanged,
    /// File exists and was not produced by repogen; left untouched
    Skipped,
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone)]
pub struct FileRules {
    pub overwrite: Overwrite,
    pub header: Option<&'static str>,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite
    Always,
    /// Overwrite only files that carry [`GENERATED_HEADER`]
    IfGenerated,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            overwrite: Overwrite::IfGenerated,
            header: Some(GENERATED_HEADER),
        }
    }
}
