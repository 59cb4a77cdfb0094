//! Language-agnostic code generation traits.

use std::path::Path;

use eyre::Result;

/// Trait for language-specific code generators.
///
/// Implement this trait to emit repository implementations in a new
/// language.
pub trait LanguageCodegen {
    /// Preview generated files without writing to disk
    fn preview(&self) -> Vec<PreviewFile>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation, as paths relative to the output directory
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files that were created or rewritten
    pub written: Vec<String>,
    /// Files that already had the generated content
    pub unchanged: Vec<String>,
    /// Hand-written files that were left alone
    pub skipped: Vec<String>,
}

impl GenerateResult {
    /// Total number of files the generator produced.
    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged.len() + self.skipped.len()
    }
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}
