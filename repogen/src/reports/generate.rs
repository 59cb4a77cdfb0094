//! Generate command report data structures.

use std::path::PathBuf;

use repogen_codegen_rust::{GenerateResult, PreviewFile};

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Project name from the manifest.
    pub project: String,

    /// Warnings from the pipeline, already formatted.
    pub warnings: Vec<String>,

    /// Number of repository contracts implemented.
    pub contract_count: usize,

    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    /// What happened to each file.
    pub files: GenerateResult,
    /// Path to debug snapshots, if visualization was enabled.
    pub debug_dir: Option<PathBuf>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if let Some(debug_dir) = &written.debug_dir {
            out.key_value(
                "Pipeline snapshots written to",
                &debug_dir.display().to_string(),
            );
            out.newline();
        }

        out.preformatted(&format!(
            "{}: {} repositor{}",
            self.project,
            self.contract_count,
            if self.contract_count == 1 { "y" } else { "ies" }
        ));
        out.key_value("Generated", &written.output_dir.display().to_string());

        let files = &written.files;
        if !files.written.is_empty() {
            out.newline();
            out.section("Written");
            for file in &files.written {
                out.added_item(file);
            }
        }

        if !files.skipped.is_empty() {
            out.newline();
            out.section("Skipped (not generated by repogen)");
            for file in &files.skipped {
                out.list_item(file);
            }
        }

        if !files.unchanged.is_empty() {
            out.newline();
            out.preformatted(&format!("{} file(s) unchanged", files.unchanged.len()));
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}
