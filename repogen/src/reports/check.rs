//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from contract validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Number of repository contracts planned.
    pub contracts: usize,
    /// Number of query methods across all contracts.
    pub methods: usize,
    /// Error diagnostics, formatted.
    pub errors: Vec<String>,
    /// Warning diagnostics, formatted.
    pub warnings: Vec<String>,
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
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
            out.preformatted(&format!(
                "  {} repositor{}, {} query method{}",
                self.contracts,
                if self.contracts == 1 { "y" } else { "ies" },
                self.methods,
                if self.methods == 1 { "" } else { "s" }
            ));
        } else {
            out.preformatted(&format!(
                "✗ {} has {} error{}",
                self.config_path.display(),
                self.errors.len(),
                if self.errors.len() == 1 { "" } else { "s" }
            ));
        }
    }
}
