use std::path::{Path, PathBuf};

use repogen_codegen::synth::module_file;
use repogen_core::GeneratedFile;
use repogen_ir::QualifiedName;

/// The implementation of one contract, in a file mirroring its module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplRs {
    name: QualifiedName,
    content: String,
}

impl ImplRs {
    pub fn new(name: QualifiedName, content: impl Into<String>) -> Self {
        Self {
            name,
            content: content.into(),
        }
    }

    /// The emitted type.
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Rendered source, without the generated-file header.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Directory of the file, relative to the output directory.
    pub fn dir(&self) -> Vec<String> {
        self.name.module_path.clone()
    }

    /// Module name of the file.
    pub fn stem(&self) -> String {
        module_file(&self.name).pop().unwrap_or_default()
    }
}

impl GeneratedFile for ImplRs {
    fn path(&self, base: &Path) -> PathBuf {
        let mut path = base.to_path_buf();
        path.extend(&self.name.module_path);
        path.push(format!("{}.rs", self.stem()));
        path
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}
