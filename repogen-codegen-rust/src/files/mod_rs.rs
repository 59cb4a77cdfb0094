use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use repogen_codegen::builder::CodeBuilder;
use repogen_core::GeneratedFile;

/// The `mod.rs` of one output directory.
///
/// Subdirectories are public modules; implementation files are private
/// modules whose type is re-exported, so `repo::UserRepositoryImpl` is
/// reachable as `<output>::repo::UserRepositoryImpl`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModRs {
    dir: Vec<String>,
    children: BTreeSet<String>,
    exports: BTreeMap<String, String>,
}

impl ModRs {
    pub fn new(dir: Vec<String>) -> Self {
        Self {
            dir,
            ..Self::default()
        }
    }

    /// Directory of the file, relative to the output directory.
    pub fn dir(&self) -> &[String] {
        &self.dir
    }

    /// Declare a subdirectory module.
    pub fn child(&mut self, module: impl Into<String>) -> &mut Self {
        self.children.insert(module.into());
        self
    }

    /// Declare an implementation file and re-export its type.
    pub fn export(&mut self, stem: impl Into<String>, type_name: impl Into<String>) -> &mut Self {
        self.exports.insert(stem.into(), type_name.into());
        self
    }
}

impl GeneratedFile for ModRs {
    fn path(&self, base: &Path) -> PathBuf {
        let mut path = base.to_path_buf();
        path.extend(&self.dir);
        path.push("mod.rs");
        path
    }

    fn render(&self) -> String {
        let mut builder = CodeBuilder::rust().each(&self.children, |b, child| {
            b.line(&format!("pub mod {};", child))
        });

        if !self.exports.is_empty() {
            if !self.children.is_empty() {
                builder = builder.blank();
            }
            builder = builder
                .each(self.exports.keys(), |b, stem| b.line(&format!("mod {};", stem)))
                .blank()
                .each(&self.exports, |b, (stem, name)| {
                    b.line(&format!("pub use {}::{};", stem, name))
                });
        }

        builder.build()
    }
}
