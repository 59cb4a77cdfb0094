use std::{collections::BTreeMap, path::Path};

use eyre::{Result, bail, eyre};
use repogen_codegen::{
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    pipeline::CompilationContext,
    synth::ClassSynthesizer,
};
use repogen_core::{GeneratedFile, WriteResult};

use crate::{
    RustSink,
    files::{ImplRs, ModRs},
};

/// Rust code generator that writes one implementation file per contract.
///
/// Everything is synthesized when the generator is built, so writing never
/// starts for a build that cannot be completed.
pub struct Generator {
    impls: Vec<ImplRs>,
    modules: Vec<ModRs>,
}

impl LanguageCodegen for Generator {
    fn preview(&self) -> Vec<PreviewFile> {
        self.files()
            .map(|file| PreviewFile {
                path: relative_path(file),
                content: file.render_with_header(),
            })
            .collect()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();

        for file in self.files() {
            let path = relative_path(file);
            match file.write(output_dir)? {
                WriteResult::Written => {
                    tracing::info!(file = %path, "wrote generated file");
                    result.written.push(path);
                }
                WriteResult::Unchanged => {
                    tracing::debug!(file = %path, "generated file is up to date");
                    result.unchanged.push(path);
                }
                WriteResult::Skipped => {
                    tracing::warn!(file = %path, "not overwriting a file repogen did not generate");
                    result.skipped.push(path);
                }
            }
        }

        Ok(result)
    }
}

impl Generator {
    /// Synthesize every contract planned by a finished pipeline run.
    pub fn from_context(ctx: &CompilationContext) -> Result<Self> {
        if ctx.has_errors() {
            bail!(
                "cannot generate code: compilation reported {} error(s)",
                ctx.error_count()
            );
        }
        let plans = ctx
            .plans
            .as_deref()
            .ok_or_else(|| eyre!("cannot generate code: contracts have not been analyzed"))?;

        let synthesizer = ClassSynthesizer::new(&ctx.manifest, &ctx.registry);
        let impls = plans
            .iter()
            .map(|plan| {
                synthesizer
                    .synthesize(plan, RustSink::new(&ctx.manifest, &ctx.registry))
                    .ok_or_else(|| eyre!("no type was emitted for `{}`", plan.repository.contract))
            })
            .collect::<Result<Vec<_>>>()?;

        let modules = module_tree(&impls);
        Ok(Self { impls, modules })
    }

    /// Implementation files, in contract order.
    pub fn impls(&self) -> &[ImplRs] {
        &self.impls
    }

    /// Module files, parents before children.
    pub fn modules(&self) -> &[ModRs] {
        &self.modules
    }

    fn files(&self) -> impl Iterator<Item = &dyn GeneratedFile> {
        self.modules
            .iter()
            .map(|file| file as &dyn GeneratedFile)
            .chain(self.impls.iter().map(|file| file as &dyn GeneratedFile))
    }
}

/// One `mod.rs` per directory holding an implementation file or a
/// directory that does, the output root included.
fn module_tree(impls: &[ImplRs]) -> Vec<ModRs> {
    let mut dirs: BTreeMap<Vec<String>, ModRs> = BTreeMap::new();
    dirs.insert(Vec::new(), ModRs::new(Vec::new()));

    for file in impls {
        let dir = file.dir();
        for depth in 0..dir.len() {
            let parent = dir[..depth].to_vec();
            dirs.entry(parent.clone())
                .or_insert_with(|| ModRs::new(parent))
                .child(dir[depth].clone());
        }
        dirs.entry(dir.clone())
            .or_insert_with(|| ModRs::new(dir))
            .export(file.stem(), file.name().name.clone());
    }

    dirs.into_values().collect()
}

/// `/`-separated path of `file` relative to the output directory.
fn relative_path(file: &dyn GeneratedFile) -> String {
    file.path(Path::new(""))
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use repogen_ir::QualifiedName;

    use super::*;

    fn impl_file(name: &str) -> ImplRs {
        ImplRs::new(QualifiedName::parse(name).unwrap(), "")
    }

    #[test]
    fn test_module_tree() {
        let modules = module_tree(&[
            impl_file("repo::users::UserRepositoryImpl"),
            impl_file("repo::OrderRepositoryImpl"),
            impl_file("RootRepositoryImpl"),
        ]);

        let dirs: Vec<String> = modules.iter().map(|m| m.dir().join("::")).collect();
        assert_eq!(dirs, vec!["", "repo", "repo::users"]);

        assert_eq!(
            modules[0].render(),
            "pub mod repo;\n\nmod root_repository_impl;\n\npub use root_repository_impl::RootRepositoryImpl;\n"
        );
        assert_eq!(
            modules[1].render(),
            "pub mod users;\n\nmod order_repository_impl;\n\npub use order_repository_impl::OrderRepositoryImpl;\n"
        );
    }

    #[test]
    fn test_module_tree_without_contracts() {
        let modules = module_tree(&[]);
        assert_eq!(modules.len(), 1);
        assert!(modules[0].dir().is_empty());
    }

    #[test]
    fn test_relative_path() {
        let file = impl_file("repo::UserRepositoryImpl");
        assert_eq!(relative_path(&file), "repo/user_repository_impl.rs");
        assert_eq!(relative_path(&ModRs::new(Vec::new())), "mod.rs");
    }
}
