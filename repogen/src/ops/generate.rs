//! Generate operation - repository implementations from annotated sources.

use std::path::Path;

use eyre::{Context, Result};
use repogen_codegen::pipeline::{Pipeline, SnapshotPlugin};
use repogen_codegen_rust::{Generator, LanguageCodegen};
use repogen_manifest::RepogenToml;

use crate::reports::{GenerateReport, GenerationResult, PreviewResult, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory generated files are written to.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Where to write pipeline snapshots, if anywhere.
    pub visualize: Option<&'a Path>,
}

/// Execute the generate operation.
///
/// Scans the sources, runs the pipeline and emits one implementation per
/// repository contract. Nothing is written when any contract fails.
pub fn generate(toml: &RepogenToml, opts: GenerateOptions) -> Result<GenerateReport> {
    let manifest = toml.manifest();
    let registry = super::scan(toml)?;

    let mut pipeline = Pipeline::new();
    if let Some(dir) = opts.visualize {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }
    let ctx = pipeline
        .run(manifest.clone(), registry)
        .wrap_err("Pipeline failed")?;

    let warnings = ctx.warnings().map(ToString::to_string).collect();
    let contract_count = ctx.plans.as_ref().map_or(0, Vec::len);

    let generator = Generator::from_context(&ctx)?;
    let result = if opts.dry_run {
        GenerationResult::Preview(PreviewResult {
            files: generator.preview(),
        })
    } else {
        let files = generator
            .generate(opts.output_dir)
            .wrap_err("Failed to generate code")?;
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            files,
            debug_dir: opts.visualize.map(Path::to_path_buf),
        })
    };

    Ok(GenerateReport {
        project: manifest.project.name.clone(),
        warnings,
        contract_count,
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::ops::testing::{REPO, project};

    #[test]
    fn test_generate_writes_files() {
        let (temp, toml) = project(REPO);
        let output = toml.output_dir();

        let report = generate(
            &toml,
            GenerateOptions {
                output_dir: &output,
                dry_run: false,
                visualize: None,
            },
        )
        .unwrap();

        assert_eq!(report.contract_count, 1);
        let GenerationResult::Written(written) = report.result else {
            panic!("expected written files");
        };
        assert_eq!(
            written.files.written,
            vec!["mod.rs", "repo/mod.rs", "repo/user_repository_impl.rs"]
        );

        let content = fs::read_to_string(
            temp.path()
                .join("src/generated/repo/user_repository_impl.rs"),
        )
        .unwrap();
        assert!(content.contains("pub struct UserRepositoryImpl {"));
    }

    #[test]
    fn test_generate_twice_is_stable() {
        let (_temp, toml) = project(REPO);
        let output = toml.output_dir();
        let opts = || GenerateOptions {
            output_dir: &output,
            dry_run: false,
            visualize: None,
        };

        generate(&toml, opts()).unwrap();
        let report = generate(&toml, opts()).unwrap();

        let GenerationResult::Written(written) = report.result else {
            panic!("expected written files");
        };
        assert!(written.files.written.is_empty());
        assert_eq!(written.files.unchanged.len(), 3);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (_temp, toml) = project(REPO);
        let output = toml.output_dir();

        let report = generate(
            &toml,
            GenerateOptions {
                output_dir: &output,
                dry_run: true,
                visualize: None,
            },
        )
        .unwrap();

        let GenerationResult::Preview(preview) = report.result else {
            panic!("expected a preview");
        };
        assert_eq!(preview.files.len(), 3);
        assert!(!output.exists());
    }

    #[test]
    fn test_visualize_writes_snapshots() {
        let (temp, toml) = project(REPO);
        let output = toml.output_dir();
        let debug = temp.path().join(".repogen/debug");

        generate(
            &toml,
            GenerateOptions {
                output_dir: &output,
                dry_run: true,
                visualize: Some(&debug),
            },
        )
        .unwrap();

        assert!(debug.join("extract.json").exists());
        assert!(debug.join("analyze.json").exists());
    }

    #[test]
    fn test_failed_contract_writes_nothing() {
        let broken = r#"
#[repository]
pub struct NotATrait;
"#;
        let (_temp, toml) = project(broken);
        let output = toml.output_dir();

        let err = generate(
            &toml,
            GenerateOptions {
                output_dir: &output,
                dry_run: false,
                visualize: None,
            },
        )
        .unwrap_err();

        assert!(format!("{:?}", err).contains("is not a trait"));
        assert!(!output.exists());
    }
}
