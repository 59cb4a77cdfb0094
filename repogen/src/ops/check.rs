//! Check operation - contract validation without emitting code.

use std::{path::Path, sync::Arc};

use eyre::Result;
use repogen_codegen::{
    GenerationError,
    pipeline::{Diagnostic, Pipeline, Severity, SnapshotPlugin},
};
use repogen_manifest::RepogenToml;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline and collects its diagnostics. A fatal error is
/// reported alongside whatever the phases before it had found.
pub fn check(toml: &RepogenToml, config_path: &Path) -> Result<CheckReport> {
    let registry = super::scan(toml)?;
    let snapshots = Arc::new(SnapshotPlugin::new());
    let pipeline = Pipeline::new().plugin(snapshots.clone());

    let (diagnostics, contracts, methods) = match pipeline.run(toml.manifest().clone(), registry) {
        Ok(ctx) => {
            let plans = ctx.plans.as_deref().unwrap_or_default();
            let methods = plans.iter().map(|p| p.methods.len()).sum();
            (ctx.diagnostics, plans.len(), methods)
        }
        Err(report) => {
            let Some(error) = report.downcast_ref::<GenerationError>() else {
                return Err(report);
            };
            let mut diagnostics = snapshots
                .snapshots()?
                .pop()
                .map(|s| s.diagnostics)
                .unwrap_or_default();
            diagnostics.push(Diagnostic::from_error("check", error));
            (diagnostics, 0, 0)
        }
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for diag in &diagnostics {
        match diag.severity {
            Severity::Error => errors.push(diag.to_string()),
            Severity::Warning => warnings.push(diag.to_string()),
        }
    }

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        contracts,
        methods,
        errors,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing::{REPO, project};

    #[test]
    fn test_check_valid_project() {
        let (_temp, toml) = project(REPO);
        let report = check(&toml, toml.path()).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.contracts, 1);
        assert_eq!(report.methods, 2);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_check_reports_fatal_error() {
        let repo = r#"
#[repository]
pub trait UserRepository: Repository<crate::model::User> {
    #[query("from User")]
    fn all(&self) -> Uni<Option<User>>;
}
"#;
        let (_temp, toml) = project(repo);
        let report = check(&toml, toml.path()).unwrap();

        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("error[invalid-return-shape]"));
    }

    #[test]
    fn test_check_reports_warnings() {
        let repo = r#"
#[repository]
pub trait UserRepository: Repository<crate::model::User> {
    #[query("from User u where u.id = :id")]
    fn find(&self, id: i64) -> Uni<crate::model::User>;
}
"#;
        let (_temp, toml) = project(repo);
        let report = check(&toml, toml.path()).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("warning[unbound-parameter]"));
    }
}
