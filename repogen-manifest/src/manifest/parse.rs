//! Manifest parsing from files and strings.

use std::str::FromStr;

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "repogen.toml")
    }
}

impl Manifest {
    /// Parse a repogen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    let project = ctx.push("project");
    project.require_non_empty("name", &manifest.project.name)?;
    if manifest.project.sources.is_empty() {
        return Err(ctx
            .source_context()
            .validation_error("'project.sources' must list at least one path", None));
    }
    for source in &manifest.project.sources {
        project.require_non_empty("sources", source)?;
    }
    project.require_non_empty("output", &manifest.project.output)?;

    let markers = ctx.push("markers");
    markers.validate_identifier("repository", &manifest.markers.repository)?;
    markers.validate_identifier("query", &manifest.markers.query)?;
    markers.validate_identifier("bind", &manifest.markers.bind)?;

    let runtime = ctx.push("runtime");
    let rt = &manifest.runtime;
    runtime.validate_path("base_contract", &rt.base_contract)?;
    runtime.validate_path("base_type", &rt.base_type)?;
    runtime.validate_identifier("constructor", &rt.constructor)?;
    runtime.validate_path("context_type", &rt.context_type)?;
    runtime.validate_path("entity_constant", &rt.entity_constant)?;
    runtime.validate_path("binding", &rt.binding)?;
    runtime.validate_identifier("select", &rt.select)?;
    runtime.validate_identifier("select_multiple", &rt.select_multiple)?;
    runtime.validate_path("monad", &rt.monad)?;
    runtime.validate_path("list", &rt.list)?;
    for import in &rt.imports {
        runtime.require_non_empty("imports", import)?;
    }
    for entity in &rt.entities {
        runtime.validate_path("entities", entity)?;
    }

    if rt.select == rt.select_multiple {
        return Err(runtime.error_at(
            "select_multiple",
            &rt.select_multiple,
            "'runtime.select' and 'runtime.select_multiple' must differ",
        ));
    }

    let codegen = ctx.push("codegen");
    codegen.validate_identifier("impl_suffix", &manifest.codegen.impl_suffix)?;
    if !manifest.codegen.crate_root.is_empty() {
        codegen.validate_path("crate_root", &manifest.codegen.crate_root)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DuplicateBindPolicy;

    #[test]
    fn test_parse_full_manifest() {
        let manifest: Manifest = r#"
            [project]
            name = "users"
            sources = ["src", "domain"]
            output = "src/repos"

            [markers]
            repository = "repo"

            [runtime]
            base_type = "rt::Base"
            entities = ["shared::Invoice"]

            [codegen]
            impl_suffix = "Adapter"
            duplicate_bind_names = "deny"
        "#
        .parse()
        .unwrap();

        assert_eq!(manifest.project.sources, vec!["src", "domain"]);
        assert_eq!(manifest.markers.repository, "repo");
        assert_eq!(manifest.runtime.base_type, "rt::Base");
        assert_eq!(manifest.runtime.entities, vec!["shared::Invoice"]);
        assert_eq!(manifest.codegen.impl_suffix, "Adapter");
        assert_eq!(
            manifest.codegen.duplicate_bind_names,
            DuplicateBindPolicy::Deny
        );
    }

    #[test]
    fn test_empty_project_name() {
        let err = "[project]\nname = \"\"".parse::<Manifest>().unwrap_err();
        assert!(err.to_string().contains("project.name"));
    }

    #[test]
    fn test_empty_sources() {
        let err = "[project]\nname = \"x\"\nsources = []"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(err.to_string().contains("project.sources"));
    }

    #[test]
    fn test_invalid_marker_name() {
        let err = "[project]\nname = \"x\"\n[markers]\nquery = \"my-query\""
            .parse::<Manifest>()
            .unwrap_err();
        assert!(err.to_string().contains("markers.query"));
        match *err {
            Error::Validation { span, .. } => assert!(span.is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_select_must_differ() {
        let err = "[project]\nname = \"x\"\n[runtime]\nselect = \"fetch\"\nselect_multiple = \"fetch\""
            .parse::<Manifest>()
            .unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_invalid_entity_path() {
        let err = "[project]\nname = \"x\"\n[runtime]\nentities = [\"model::\"]"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(err.to_string().contains("runtime.entities"));
    }

    #[test]
    fn test_reserved_impl_suffix() {
        let err = "[project]\nname = \"x\"\n[codegen]\nimpl_suffix = \"impl\""
            .parse::<Manifest>()
            .unwrap_err();
        assert!(err.to_string().contains("codegen.impl_suffix"));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = "[project\nname = \"x\"".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_missing_project_section() {
        let err = "[codegen]\nimpl_suffix = \"Impl\""
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
