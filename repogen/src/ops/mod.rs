//! Core operations.
//!
//! This module contains the business logic for repogen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod list;

pub use check::check;
pub use generate::{GenerateOptions, generate};
pub use list::list;

use eyre::{Context, Result};
use repogen_codegen::analysis::build_registry;
use repogen_introspect::MarkerNames;
use repogen_ir::TypeRegistry;
use repogen_manifest::RepogenToml;

/// Scan the configured source roots into a registry.
pub fn scan(toml: &RepogenToml) -> Result<TypeRegistry> {
    let markers = &toml.manifest().markers;
    let markers = MarkerNames::new(&markers.repository, &markers.query, &markers.bind);
    let roots = toml.source_paths();

    let decls = repogen_introspect::scan(&roots, &markers)
        .wrap_err("Failed to scan source files")?;
    tracing::debug!(
        roots = roots.len(),
        declarations = decls.len(),
        "scanned sources"
    );

    Ok(build_registry(toml.manifest(), decls))
}
