//! Introspection of Rust sources.
//!
//! Parses `.rs` files with `syn` and lowers traits, structs, enums and
//! unions into [`repogen_ir::TypeDecl`]s. This is the only crate that
//! knows about `syn`; everything downstream works on the portable model.

mod discover;
mod error;
mod parse;
mod types;

use std::path::PathBuf;

pub use discover::{discover_sources, module_path_for};
pub use error::{Error, Result};
pub use parse::{MarkerNames, parse_source};
use repogen_ir::TypeDecl;
pub use types::convert_type;

/// Scan every source root and return the declarations found.
///
/// Roots are visited in the given order and files within a root in sorted
/// path order, so the result is stable across runs.
pub fn scan(roots: &[PathBuf], markers: &MarkerNames) -> Result<Vec<TypeDecl>> {
    let mut decls = Vec::new();

    for root in roots {
        for file in discover_sources(root)? {
            let content = std::fs::read_to_string(&file).map_err(|source| Error::Io {
                path: file.clone(),
                source,
            })?;
            let module = module_path_for(root, &file);
            let path = file.display().to_string();
            let found = parse_source(&content, &path, &module, markers)?;
            tracing::debug!(file = %path, declarations = found.len(), "parsed source file");
            decls.extend(found);
        }
    }

    Ok(decls)
}
