//! Contract discovery and entity resolution.

use repogen_ir::{
    EntityType, QualifiedName, RepositoryDescriptor, TypeDecl, TypeRef, TypeRegistry,
};
use repogen_manifest::Manifest;

use crate::GenerationError;

/// Build the registry the extractor resolves against: every scanned
/// declaration plus the external entities listed in configuration.
pub fn build_registry(manifest: &Manifest, decls: impl IntoIterator<Item = TypeDecl>) -> TypeRegistry {
    let mut registry: TypeRegistry = decls.into_iter().collect();
    for entity in &manifest.runtime.entities {
        if let Some(name) = QualifiedName::parse(entity) {
            registry.insert_external(name);
        }
    }
    registry
}

/// Finds repository contracts and resolves the entity each one manages.
pub struct MetadataExtractor<'a> {
    registry: &'a TypeRegistry,
    repository_marker: &'a str,
    base_contract: &'a str,
}

impl<'a> MetadataExtractor<'a> {
    pub fn new(registry: &'a TypeRegistry, manifest: &'a Manifest) -> Self {
        Self {
            registry,
            repository_marker: &manifest.markers.repository,
            base_contract: &manifest.runtime.base_contract,
        }
    }

    /// Describe every marked declaration, in registry order.
    ///
    /// Stops at the first declaration that cannot be described.
    pub fn extract(&self) -> Result<Vec<RepositoryDescriptor>, GenerationError> {
        self.registry
            .marked(self.repository_marker)
            .map(|decl| self.describe(decl))
            .collect()
    }

    /// Describe one marked declaration.
    pub fn describe(&self, decl: &TypeDecl) -> Result<RepositoryDescriptor, GenerationError> {
        let contract = decl.qualified_name();

        if !decl.is_interface() {
            return Err(GenerationError::NotAnInterface {
                contract: contract.to_string(),
                origin: decl.origin.clone(),
            });
        }

        let entity = self
            .entity_of(decl)
            .map_err(|reason| GenerationError::UnresolvableEntityType {
                contract: contract.to_string(),
                reason,
                origin: decl.origin.clone(),
            })?;

        tracing::debug!(contract = %contract, entity = %entity, "extracted repository contract");

        Ok(RepositoryDescriptor {
            contract,
            entity: EntityType::new(entity),
            origin: decl.origin.clone(),
        })
    }

    fn entity_of(&self, decl: &TypeDecl) -> Result<QualifiedName, String> {
        let base = decl
            .supertypes
            .iter()
            .find(|ty| ty.is_named(self.base_contract))
            .ok_or_else(|| format!("it does not extend `{}<Entity>`", self.base_contract))?;

        let argument = single_argument(base, self.base_contract)?;

        self.registry
            .resolve(argument, &decl.module_path, &decl.imports)
            .map_err(|unresolved| format!("`{}`: {}", argument, unresolved))
    }
}

fn single_argument<'t>(base: &'t TypeRef, base_contract: &str) -> Result<&'t TypeRef, String> {
    match base.args() {
        [argument] => Ok(argument),
        args => Err(format!(
            "`{}` takes exactly one type argument, found {}",
            base_contract,
            args.len()
        )),
    }
}
