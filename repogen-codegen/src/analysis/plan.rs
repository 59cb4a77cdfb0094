//! Per-contract planning of query methods.

use repogen_ir::{
    ContractPlan, MethodDecl, PlannedMethod, QueryMethodDescriptor, RepositoryDescriptor, TypeDecl,
};
use repogen_manifest::Manifest;

use super::{ParameterBinder, ReturnShapeClassifier};
use crate::GenerationError;

/// Turns a described contract into a [`ContractPlan`].
pub struct ContractAnalyzer<'a> {
    query_marker: &'a str,
    classifier: ReturnShapeClassifier<'a>,
    binder: ParameterBinder<'a>,
}

impl<'a> ContractAnalyzer<'a> {
    pub fn new(manifest: &'a Manifest) -> Self {
        Self {
            query_marker: &manifest.markers.query,
            classifier: ReturnShapeClassifier::new(&manifest.runtime.monad, &manifest.runtime.list),
            binder: ParameterBinder::new(&manifest.markers.bind),
        }
    }

    /// Plan every query method of `decl`, in declaration order.
    ///
    /// Methods without the query marker are left out. The first invalid
    /// query method aborts the plan.
    pub fn plan(
        &self,
        repository: RepositoryDescriptor,
        decl: &TypeDecl,
    ) -> Result<ContractPlan, GenerationError> {
        let mut methods = Vec::new();
        for method in &decl.methods {
            if method.find_marker(self.query_marker).is_none() {
                continue;
            }
            let descriptor = self.describe(&repository, method)?;
            tracing::trace!(
                contract = %repository.contract,
                method = %descriptor.name,
                shape = %descriptor.shape,
                bindings = descriptor.bindings.len(),
                "planned query method"
            );
            methods.push(PlannedMethod {
                descriptor,
                signature: method.clone(),
            });
        }

        Ok(ContractPlan {
            repository,
            methods,
        })
    }

    fn describe(
        &self,
        repository: &RepositoryDescriptor,
        method: &MethodDecl,
    ) -> Result<QueryMethodDescriptor, GenerationError> {
        let contract = || repository.contract.to_string();
        let origin = || method.origin.clone().or_else(|| repository.origin.clone());

        if method.has_default_body {
            return Err(GenerationError::ConflictingDefaultImplementation {
                contract: contract(),
                method: method.name.clone(),
                origin: origin(),
            });
        }

        let found = || {
            let ty = method
                .return_type
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "()".to_string());
            if method.is_async { format!("async {}", ty) } else { ty }
        };

        if method.is_async {
            return Err(GenerationError::InvalidReturnShape {
                contract: contract(),
                method: method.name.clone(),
                found: found(),
                reason: "query methods return the monad and must not be `async`".to_string(),
                origin: origin(),
            });
        }

        if method.has_generics {
            return Err(GenerationError::UnsupportedSignature {
                contract: contract(),
                method: method.name.clone(),
                reason: "generic parameters and where-clauses are not reproduced".to_string(),
                origin: origin(),
            });
        }

        let shape = self
            .classifier
            .classify(method.return_type.as_ref())
            .map_err(|mismatch| GenerationError::InvalidReturnShape {
                contract: contract(),
                method: method.name.clone(),
                found: found(),
                reason: mismatch.to_string(),
                origin: origin(),
            })?;

        if method.receiver.is_none() {
            return Err(GenerationError::MissingReceiver {
                contract: contract(),
                method: method.name.clone(),
                origin: origin(),
            });
        }

        let query = method
            .find_marker(self.query_marker)
            .and_then(|marker| marker.value.clone())
            .ok_or_else(|| GenerationError::MissingQuery {
                contract: contract(),
                method: method.name.clone(),
                origin: origin(),
            })?;

        Ok(QueryMethodDescriptor {
            name: method.name.clone(),
            query,
            shape,
            bindings: self.binder.bind(&method.params),
        })
    }
}
