//! List operation - repository contracts and their query methods.

use eyre::{Context, Result};
use repogen_codegen::{
    pipeline::Pipeline,
    synth::{dispatch_for, impl_name},
};
use repogen_manifest::RepogenToml;

use crate::reports::{ContractInfo, ListReport, MethodInfo};

/// Execute the list operation.
pub fn list(toml: &RepogenToml) -> Result<ListReport> {
    let manifest = toml.manifest();
    let registry = super::scan(toml)?;
    let ctx = Pipeline::new()
        .run(manifest.clone(), registry)
        .wrap_err("Pipeline failed")?;

    let contracts = ctx
        .plans
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|plan| {
            let repository = &plan.repository;
            ContractInfo {
                contract: repository.contract.to_string(),
                entity: repository.entity.name.to_string(),
                implementation: impl_name(&repository.contract, &manifest.codegen.impl_suffix)
                    .to_string(),
                methods: plan
                    .query_methods()
                    .map(|method| MethodInfo {
                        name: method.name.clone(),
                        shape: method.shape,
                        dispatch: dispatch_for(method.shape, &manifest.runtime).to_string(),
                        bindings: method.bindings.iter().map(|b| b.bind_name.clone()).collect(),
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(ListReport {
        project: manifest.project.name.clone(),
        contracts,
    })
}

#[cfg(test)]
mod tests {
    use repogen_ir::ReturnShape;

    use super::*;
    use crate::ops::testing::{REPO, project};

    #[test]
    fn test_list_contracts() {
        let (_temp, toml) = project(REPO);
        let report = list(&toml).unwrap();

        assert_eq!(report.project, "users");
        assert_eq!(report.contracts.len(), 1);

        let contract = &report.contracts[0];
        assert_eq!(contract.contract, "repo::UserRepository");
        assert_eq!(contract.entity, "model::User");
        assert_eq!(contract.implementation, "repo::UserRepositoryImpl");

        let methods: Vec<(&str, ReturnShape, &str)> = contract
            .methods
            .iter()
            .map(|m| (m.name.as_str(), m.shape, m.dispatch.as_str()))
            .collect();
        assert_eq!(
            methods,
            vec![
                ("find_by_last_name", ReturnShape::List, "select_multiple"),
                ("find_newest", ReturnShape::Single, "select"),
            ]
        );
        assert_eq!(contract.methods[0].bindings, vec!["lastName"]);
    }

    #[test]
    fn test_list_empty_project() {
        let (_temp, toml) = project("pub struct Nothing;\n");
        let report = list(&toml).unwrap();
        assert!(report.contracts.is_empty());
    }
}
