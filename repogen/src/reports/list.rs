//! List command report data structures.

use repogen_ir::ReturnShape;

use super::output::{Output, Report};

/// Report data listing repository contracts.
#[derive(Debug)]
pub struct ListReport {
    /// Project name from the manifest.
    pub project: String,
    /// Contracts in the order they will be generated.
    pub contracts: Vec<ContractInfo>,
}

/// One repository contract.
#[derive(Debug)]
pub struct ContractInfo {
    pub contract: String,
    pub entity: String,
    /// The type generated for the contract.
    pub implementation: String,
    pub methods: Vec<MethodInfo>,
}

/// One query method.
#[derive(Debug)]
pub struct MethodInfo {
    pub name: String,
    pub shape: ReturnShape,
    /// Runtime operation the method dispatches to.
    pub dispatch: String,
    /// Bind names in declaration order.
    pub bindings: Vec<String>,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.contracts.is_empty() {
            out.preformatted(&format!("No repositories defined in {}", self.project));
            return;
        }

        out.key_value("Project", &self.project);
        out.section(&format!("Repositories ({})", self.contracts.len()));
        for contract in &self.contracts {
            out.list_item(&format!(
                "{} ({}) -> {}",
                contract.contract, contract.entity, contract.implementation
            ));
            for method in &contract.methods {
                let bindings = if method.bindings.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", method.bindings.join(", "))
                };
                out.nested_item(&format!(
                    "{} {} via {}{}",
                    method.name, method.shape, method.dispatch, bindings
                ));
            }
        }
    }
}
