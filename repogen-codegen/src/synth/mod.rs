//! Synthesis of repository implementations.
//!
//! [`ClassSynthesizer`] walks a [`ContractPlan`](repogen_ir::ContractPlan)
//! and drives a [`CodeSink`]: the emitted type, its constructor, and one
//! method per query method via [`MethodSynthesizer`]. Sinks decide what the
//! operations turn into; [`ModelSink`] records them as data, language
//! crates render source.

mod class;
mod method;
mod model;
mod qualify;
mod sink;

pub use class::ClassSynthesizer;
pub use method::{MethodSynthesizer, dispatch_for};
pub use model::{EmittedConstructor, EmittedMethod, EmittedType, ModelExpr, ModelSink};
pub use qualify::TypeQualifier;
use repogen_core::to_snake_case;
use repogen_ir::QualifiedName;
pub use sink::{Callee, CodeSink, ConstructorSpec, MethodSpec, Operand, ParamSpec, TypeSpec};

/// Name of the type emitted for `contract`: same module, suffixed name.
pub fn impl_name(contract: &QualifiedName, suffix: &str) -> QualifiedName {
    QualifiedName::new(
        contract.module_path.clone(),
        format!("{}{}", contract.name, suffix),
    )
}

/// Module path of the file holding `name`, relative to the output module.
///
/// Emitted files mirror the contract's module, so `repo::UserRepositoryImpl`
/// lives in `repo/user_repository_impl`.
pub fn module_file(name: &QualifiedName) -> Vec<String> {
    let mut path = name.module_path.clone();
    path.push(to_snake_case(&name.name));
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impl_name() {
        let contract = QualifiedName::parse("repo::UserRepository").unwrap();
        assert_eq!(
            impl_name(&contract, "Impl").to_string(),
            "repo::UserRepositoryImpl"
        );
        assert_eq!(impl_name(&contract, "Gen").name, "UserRepositoryGen");
    }

    #[test]
    fn test_module_file() {
        let name = QualifiedName::parse("repo::users::UserRepositoryImpl").unwrap();
        assert_eq!(
            module_file(&name),
            vec!["repo", "users", "user_repository_impl"]
        );
        let root = QualifiedName::parse("HTTPRepoImpl").unwrap();
        assert_eq!(module_file(&root), vec!["http_repo_impl"]);
    }
}
