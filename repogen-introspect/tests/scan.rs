//! Scanning whole source trees.

use std::fs;

use repogen_introspect::{Error, MarkerNames, scan};
use repogen_ir::{DeclKind, TypeRegistry, TypeRef};
use tempfile::TempDir;

fn write(root: &std::path::Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    write(&src, "lib.rs", "pub mod dto;\npub mod model;\npub mod repo;\n");
    write(&src, "dto.rs", "pub struct User { pub name: String }\n");
    write(
        &src,
        "model.rs",
        "pub struct User { pub id: i64 }\npub struct Order;\n",
    );
    write(
        &src,
        "repo/mod.rs",
        r#"
use crate::model::User;

#[repository]
pub trait UserRepository: Repository<User> {
    #[query("from User u where u.lastName = :lastName")]
    fn find_by_last_name(&self, #[bind("lastName")] last_name: String) -> Uni<Vec<User>>;
}
"#,
    );
    write(
        &src,
        "repo/orders.rs",
        r#"
#[repository]
pub trait OrderRepository: Repository<crate::model::Order> {}
"#,
    );
    temp
}

#[test]
fn test_scan_assigns_module_paths() {
    let temp = project();
    let decls = scan(&[temp.path().join("src")], &MarkerNames::default()).unwrap();

    let names: Vec<String> = decls
        .iter()
        .map(|d| d.qualified_name().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "dto::User",
            "model::User",
            "model::Order",
            "repo::UserRepository",
            "repo::orders::OrderRepository",
        ]
    );
}

#[test]
fn test_scan_feeds_registry_resolution() {
    let temp = project();
    let registry: TypeRegistry = scan(&[temp.path().join("src")], &MarkerNames::default())
        .unwrap()
        .into_iter()
        .collect();

    let contracts: Vec<_> = registry.marked("repository").collect();
    assert_eq!(contracts.len(), 2);
    assert!(contracts.iter().all(|d| d.kind == DeclKind::Interface));

    let user_repo = contracts[0];
    let entity = &user_repo.supertypes[0].args()[0];
    let resolved = registry
        .resolve(entity, &user_repo.module_path, &user_repo.imports)
        .unwrap();
    assert_eq!(resolved.to_string(), "model::User");

    let order_repo = contracts[1];
    let resolved = registry
        .resolve(
            &order_repo.supertypes[0].args()[0],
            &order_repo.module_path,
            &order_repo.imports,
        )
        .unwrap();
    assert_eq!(resolved.to_string(), "model::Order");
}

#[test]
fn test_scan_is_deterministic() {
    let temp = project();
    let roots = [temp.path().join("src")];
    let first = scan(&roots, &MarkerNames::default()).unwrap();
    let second = scan(&roots, &MarkerNames::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_scan_records_origin() {
    let temp = project();
    let decls = scan(&[temp.path().join("src")], &MarkerNames::default()).unwrap();

    let contract = decls.iter().find(|d| d.name == "UserRepository").unwrap();
    let origin = contract.origin.as_ref().unwrap();
    assert!(origin.file.ends_with("mod.rs"));
    assert_eq!(origin.line, 5);
    assert_eq!(
        contract.methods[0].return_type,
        Some(TypeRef::generic(
            "Uni",
            vec![TypeRef::generic("Vec", vec![TypeRef::named("User")])]
        ))
    );
}

#[test]
fn test_scan_reports_parse_errors_with_file() {
    let temp = project();
    write(&temp.path().join("src"), "broken.rs", "pub struct {");

    let err = scan(&[temp.path().join("src")], &MarkerNames::default()).unwrap_err();
    match err {
        Error::Parse { file, .. } => assert!(file.ends_with("broken.rs")),
        other => panic!("expected parse error, got {other:?}"),
    }
}
