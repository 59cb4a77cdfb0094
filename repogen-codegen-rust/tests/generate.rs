//! End-to-end generation: Rust sources in, Rust sources out.

use std::fs;

use repogen_codegen::{analysis::build_registry, pipeline::Pipeline};
use repogen_codegen_rust::{Generator, LanguageCodegen, PreviewFile};
use repogen_core::GENERATED_HEADER;
use repogen_introspect::{MarkerNames, convert_type, parse_source};
use repogen_manifest::Manifest;
use tempfile::TempDir;

const MODEL: &str = r#"
pub struct User {
    pub id: i64,
    pub last_name: String,
}

pub struct Order;
"#;

const REPO: &str = r#"
use crate::model::User;

#[repository]
pub trait UserRepository: Repository<User> {
    #[query("from User u where u.lastName = :lastName")]
    fn find_by_last_name(&self, #[bind("lastName")] last_name: String) -> Uni<Vec<User>>;

    #[query("from User u order by u.id desc")]
    fn find_newest(&self) -> Uni<User>;

    fn describe(&self) -> String {
        String::from("users")
    }
}

pub mod orders {
    #[repository]
    pub trait OrderRepository: Repository<crate::model::Order> {
        #[query("from Order o where o.owner = :owner and o.state = :state")]
        fn find_for_owner(
            &self,
            #[bind("owner")] owner: i64,
            #[bind("state")] state: String,
        ) -> Uni<Vec<crate::model::Order>>;
    }
}
"#;

fn generator(manifest: Manifest, sources: &[(&str, &str)]) -> eyre::Result<Generator> {
    let markers = MarkerNames::default();
    let mut decls = Vec::new();
    for (module, content) in sources {
        let module: Vec<String> = module
            .split("::")
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        decls.extend(parse_source(content, "src/lib.rs", &module, &markers)?);
    }

    let registry = build_registry(&manifest, decls);
    let ctx = Pipeline::new().run(manifest, registry)?;
    Generator::from_context(&ctx)
}

fn preview() -> Vec<PreviewFile> {
    generator(Manifest::new("users"), &[("model", MODEL), ("repo", REPO)])
        .unwrap()
        .preview()
}

fn file<'a>(files: &'a [PreviewFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{} not generated", path))
}

#[test]
fn test_file_layout() {
    let files = preview();
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "mod.rs",
            "repo/mod.rs",
            "repo/orders/mod.rs",
            "repo/user_repository_impl.rs",
            "repo/orders/order_repository_impl.rs",
        ]
    );
}

#[test]
fn test_generated_files_are_valid_rust() {
    for file in preview() {
        assert!(file.content.starts_with(GENERATED_HEADER), "{}", file.path);
        if let Err(err) = syn::parse_file(&file.content) {
            panic!("{} does not parse: {}\n{}", file.path, err, file.content);
        }
    }
}

#[test]
fn test_module_files() {
    let files = preview();
    insta::assert_snapshot!(file(&files, "repo/mod.rs"), @r#"
    // @generated by repogen. Do not edit by hand.

    pub mod orders;

    mod user_repository_impl;

    pub use user_repository_impl::UserRepositoryImpl;
    "#);
    assert!(file(&files, "mod.rs").ends_with("pub mod repo;\n"));
}

#[test]
fn test_only_query_methods_are_emitted() {
    let files = preview();
    let content = file(&files, "repo/user_repository_impl.rs");
    assert!(content.contains("fn find_by_last_name(&self, last_name: String) -> Uni<Vec<User>> {"));
    assert!(content.contains("fn find_newest(&self) -> Uni<User> {"));
    assert!(!content.contains("describe"));
}

#[test]
fn test_bindings_in_declaration_order() {
    let files = preview();
    let content = file(&files, "repo/orders/order_repository_impl.rs");
    assert!(content.contains("use crate::model::Order;\nuse crate::repo::orders::OrderRepository;\n"));
    assert!(content.contains(
        "fn find_for_owner(&self, owner: i64, state: String) -> Uni<Vec<Order>> {"
    ));
    assert!(content.contains(
        r#"self.base.select_multiple(QUERY, vec![Param::of("owner", owner), Param::of("state", state)])"#
    ));
}

#[test]
fn test_preview_is_deterministic() {
    assert_eq!(preview(), preview());
}

#[test]
fn test_generate_writes_then_reports_unchanged() {
    let temp = TempDir::new().unwrap();
    let generator = generator(Manifest::new("users"), &[("model", MODEL), ("repo", REPO)]).unwrap();

    let first = generator.generate(temp.path()).unwrap();
    assert_eq!(first.written.len(), 5);
    assert!(first.unchanged.is_empty());

    let written = fs::read_to_string(temp.path().join("repo/user_repository_impl.rs")).unwrap();
    assert_eq!(written, file(&generator.preview(), "repo/user_repository_impl.rs"));

    let second = generator.generate(temp.path()).unwrap();
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged.len(), 5);
}

#[test]
fn test_generate_leaves_hand_written_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("mod.rs"), "// hand-written\n").unwrap();

    let result = generator(Manifest::new("users"), &[("model", MODEL), ("repo", REPO)])
        .unwrap()
        .generate(temp.path())
        .unwrap();

    assert_eq!(result.skipped, vec!["mod.rs".to_string()]);
    assert_eq!(result.total(), 5);
    assert_eq!(
        fs::read_to_string(temp.path().join("mod.rs")).unwrap(),
        "// hand-written\n"
    );
}

#[test]
fn test_failure_emits_nothing() {
    let broken = r#"
#[repository]
pub trait BrokenRepository: Repository<crate::model::User> {
    #[query("from User")]
    fn all(&self) -> Uni<std::collections::HashMap<i64, User>>;
}
"#;

    let err = match generator(
        Manifest::new("users"),
        &[("model", MODEL), ("repo", REPO), ("broken", broken)],
    ) {
        Ok(_) => panic!("generation should fail"),
        Err(err) => err,
    };
    let err = err
        .downcast_ref::<repogen_codegen::GenerationError>()
        .expect("typed generation error");
    assert_eq!(err.kind(), "invalid-return-shape");
}

#[test]
fn test_empty_project_still_has_root_module() {
    let files = generator(Manifest::new("empty"), &[("model", MODEL)])
        .unwrap()
        .preview();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "mod.rs");
}

const DTO: &str = r#"
pub struct User {
    pub name: String,
}
"#;

const IMPORTING_REPO: &str = r#"
use std::collections::HashMap;

use chrono::prelude::*;
use uuid::Uuid;

use crate::model::User;

#[repository]
pub trait UserRepository: Repository<User> {
    #[query("from User u where u.id = :id and u.tags = :tags")]
    fn by_id(&self, #[bind("id")] id: Uuid, #[bind("tags")] tags: HashMap<String, i64>) -> Uni<User>;

    #[query("from User u where u.born = :born")]
    fn born_on(self: Box<Self>, #[bind("born")] born: NaiveDate) -> Uni<Vec<User>>;
}
"#;

/// Parameter types of `method` in the emitted trait impl, as re-parsed.
fn emitted_param_types(content: &str, method: &str) -> Vec<String> {
    let file = syn::parse_file(content).unwrap();
    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Impl(item) if item.trait_.is_some() => Some(item),
            _ => None,
        })
        .flat_map(|item| &item.items)
        .find_map(|item| match item {
            syn::ImplItem::Fn(f) if f.sig.ident == method => Some(f),
            _ => None,
        })
        .unwrap_or_else(|| panic!("{} not emitted", method))
        .sig
        .inputs
        .iter()
        .map(|input| match input {
            syn::FnArg::Receiver(receiver) => convert_type(&receiver.ty).to_string(),
            syn::FnArg::Typed(pat_type) => convert_type(&pat_type.ty).to_string(),
        })
        .collect()
}

#[test]
fn test_imported_entity_wins_over_same_named_type() {
    let files = generator(
        Manifest::new("users"),
        &[("dto", DTO), ("model", MODEL), ("repo", IMPORTING_REPO)],
    )
    .unwrap()
    .preview();

    let content = file(&files, "repo/user_repository_impl.rs");
    assert!(content.contains("use crate::model::User;\nuse crate::repo::UserRepository;\n"));
    assert!(!content.contains("dto"));
}

#[test]
fn test_imported_signature_types_resolve_from_emitted_file() {
    let files = generator(
        Manifest::new("users"),
        &[("dto", DTO), ("model", MODEL), ("repo", IMPORTING_REPO)],
    )
    .unwrap()
    .preview();
    let content = file(&files, "repo/user_repository_impl.rs");

    assert_eq!(
        emitted_param_types(content, "by_id"),
        vec![
            "&Self",
            "uuid::Uuid",
            "std::collections::HashMap<String, i64>"
        ]
    );
    assert!(content.contains("use chrono::prelude::*;\n"));
    assert!(content.contains("fn born_on(self: Box<Self>, born: NaiveDate) -> Uni<Vec<User>> {"));
    assert_eq!(
        emitted_param_types(content, "born_on"),
        vec!["Box<Self>", "NaiveDate"]
    );
}

#[test]
fn test_generic_query_method_is_rejected() {
    let generic = r#"
#[repository]
pub trait NamedRepository: Repository<crate::model::User> {
    #[query("from User u where u.name = :n")]
    fn find<T: Into<String>>(&self, #[bind("n")] n: T) -> Uni<User>;
}
"#;

    let err = match generator(Manifest::new("users"), &[("model", MODEL), ("named", generic)]) {
        Ok(_) => panic!("generation should fail"),
        Err(err) => err,
    };
    let err = err
        .downcast_ref::<repogen_codegen::GenerationError>()
        .expect("typed generation error");
    assert_eq!(err.kind(), "unsupported-signature");
    assert_eq!(err.origin().map(|o| o.line), Some(5));
}
