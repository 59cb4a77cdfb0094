//! Lowering of parsed Rust items into declarations.

use repogen_ir::{Import, Marker, MethodDecl, Origin, ParamDecl, Receiver, TypeDecl, TypeRef};
use syn::{
    Attribute, FnArg, Item, ItemTrait, LitStr, Pat, ReturnType, TraitItem, TraitItemFn,
    TypeParamBound, UseTree, spanned::Spanned,
};

use crate::{Error, Result, types};

/// Attribute names recognized as markers.
///
/// Attributes are matched by the last segment of their path, so
/// `#[repogen::query("..")]` counts as `query`. Other attributes are ignored.
#[derive(Debug, Clone)]
pub struct MarkerNames {
    pub repository: String,
    pub query: String,
    pub bind: String,
}

impl MarkerNames {
    pub fn new(
        repository: impl Into<String>,
        query: impl Into<String>,
        bind: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            query: query.into(),
            bind: bind.into(),
        }
    }

    fn requires_value(&self, name: &str) -> bool {
        name == self.query || name == self.bind
    }

    fn is_marker(&self, name: &str) -> bool {
        name == self.repository || self.requires_value(name)
    }
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self::new("repository", "query", "bind")
    }
}

/// Parse one source file into declarations.
///
/// `module_path` is the module the file's top-level items live in; inline
/// `mod` blocks extend it.
pub fn parse_source(
    content: &str,
    file: &str,
    module_path: &[String],
    markers: &MarkerNames,
) -> Result<Vec<TypeDecl>> {
    let ast = syn::parse_file(content).map_err(|source| Error::Parse {
        file: file.to_string(),
        line: source.span().start().line,
        source,
    })?;

    let lowering = Lowering { file, markers };
    let mut decls = Vec::new();
    lowering.items(&ast.items, module_path, &mut decls)?;
    Ok(decls)
}

struct Lowering<'a> {
    file: &'a str,
    markers: &'a MarkerNames,
}

impl Lowering<'_> {
    fn items(&self, items: &[Item], module: &[String], out: &mut Vec<TypeDecl>) -> Result<()> {
        let mut imports = Vec::new();
        for item in items {
            if let Item::Use(item) = item {
                flatten_use(&item.tree, &mut Vec::new(), &mut imports);
            }
        }

        for item in items {
            match item {
                Item::Trait(item) => out.push(self.interface(item, module, &imports)?),
                Item::Struct(item) => out.push(self.concrete(&item.ident, &item.attrs, module)?),
                Item::Enum(item) => out.push(self.concrete(&item.ident, &item.attrs, module)?),
                Item::Union(item) => out.push(self.concrete(&item.ident, &item.attrs, module)?),
                Item::Type(item) => out.push(self.concrete(&item.ident, &item.attrs, module)?),
                Item::Mod(item) => {
                    if let Some((_, nested)) = &item.content {
                        let mut inner = module.to_vec();
                        inner.push(item.ident.to_string());
                        self.items(nested, &inner, out)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn concrete(
        &self,
        ident: &syn::Ident,
        attrs: &[Attribute],
        module: &[String],
    ) -> Result<TypeDecl> {
        let mut decl = TypeDecl::concrete(ident.to_string())
            .origin(self.origin(ident.span()))
            .in_module(&module.join("::"));
        decl.markers = self.markers_of(attrs)?;
        Ok(decl)
    }

    fn interface(
        &self,
        item: &ItemTrait,
        module: &[String],
        imports: &[Import],
    ) -> Result<TypeDecl> {
        let mut decl = TypeDecl::interface(item.ident.to_string())
            .origin(self.origin(item.ident.span()))
            .in_module(&module.join("::"));
        decl.markers = self.markers_of(&item.attrs)?;
        decl.imports = imports.to_vec();

        for bound in &item.supertraits {
            if let TypeParamBound::Trait(bound) = bound {
                let supertype = types::convert_path(&bound.path).unwrap_or_else(|| {
                    TypeRef::Opaque {
                        text: quote::ToTokens::to_token_stream(&bound.path).to_string(),
                    }
                });
                decl.supertypes.push(supertype);
            }
        }

        for trait_item in &item.items {
            if let TraitItem::Fn(method) = trait_item {
                decl.methods.push(self.method(method)?);
            }
        }

        Ok(decl)
    }

    fn method(&self, method: &TraitItemFn) -> Result<MethodDecl> {
        let sig = &method.sig;
        let receiver = sig.receiver().map(|receiver| {
            match (&receiver.reference, receiver.mutability.is_some()) {
                _ if receiver.colon_token.is_some() => {
                    Receiver::Typed(types::convert_type(&receiver.ty))
                }
                (Some(_), true) => Receiver::RefMut,
                (Some(_), false) => Receiver::Ref,
                (None, _) => Receiver::Owned,
            }
        });
        let generics = &sig.generics;

        let mut decl = MethodDecl::new(sig.ident.to_string())
            .receiver(receiver)
            .asyncness(sig.asyncness.is_some())
            .generic(!generics.params.is_empty() || generics.where_clause.is_some())
            .origin(self.origin(sig.ident.span()));
        decl.markers = self.markers_of(&method.attrs)?;
        decl.has_default_body = method.default.is_some();

        for (index, input) in sig.inputs.iter().enumerate() {
            let FnArg::Typed(pat_type) = input else {
                continue;
            };
            let name = match pat_type.pat.as_ref() {
                Pat::Ident(pat) => pat.ident.to_string(),
                _ => format!("arg{}", index),
            };
            let mut param = ParamDecl::new(name, types::convert_type(&pat_type.ty));
            param.markers = self.markers_of(&pat_type.attrs)?;
            decl.params.push(param);
        }

        if let ReturnType::Type(_, ty) = &sig.output {
            decl.return_type = Some(types::convert_type(ty));
        }

        Ok(decl)
    }

    fn markers_of(&self, attrs: &[Attribute]) -> Result<Vec<Marker>> {
        let mut found = Vec::new();
        for attr in attrs {
            let Some(last) = attr.path().segments.last() else {
                continue;
            };
            let name = last.ident.to_string();
            if !self.markers.is_marker(&name) {
                continue;
            }

            if self.markers.requires_value(&name) {
                let value = attr.parse_args::<LitStr>().map_err(|_| Error::MalformedMarker {
                    file: self.file.to_string(),
                    line: attr.span().start().line,
                    marker: name.clone(),
                })?;
                found.push(Marker::with_value(name, value.value()));
            } else {
                found.push(Marker::flag(name));
            }
        }
        Ok(found)
    }

    fn origin(&self, span: proc_macro2::Span) -> Origin {
        Origin::new(self.file, span.start().line)
    }
}

/// Collect the names a `use` tree brings into scope.
///
/// `_` imports name nothing and are dropped.
fn flatten_use(tree: &UseTree, prefix: &mut Vec<String>, out: &mut Vec<Import>) {
    match tree {
        UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            flatten_use(&path.tree, prefix, out);
            prefix.pop();
        }
        UseTree::Name(name) => {
            let ident = name.ident.to_string();
            if ident == "self" {
                if let Some(module) = prefix.last() {
                    out.push(Import::new(module.clone(), &prefix.join("::")));
                }
            } else {
                let mut path = prefix.clone();
                path.push(ident.clone());
                out.push(Import::new(ident, &path.join("::")));
            }
        }
        UseTree::Rename(rename) => {
            let alias = rename.rename.to_string();
            if alias == "_" {
                return;
            }
            let ident = rename.ident.to_string();
            let mut path = prefix.clone();
            if ident != "self" {
                path.push(ident);
            }
            out.push(Import::new(alias, &path.join("::")));
        }
        UseTree::Glob(_) => out.push(Import::glob(&prefix.join("::"))),
        UseTree::Group(group) => {
            for tree in &group.items {
                flatten_use(tree, prefix, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use repogen_ir::DeclKind;

    use super::*;

    fn parse(src: &str) -> Vec<TypeDecl> {
        parse_source(src, "src/repo.rs", &["repo".to_string()], &MarkerNames::default()).unwrap()
    }

    #[test]
    fn test_parse_contract() {
        let decls = parse(
            r#"
            use crate::model::User;

            #[repository]
            pub trait UserRepository: Repository<User> + Send {
                #[query("from User u where u.lastName = :lastName")]
                fn find_by_last_name(&self, #[bind("lastName")] last_name: String) -> Uni<Vec<User>>;
            }
            "#,
        );

        assert_eq!(decls.len(), 1);
        let contract = &decls[0];
        assert_eq!(contract.name, "UserRepository");
        assert_eq!(contract.kind, DeclKind::Interface);
        assert_eq!(contract.module_path, vec!["repo"]);
        assert!(contract.find_marker("repository").is_some());
        assert_eq!(contract.supertypes.len(), 2);
        assert_eq!(contract.supertypes[0].to_string(), "Repository<User>");
        assert_eq!(contract.origin.as_ref().map(|o| o.line), Some(5));

        let method = &contract.methods[0];
        assert_eq!(method.name, "find_by_last_name");
        assert_eq!(method.receiver, Some(Receiver::Ref));
        assert_eq!(
            method.find_marker("query").and_then(|m| m.value.as_deref()),
            Some("from User u where u.lastName = :lastName")
        );
        assert_eq!(method.params.len(), 1);
        assert_eq!(method.params[0].name, "last_name");
        assert_eq!(method.params[0].ty.to_string(), "String");
        assert_eq!(
            method.params[0]
                .find_marker("bind")
                .and_then(|m| m.value.as_deref()),
            Some("lastName")
        );
        assert_eq!(
            method.return_type.as_ref().map(ToString::to_string).as_deref(),
            Some("Uni<Vec<User>>")
        );
        assert!(!method.has_default_body);
        assert!(!method.is_async);
    }

    #[test]
    fn test_parse_default_body_and_async() {
        let decls = parse(
            r#"
            trait T {
                fn with_body(&self) -> u8 { 1 }
                async fn later(&mut self);
                fn consume(self);
                fn assoc();
                fn boxed(self: Box<Self>);
                fn find<T: Into<String>>(&self, n: T);
                fn clause(&self, n: u8) where Self: Sized;
            }
            "#,
        );

        let methods = &decls[0].methods;
        assert_eq!(
            methods[4].receiver,
            Some(Receiver::Typed(TypeRef::generic(
                "Box",
                vec![TypeRef::named("Self")]
            )))
        );
        assert!(!methods[4].has_generics);
        assert!(methods[5].has_generics);
        assert!(methods[6].has_generics);
        assert!(methods[0].has_default_body);
        assert!(methods[1].is_async);
        assert_eq!(methods[1].receiver, Some(Receiver::RefMut));
        assert!(methods[1].return_type.is_none());
        assert_eq!(methods[2].receiver, Some(Receiver::Owned));
        assert_eq!(methods[3].receiver, None);
    }

    #[test]
    fn test_use_items_become_imports() {
        let decls = parse(
            r#"
            use crate::model::User;
            use std::collections::{self, HashMap};
            use super::dto::User as UserDto;
            use chrono::prelude::*;
            use std::fmt::Write as _;

            #[repository]
            pub trait UserRepository: Repository<User> {}

            mod inner {
                use uuid::Uuid;
                pub trait Nested {}
            }
            "#,
        );

        let imports = &decls[0].imports;
        assert_eq!(
            imports,
            &vec![
                Import::named("crate::model::User"),
                Import::new("collections", "std::collections"),
                Import::named("std::collections::HashMap"),
                Import::new("UserDto", "super::dto::User"),
                Import::glob("chrono::prelude"),
            ]
        );
        assert_eq!(decls[1].imports, vec![Import::named("uuid::Uuid")]);
    }

    #[test]
    fn test_type_alias_is_concrete() {
        let decls = parse("pub type UserId = i64;");
        assert_eq!(decls[0].name, "UserId");
        assert_eq!(decls[0].kind, DeclKind::Concrete);
    }

    #[test]
    fn test_parse_concrete_types() {
        let decls = parse(
            r#"
            #[derive(Debug)]
            pub struct User { id: i64 }
            pub enum Status { Active }
            #[repository]
            pub struct NotATrait;
            "#,
        );

        assert_eq!(decls.len(), 3);
        assert!(decls.iter().all(|d| d.kind == DeclKind::Concrete));
        assert!(decls[0].markers.is_empty());
        assert!(decls[2].find_marker("repository").is_some());
    }

    #[test]
    fn test_parse_inline_modules() {
        let decls = parse(
            r#"
            mod entities {
                pub mod people {
                    pub struct User;
                }
            }
            "#,
        );

        assert_eq!(decls[0].qualified_name().to_string(), "repo::entities::people::User");
    }

    #[test]
    fn test_marker_matched_by_last_segment() {
        let decls = parse(
            r#"
            #[repogen::repository]
            trait R {
                #[repogen::query("q")]
                fn m(&self) -> Uni<User>;
            }
            "#,
        );

        assert!(decls[0].find_marker("repository").is_some());
        assert!(decls[0].methods[0].find_marker("query").is_some());
    }

    #[test]
    fn test_unrelated_attributes_ignored() {
        let decls = parse(
            r#"
            /// Docs
            #[allow(dead_code)]
            trait R {
                #[doc = "x"]
                fn m(&self);
            }
            "#,
        );

        assert!(decls[0].markers.is_empty());
        assert!(decls[0].methods[0].markers.is_empty());
    }

    #[test]
    fn test_custom_marker_names() {
        let markers = MarkerNames::new("repo", "sql", "param");
        let decls = parse_source(
            r#"
            #[repo]
            trait R {
                #[sql("select 1")]
                fn m(&self, #[param("id")] id: i64) -> Uni<User>;
            }
            "#,
            "lib.rs",
            &[],
            &markers,
        )
        .unwrap();

        assert!(decls[0].find_marker("repo").is_some());
        assert!(decls[0].methods[0].find_marker("sql").is_some());
        assert!(decls[0].methods[0].params[0].find_marker("param").is_some());
    }

    #[test]
    fn test_malformed_query_marker() {
        let err = parse_source(
            "trait R {\n    #[query]\n    fn m(&self);\n}",
            "src/repo.rs",
            &[],
            &MarkerNames::default(),
        )
        .unwrap_err();

        match err {
            Error::MalformedMarker { marker, line, .. } => {
                assert_eq!(marker, "query");
                assert_eq!(line, 2);
            }
            other => panic!("expected malformed marker, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_bind_marker() {
        let err = parse_source(
            "trait R { fn m(&self, #[bind(42)] id: i64); }",
            "src/repo.rs",
            &[],
            &MarkerNames::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::MalformedMarker { ref marker, .. } if marker == "bind"));
    }

    #[test]
    fn test_pattern_parameter_named_by_position() {
        let decls = parse("trait R { fn m(&self, (a, b): (i64, i64)); }");
        assert_eq!(decls[0].methods[0].params[0].name, "arg1");
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_source("trait R {", "src/bad.rs", &[], &MarkerNames::default())
            .unwrap_err();
        assert!(matches!(err, Error::Parse { ref file, .. } if file == "src/bad.rs"));
    }
}
