//! Type-metadata declarations.
//!
//! A [`TypeDecl`] is everything the generator needs to know about one type
//! declared in the sources: what it is, which markers it carries, which
//! contracts it extends, which names its scope imports and, for
//! interfaces, its methods.

use std::fmt;

use serde::Serialize;

use crate::{QualifiedName, TypeRef};

/// Whether a declaration is an interface (trait) or a concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Interface,
    Concrete,
}

/// Source position of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Origin {
    pub file: String,
    pub line: usize,
}

impl Origin {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A marker (annotation) attached to a declaration, method or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Marker {
    pub name: String,
    pub value: Option<String>,
}

impl Marker {
    /// A marker without a value, e.g. `#[repository]`.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// A marker carrying a string value, e.g. `#[query("...")]`.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

fn find_marker<'a>(markers: &'a [Marker], name: &str) -> Option<&'a Marker> {
    markers.iter().find(|m| m.name == name)
}

/// A name brought into scope by a `use` item.
///
/// `path` is kept as written (`crate::model::User`, `super::dto`,
/// `uuid::Uuid`). A glob import has no alias; its path names the module
/// whose items it imports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Import {
    pub alias: Option<String>,
    pub path: Vec<String>,
}

fn split_path(path: &str) -> Vec<String> {
    path.split("::")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Import {
    /// `use {path} as {alias};`
    pub fn new(alias: impl Into<String>, path: &str) -> Self {
        Self {
            alias: Some(alias.into()),
            path: split_path(path),
        }
    }

    /// `use {path};`, imported under its last segment.
    pub fn named(path: &str) -> Self {
        let path = split_path(path);
        Self {
            alias: path.last().cloned(),
            path,
        }
    }

    /// `use {module}::*;`
    pub fn glob(module: &str) -> Self {
        Self {
            alias: None,
            path: split_path(module),
        }
    }

    pub fn is_glob(&self) -> bool {
        self.alias.is_none()
    }

    /// Rewrite `segments` through this import when its first segment is
    /// the imported alias.
    pub fn expand(&self, segments: &[String]) -> Option<Vec<String>> {
        let (first, rest) = segments.split_first()?;
        if self.alias.as_ref() != Some(first) {
            return None;
        }
        let mut expanded = self.path.clone();
        expanded.extend(rest.iter().cloned());
        Some(expanded)
    }
}

/// Rewrite `segments` through the first matching non-glob import.
///
/// Paths anchored at `crate`, `self` or `super` never go through imports.
pub fn expand_imports(segments: &[String], imports: &[Import]) -> Option<Vec<String>> {
    match segments.first().map(String::as_str) {
        None | Some("crate") | Some("self") | Some("super") => None,
        Some(_) => imports.iter().find_map(|import| import.expand(segments)),
    }
}

/// How a method takes `self`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
    Owned,
    Ref,
    RefMut,
    /// `self: Box<Self>`, `self: Arc<Self>` and the like.
    Typed(TypeRef),
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Receiver::Owned => write!(f, "self"),
            Receiver::Ref => write!(f, "&self"),
            Receiver::RefMut => write!(f, "&mut self"),
            Receiver::Typed(ty) => write!(f, "self: {}", ty),
        }
    }
}

/// A declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDecl {
    pub name: String,
    pub ty: TypeRef,
    pub markers: Vec<Marker>,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            markers: Vec::new(),
        }
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn find_marker(&self, name: &str) -> Option<&Marker> {
        find_marker(&self.markers, name)
    }
}

/// A declared method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDecl {
    pub name: String,
    pub markers: Vec<Marker>,
    pub receiver: Option<Receiver>,
    pub params: Vec<ParamDecl>,
    /// `None` when the method returns nothing.
    pub return_type: Option<TypeRef>,
    /// The method carries a default body in its declaration.
    pub has_default_body: bool,
    pub is_async: bool,
    /// The method declares generic parameters or a where-clause.
    pub has_generics: bool,
    pub origin: Option<Origin>,
}

impl MethodDecl {
    /// A `&self` method with no parameters, no return type and no body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
            receiver: Some(Receiver::Ref),
            params: Vec::new(),
            return_type: None,
            has_default_body: false,
            is_async: false,
            has_generics: false,
            origin: None,
        }
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn receiver(mut self, receiver: Option<Receiver>) -> Self {
        self.receiver = receiver;
        self
    }

    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_default_body(mut self) -> Self {
        self.has_default_body = true;
        self
    }

    pub fn asyncness(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }

    pub fn generic(mut self, has_generics: bool) -> Self {
        self.has_generics = has_generics;
        self
    }

    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn find_marker(&self, name: &str) -> Option<&Marker> {
        find_marker(&self.markers, name)
    }
}

/// A declared type: a trait, struct, enum or union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDecl {
    pub name: String,
    /// Module path from the crate root, without a leading `crate`.
    pub module_path: Vec<String>,
    pub kind: DeclKind,
    pub markers: Vec<Marker>,
    /// Declared supertypes, in declaration order.
    pub supertypes: Vec<TypeRef>,
    pub methods: Vec<MethodDecl>,
    /// `use` items in scope where the type is declared.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Import>,
    pub origin: Option<Origin>,
}

impl TypeDecl {
    fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            module_path: Vec::new(),
            kind,
            markers: Vec::new(),
            supertypes: Vec::new(),
            methods: Vec::new(),
            imports: Vec::new(),
            origin: None,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Interface)
    }

    pub fn concrete(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Concrete)
    }

    /// Place the declaration in a `::`-separated module; `""` is the crate root.
    pub fn in_module(mut self, module: &str) -> Self {
        self.module_path = split_path(module);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn extends(mut self, supertype: TypeRef) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == DeclKind::Interface
    }

    pub fn find_marker(&self, name: &str) -> Option<&Marker> {
        find_marker(&self.markers, name)
    }

    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(self.module_path.clone(), self.name.clone())
    }
}
