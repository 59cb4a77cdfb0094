//! Lookup of declared types by name.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::{DeclKind, Import, QualifiedName, TypeDecl, TypeRef, expand_imports};

/// Why a type reference could not be resolved to a concrete declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    /// Not a plain named type (reference, tuple, slice, ...).
    NotNamed,
    /// The named type itself carries generic arguments.
    Parameterized,
    /// `super` climbs above the crate root.
    OutsideCrate,
    /// No declaration with that name.
    NotFound,
    /// Several declarations share the simple name.
    Ambiguous(Vec<QualifiedName>),
    /// The name refers to an interface, not a concrete type.
    NotConcrete,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::NotNamed => write!(f, "not a named type"),
            Unresolved::Parameterized => write!(f, "the type is itself parameterized"),
            Unresolved::OutsideCrate => write!(f, "the path leaves the crate root"),
            Unresolved::NotFound => write!(f, "no such type is declared"),
            Unresolved::Ambiguous(candidates) => {
                let names: Vec<String> = candidates.iter().map(ToString::to_string).collect();
                write!(f, "the name is ambiguous between {}", names.join(", "))
            }
            Unresolved::NotConcrete => write!(f, "the type is an interface"),
        }
    }
}

/// All declarations visible to the generator, in discovery order.
///
/// Besides scanned declarations the registry knows *external* types:
/// entities declared outside the scanned sources and listed in
/// configuration. They resolve like concrete declarations but carry no
/// metadata.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    decls: IndexMap<QualifiedName, TypeDecl>,
    external: IndexSet<QualifiedName>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration. Returns the previous declaration with the same
    /// qualified name, which is replaced.
    pub fn insert(&mut self, decl: TypeDecl) -> Option<TypeDecl> {
        self.decls.insert(decl.qualified_name(), decl)
    }

    /// Register a concrete type declared outside the scanned sources.
    pub fn insert_external(&mut self, name: QualifiedName) {
        self.external.insert(name);
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&TypeDecl> {
        self.decls.get(name)
    }

    /// Declarations in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDecl> {
        self.decls.values()
    }

    /// Declarations carrying the `marker` marker, in discovery order.
    pub fn marked<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = &'a TypeDecl> + 'a {
        self.iter().filter(move |d| d.find_marker(marker).is_some())
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Whether any declaration lives in `module` or below it.
    pub fn has_module(&self, module: &[String]) -> bool {
        self.decls
            .keys()
            .chain(self.external.iter())
            .any(|q| q.module_path.starts_with(module))
    }

    /// Resolve `ty`, written inside module `from_module` with `imports` in
    /// scope, to a concrete type.
    ///
    /// A path whose first segment names an import is rewritten through it.
    /// Paths starting with `crate`, `self` or `super` are resolved exactly.
    /// Other multi-segment paths are tried relative to `from_module`, then
    /// from the crate root. A bare name is looked up in `from_module`, then
    /// in glob-imported modules, then by simple name across the registry,
    /// where it must be unique.
    pub fn resolve(
        &self,
        ty: &TypeRef,
        from_module: &[String],
        imports: &[Import],
    ) -> Result<QualifiedName, Unresolved> {
        let TypeRef::Path { segments, args } = ty else {
            return Err(Unresolved::NotNamed);
        };
        if !args.is_empty() {
            return Err(Unresolved::Parameterized);
        }
        let expanded = expand_imports(segments, imports);
        let segments = expanded.as_deref().unwrap_or(segments);
        let Some((name, prefix)) = segments.split_last() else {
            return Err(Unresolved::NotNamed);
        };

        if !prefix.is_empty() {
            return self.in_module(prefix, name, from_module);
        }

        match self.exact(from_module, name) {
            Err(Unresolved::NotFound) => self
                .through_globs(name, from_module, imports)
                .unwrap_or_else(|| self.by_simple_name(name)),
            other => other,
        }
    }

    /// Look `name` up in the module written as `prefix` from `from_module`.
    fn in_module(
        &self,
        prefix: &[String],
        name: &str,
        from_module: &[String],
    ) -> Result<QualifiedName, Unresolved> {
        match prefix.first().map(String::as_str) {
            Some("crate") => self.exact(&prefix[1..], name),
            Some("self") | Some("super") => {
                let mut module = from_module.to_vec();
                let mut rest = prefix;
                while let Some((head, tail)) = rest.split_first() {
                    match head.as_str() {
                        "self" => {}
                        "super" => {
                            if module.pop().is_none() {
                                return Err(Unresolved::OutsideCrate);
                            }
                        }
                        _ => break,
                    }
                    rest = tail;
                }
                module.extend(rest.iter().cloned());
                self.exact(&module, name)
            }
            _ => {
                let mut relative = from_module.to_vec();
                relative.extend(prefix.iter().cloned());
                match self.exact(&relative, name) {
                    Err(Unresolved::NotFound) => self.exact(prefix, name),
                    other => other,
                }
            }
        }
    }

    fn through_globs(
        &self,
        name: &str,
        from_module: &[String],
        imports: &[Import],
    ) -> Option<Result<QualifiedName, Unresolved>> {
        imports
            .iter()
            .filter(|import| import.is_glob())
            .find_map(|glob| match self.in_module(&glob.path, name, from_module) {
                Err(Unresolved::NotFound) => None,
                other => Some(other),
            })
    }

    fn exact(&self, module: &[String], name: &str) -> Result<QualifiedName, Unresolved> {
        let qualified = QualifiedName::new(module.to_vec(), name);
        if let Some(decl) = self.decls.get(&qualified) {
            return concrete(decl);
        }
        if self.external.contains(&qualified) {
            return Ok(qualified);
        }
        Err(Unresolved::NotFound)
    }

    fn by_simple_name(&self, name: &str) -> Result<QualifiedName, Unresolved> {
        let candidates: Vec<&QualifiedName> = self
            .decls
            .keys()
            .chain(self.external.iter())
            .filter(|q| q.name == name)
            .collect();

        match candidates.as_slice() {
            [] => Err(Unresolved::NotFound),
            [only] => match self.decls.get(*only) {
                Some(decl) => concrete(decl),
                None => Ok((*only).clone()),
            },
            many => Err(Unresolved::Ambiguous(
                many.iter().map(|q| (*q).clone()).collect(),
            )),
        }
    }
}

fn concrete(decl: &TypeDecl) -> Result<QualifiedName, Unresolved> {
    match decl.kind {
        DeclKind::Concrete => Ok(decl.qualified_name()),
        DeclKind::Interface => Err(Unresolved::NotConcrete),
    }
}

impl FromIterator<TypeDecl> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = TypeDecl>>(iter: I) -> Self {
        let mut registry = Self::new();
        for decl in iter {
            registry.insert(decl);
        }
        registry
    }
}
