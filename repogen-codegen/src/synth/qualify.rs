//! Rewriting of signature types for use outside the contract's module.

use repogen_ir::{Import, QualifiedName, TypeRef, TypeRegistry, expand_imports};

/// Rewrites types written in the contract's module so they resolve from
/// the emitted file.
///
/// Declared types become absolute paths under `crate_root`. The entity
/// keeps its simple name since every emitted file imports it. Names the
/// contract's file imports are spelled out through their `use` path, so
/// `Uuid` under `use uuid::Uuid;` becomes `uuid::Uuid`. Anything else
/// (prelude types, runtime types) is left as written.
#[derive(Debug, Clone, Copy)]
pub struct TypeQualifier<'a> {
    registry: &'a TypeRegistry,
    module: &'a [String],
    imports: &'a [Import],
    entity: &'a QualifiedName,
    crate_root: &'a str,
}

impl<'a> TypeQualifier<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        module: &'a [String],
        imports: &'a [Import],
        entity: &'a QualifiedName,
        crate_root: &'a str,
    ) -> Self {
        Self {
            registry,
            module,
            imports,
            entity,
            crate_root,
        }
    }

    pub fn qualify(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Path { segments, args } => {
                let args: Vec<TypeRef> = args.iter().map(|arg| self.qualify(arg)).collect();
                let bare = TypeRef::Path {
                    segments: segments.clone(),
                    args: Vec::new(),
                };
                let segments = match self.registry.resolve(&bare, self.module, self.imports) {
                    Ok(name) if &name == self.entity => vec![name.name],
                    Ok(name) => name
                        .path_from(self.crate_root)
                        .split("::")
                        .map(str::to_string)
                        .collect(),
                    Err(_) => match expand_imports(segments, self.imports) {
                        Some(expanded) => self.absolute(&expanded),
                        None => segments.clone(),
                    },
                };
                TypeRef::Path { segments, args }
            }
            TypeRef::Reference {
                lifetime,
                mutable,
                inner,
            } => TypeRef::Reference {
                lifetime: lifetime.clone(),
                mutable: *mutable,
                inner: Box::new(self.qualify(inner)),
            },
            TypeRef::Tuple { items } => TypeRef::Tuple {
                items: items.iter().map(|item| self.qualify(item)).collect(),
            },
            TypeRef::Slice { inner } => TypeRef::Slice {
                inner: Box::new(self.qualify(inner)),
            },
            TypeRef::Opaque { .. } => ty.clone(),
        }
    }

    /// Modules the contract's file glob-imports, as paths usable from the
    /// emitted file.
    pub fn glob_imports(&self) -> Vec<String> {
        self.imports
            .iter()
            .filter(|import| import.is_glob())
            .map(|import| self.absolute(&import.path).join("::"))
            .collect()
    }

    /// Turn a `use` path written in the contract's module into one that
    /// names the same item from anywhere.
    ///
    /// Paths into the crate are rooted at `crate_root`; a first segment
    /// that is neither `crate`, `self`, `super` nor a child module of the
    /// contract's module names an external crate and is kept.
    fn absolute(&self, path: &[String]) -> Vec<String> {
        let Some((head, rest)) = path.split_first() else {
            return Vec::new();
        };

        match head.as_str() {
            "crate" => self.rooted(rest.iter().cloned()),
            "self" | "super" => {
                let mut module = self.module.to_vec();
                let mut rest = path;
                while let Some((head, tail)) = rest.split_first() {
                    match head.as_str() {
                        "self" => {}
                        "super" => {
                            module.pop();
                        }
                        _ => break,
                    }
                    rest = tail;
                }
                module.extend(rest.iter().cloned());
                self.rooted(module)
            }
            _ => {
                let mut child = self.module.to_vec();
                child.push(head.clone());
                if self.registry.has_module(&child) {
                    let mut local = self.module.to_vec();
                    local.extend(path.iter().cloned());
                    self.rooted(local)
                } else {
                    path.to_vec()
                }
            }
        }
    }

    fn rooted(&self, path: impl IntoIterator<Item = String>) -> Vec<String> {
        let mut rooted: Vec<String> = self.crate_root.split("::").map(str::to_string).collect();
        rooted.extend(path);
        rooted
    }
}
