//! Type references.

use std::fmt;

use serde::Serialize;

/// A type as written at a use site: a return type, a parameter type or a
/// supertype. Language-agnostic, but [`fmt::Display`] renders Rust syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A named type, possibly qualified, with generic arguments on the last segment.
    Path {
        segments: Vec<String>,
        args: Vec<TypeRef>,
    },
    /// A borrowed type.
    Reference {
        lifetime: Option<String>,
        mutable: bool,
        inner: Box<TypeRef>,
    },
    /// A tuple type; the empty tuple is the unit type.
    Tuple { items: Vec<TypeRef> },
    /// A slice type.
    Slice { inner: Box<TypeRef> },
    /// Anything else, kept verbatim.
    Opaque { text: String },
}

impl TypeRef {
    /// A non-generic named type, from a `::`-separated path.
    pub fn named(path: &str) -> Self {
        Self::generic(path, Vec::new())
    }

    /// A named type with generic arguments.
    pub fn generic(path: &str, args: Vec<TypeRef>) -> Self {
        TypeRef::Path {
            segments: path.split("::").map(str::to_string).collect(),
            args,
        }
    }

    /// A shared reference to `inner`.
    pub fn reference(inner: TypeRef) -> Self {
        TypeRef::Reference {
            lifetime: None,
            mutable: false,
            inner: Box::new(inner),
        }
    }

    /// The last path segment, for named types.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeRef::Path { segments, .. } => segments.last().map(String::as_str),
            _ => None,
        }
    }

    /// The path segments, for named types.
    pub fn segments(&self) -> &[String] {
        match self {
            TypeRef::Path { segments, .. } => segments,
            _ => &[],
        }
    }

    /// Generic arguments, empty for anything but a parameterized named type.
    pub fn args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Path { args, .. } => args,
            _ => &[],
        }
    }

    /// True when this is a named type carrying generic arguments.
    pub fn is_parameterized(&self) -> bool {
        !self.args().is_empty()
    }

    /// Whether this names `name`, comparing last segments only.
    ///
    /// `Uni`, `mutiny::Uni` and `crate::rt::Uni` all match `"Uni"` and
    /// `"mutiny::Uni"`.
    pub fn is_named(&self, name: &str) -> bool {
        let wanted = name.rsplit("::").next().unwrap_or(name);
        self.simple_name() == Some(wanted)
    }

    /// The `::`-joined path without generic arguments.
    pub fn path(&self) -> Option<String> {
        match self {
            TypeRef::Path { segments, .. } => Some(segments.join("::")),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Path { segments, args } => {
                write!(f, "{}", segments.join("::"))?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    write_list(f, args)?;
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeRef::Reference {
                lifetime,
                mutable,
                inner,
            } => {
                write!(f, "&")?;
                if let Some(lifetime) = lifetime {
                    write!(f, "'{} ", lifetime)?;
                }
                if *mutable {
                    write!(f, "mut ")?;
                }
                write!(f, "{}", inner)
            }
            TypeRef::Tuple { items } => {
                write!(f, "(")?;
                write_list(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            TypeRef::Slice { inner } => write!(f, "[{}]", inner),
            TypeRef::Opaque { text } => write!(f, "{}", text),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeRef]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
