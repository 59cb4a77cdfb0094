//! Analysis results.
//!
//! Descriptors are built once per contract by analysis and are read-only
//! afterwards. Synthesis consumes them and never looks at markers again.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{MethodDecl, Origin};

/// A fully-qualified type name: module path from the crate root plus the
/// simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    pub module_path: Vec<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn new(module_path: Vec<String>, name: impl Into<String>) -> Self {
        Self {
            module_path,
            name: name.into(),
        }
    }

    /// Parse a `::`-separated path. A leading `crate` segment is dropped.
    pub fn parse(path: &str) -> Option<Self> {
        let mut segments: Vec<String> = path
            .split("::")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if segments.first().is_some_and(|s| s == "crate") {
            segments.remove(0);
        }
        let name = segments.pop()?;
        Some(Self::new(segments, name))
    }

    /// The path as seen from `root`, e.g. `crate::model::User` for root `crate`.
    pub fn path_from(&self, root: &str) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.module_path.len() + 2);
        if !root.is_empty() {
            parts.push(root);
        }
        parts.extend(self.module_path.iter().map(String::as_str));
        parts.push(&self.name);
        parts.join("::")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_from(""))
    }
}

impl Serialize for QualifiedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The entity a repository manages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityType {
    pub name: QualifiedName,
}

impl EntityType {
    pub fn new(name: QualifiedName) -> Self {
        Self { name }
    }

    pub fn simple_name(&self) -> &str {
        &self.name.name
    }
}

/// A repository contract together with its resolved entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryDescriptor {
    pub contract: QualifiedName,
    pub entity: EntityType,
    pub origin: Option<Origin>,
}

/// Whether a query produces one entity or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnShape {
    Single,
    List,
}

impl fmt::Display for ReturnShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnShape::Single => write!(f, "SINGLE"),
            ReturnShape::List => write!(f, "LIST"),
        }
    }
}

/// Position and name of a declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamRef {
    pub index: usize,
    pub name: String,
}

/// A query placeholder bound to a method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamBinding {
    pub bind_name: String,
    pub parameter: ParamRef,
}

/// A classified query method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryMethodDescriptor {
    pub name: String,
    /// The query text, verbatim.
    pub query: String,
    pub shape: ReturnShape,
    /// Bindings in parameter declaration order.
    pub bindings: Vec<ParamBinding>,
}

/// A query method paired with the declaration whose signature it implements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMethod {
    pub descriptor: QueryMethodDescriptor,
    #[serde(skip)]
    pub signature: MethodDecl,
}

/// Everything synthesis needs for one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractPlan {
    pub repository: RepositoryDescriptor,
    /// Query methods in declaration order.
    pub methods: Vec<PlannedMethod>,
}

impl ContractPlan {
    pub fn query_methods(&self) -> impl Iterator<Item = &QueryMethodDescriptor> {
        self.methods.iter().map(|m| &m.descriptor)
    }
}
