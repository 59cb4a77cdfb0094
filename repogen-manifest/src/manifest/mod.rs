//! Manifest types and parsing for repogen.toml files.

mod file;
mod parse;
mod validate;

use std::fmt;

pub use file::RepogenToml;
use serde::{Deserialize, Serialize};
pub use validate::ParseContext;

/// Root manifest for repogen.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Project metadata and source locations
    pub project: ProjectConfig,

    /// Names of the marker attributes recognized in sources
    #[serde(default)]
    pub markers: MarkerConfig,

    /// Spellings of the runtime data-access layer the emitted code calls into
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Code generation options
    #[serde(default)]
    pub codegen: CodegenConfig,
}

impl Manifest {
    /// A manifest for project `name` with every other setting at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            project: ProjectConfig {
                name: name.into(),
                sources: default_sources(),
                output: default_output(),
            },
            markers: MarkerConfig::default(),
            runtime: RuntimeConfig::default(),
            codegen: CodegenConfig::default(),
        }
    }
}

/// `[project]`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub name: String,

    /// Directories or files to scan, relative to the manifest
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,

    /// Directory generated files are written to, relative to the manifest
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_sources() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_output() -> String {
    "src/generated".to_string()
}

/// `[markers]`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    /// Marks a trait as a repository contract
    pub repository: String,
    /// Marks a method as a query method; carries the query text
    pub query: String,
    /// Marks a parameter as a query binding; carries the bind name
    pub bind: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            repository: "repository".to_string(),
            query: "query".to_string(),
            bind: "bind".to_string(),
        }
    }
}

/// `[runtime]`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Generic base contract every repository extends
    pub base_contract: String,
    /// Runtime type the emitted struct wraps
    pub base_type: String,
    /// Constructor of `base_type`
    pub constructor: String,
    /// Opaque context handle passed to the constructor
    pub context_type: String,
    /// Path of the entity type constant, called with the entity as turbofish
    pub entity_constant: String,
    /// Path of the binding primitive, called as `binding(name, value)`
    pub binding: String,
    /// Single-result dispatch method
    pub select: String,
    /// Multi-result dispatch method
    pub select_multiple: String,
    /// Single-value asynchronous result wrapper
    pub monad: String,
    /// List container allowed inside the monad
    pub list: String,
    /// `use` paths emitted at the top of every generated file
    pub imports: Vec<String>,
    /// Entity types declared outside the scanned sources
    pub entities: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            base_contract: "Repository".to_string(),
            base_type: "BaseRepository".to_string(),
            constructor: "new".to_string(),
            context_type: "SessionFactory".to_string(),
            entity_constant: "EntityType::of".to_string(),
            binding: "Param::of".to_string(),
            select: "select".to_string(),
            select_multiple: "select_multiple".to_string(),
            monad: "Uni".to_string(),
            list: "Vec".to_string(),
            imports: vec![
                "repogen_runtime::{BaseRepository, EntityType, Param, SessionFactory, Uni}"
                    .to_string(),
            ],
            entities: Vec::new(),
        }
    }
}

/// `[codegen]`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// Appended to the contract name to form the emitted type name
    pub impl_suffix: String,
    /// Path prefix used to import contracts and entities
    pub crate_root: String,
    /// What to do when a query method binds the same name twice
    pub duplicate_bind_names: DuplicateBindPolicy,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            impl_suffix: "Impl".to_string(),
            crate_root: "crate".to_string(),
            duplicate_bind_names: DuplicateBindPolicy::default(),
        }
    }
}

/// Handling of a query method that binds the same name more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateBindPolicy {
    /// Generate, and report a warning.
    #[default]
    Warn,
    /// Fail the build.
    Deny,
    /// Generate silently.
    Allow,
}

impl DuplicateBindPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateBindPolicy::Warn => "warn",
            DuplicateBindPolicy::Deny => "deny",
            DuplicateBindPolicy::Allow => "allow",
        }
    }
}

impl fmt::Display for DuplicateBindPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
