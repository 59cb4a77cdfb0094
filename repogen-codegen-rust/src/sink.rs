//! Rust source emission for synthesized repositories.

use std::collections::BTreeSet;

use proc_macro2::Literal;
use repogen_codegen::synth::{
    Callee, CodeSink, ConstructorSpec, MethodSpec, Operand, TypeSpec,
};
use repogen_ir::{QualifiedName, TypeRef, TypeRegistry};
use repogen_manifest::Manifest;

use crate::{Field, Fn, Impl, Param, RustFile, Struct, Use, files::ImplRs};

/// Name of the local constant a method's query text is bound to.
const QUERY_CONST: &str = "QUERY";

/// A [`CodeSink`] that renders one emitted type as a Rust source file.
///
/// The emitted struct wraps the runtime base type in a `base` field and
/// derefs to it; the contract's supertrait is expected to be implemented by
/// the runtime for anything that derefs to the base type.
pub struct RustSink<'a> {
    manifest: &'a Manifest,
    registry: &'a TypeRegistry,
    spec: Option<TypeSpec>,
    constructor: Option<Fn>,
    methods: Vec<Fn>,
    query: Option<String>,
}

impl<'a> RustSink<'a> {
    pub fn new(manifest: &'a Manifest, registry: &'a TypeRegistry) -> Self {
        Self {
            manifest,
            registry,
            spec: None,
            constructor: None,
            methods: Vec::new(),
            query: None,
        }
    }

    fn base_type(&self) -> &str {
        self.spec
            .as_ref()
            .map_or(&self.manifest.runtime.base_type, |spec| &spec.base_type)
    }

    /// Path an emitted file imports `name` through.
    ///
    /// Scanned declarations live under the crate root; external entities are
    /// imported by their configured path. A bare external name is assumed to
    /// come in through the runtime imports.
    fn import_path(&self, name: &QualifiedName) -> Option<String> {
        if self.registry.get(name).is_some() {
            Some(name.path_from(&self.manifest.codegen.crate_root))
        } else if name.module_path.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }

    fn crate_imports(&self, spec: &TypeSpec) -> Vec<Use> {
        let paths: BTreeSet<String> = [&spec.contract, &spec.entity]
            .into_iter()
            .filter_map(|name| self.import_path(name))
            .collect();
        paths.into_iter().map(Use::new).collect()
    }
}

/// Render `text` as a Rust string literal, escaped as needed.
fn string_literal(text: &str) -> String {
    Literal::string(text).to_string()
}

fn is_unit(ty: &TypeRef) -> bool {
    matches!(ty, TypeRef::Tuple { items } if items.is_empty())
}

impl CodeSink for RustSink<'_> {
    type Expr = String;
    type Output = Option<ImplRs>;

    fn declare_type(&mut self, spec: &TypeSpec) {
        self.spec = Some(spec.clone());
    }

    fn operand(&mut self, operand: &Operand) -> String {
        match operand {
            Operand::Query(text) => {
                self.query = Some(string_literal(text));
                QUERY_CONST.to_string()
            }
            Operand::Str(text) => string_literal(text),
            Operand::Param(name) => name.clone(),
            Operand::EntityConstant { constant, entity } => {
                format!("{}::<{}>()", constant, entity.name)
            }
        }
    }

    fn sequence(&mut self, items: Vec<String>) -> String {
        format!("vec![{}]", items.join(", "))
    }

    fn emit_call(&mut self, callee: &Callee, args: Vec<String>) -> String {
        let args = args.join(", ");
        match callee {
            Callee::BaseConstructor(constructor) => {
                format!("{}::{}({})", self.base_type(), constructor, args)
            }
            Callee::BaseMethod(method) => format!("self.base.{}({})", method, args),
            Callee::Function(path) => format!("{}({})", path, args),
        }
    }

    fn declare_constructor(&mut self, spec: &ConstructorSpec, base: String) {
        let constructor = Fn::new(&spec.name)
            .param(Param::new(&spec.context_param, &spec.context_type))
            .returns("Self")
            .body(format!("Self {{\n    base: {},\n}}", base));
        self.constructor = Some(constructor);
    }

    fn declare_method(&mut self, spec: &MethodSpec, body: String) {
        let mut method = Fn::new(&spec.name)
            .private()
            .param(Param::receiver(spec.receiver.to_string()));

        if spec.params.iter().any(|p| !p.bound) {
            method = method.attr("allow(unused_variables)");
        }
        for param in &spec.params {
            method = method.param(Param::new(&param.name, param.ty.to_string()));
        }
        if !is_unit(&spec.return_type) {
            method = method.returns(spec.return_type.to_string());
        }
        if let Some(query) = self.query.take() {
            method = method.body_line(format!("const {}: &str = {};", QUERY_CONST, query));
        }

        self.methods.push(method.body_line(body));
    }

    fn finish(self) -> Option<ImplRs> {
        let spec = self.spec.as_ref()?;
        let name = &spec.name.name;
        let base = format!("{}<{}>", spec.base_type, spec.entity.name);

        let runtime_imports = self.manifest.runtime.imports.iter().map(Use::new);

        let deref = Impl::new(name)
            .for_trait("Deref")
            .assoc_type("Target", &base)
            .method(
                Fn::new("deref")
                    .private()
                    .param(Param::receiver("&self"))
                    .returns("&Self::Target")
                    .body_line("&self.base"),
            );

        let content = RustFile::new()
            .inner_attr("allow(unused_imports)")
            .use_group([Use::new("std::ops").symbol("Deref")])
            .use_group(runtime_imports)
            .use_group(
                spec.glob_imports
                    .iter()
                    .map(|module| Use::new(module.as_str()).symbol("*")),
            )
            .use_group(self.crate_imports(spec))
            .add(
                Struct::new(name)
                    .doc(format!(
                        "Generated implementation of [`{}`].",
                        spec.contract.name
                    ))
                    .field(Field::new("base", &base).private()),
            )
            .add(Impl::new(name).methods(self.constructor.clone()))
            .add(deref)
            .add(
                Impl::new(name)
                    .for_trait(&spec.contract.name)
                    .methods(self.methods.iter().cloned()),
            )
            .render();

        Some(ImplRs::new(spec.name.clone(), content))
    }
}
