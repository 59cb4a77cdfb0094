//! Parameter binding collection.

use repogen_ir::{ParamBinding, ParamDecl, ParamRef};

/// Collects the parameters of a query method that carry the bind marker.
pub struct ParameterBinder<'a> {
    marker: &'a str,
}

impl<'a> ParameterBinder<'a> {
    pub fn new(marker: &'a str) -> Self {
        Self { marker }
    }

    /// Bindings in declaration order.
    ///
    /// Unmarked parameters are skipped but still count towards the index
    /// of later ones. A marker without a value binds the parameter's own name.
    /// Duplicate bind names are kept; reporting them is up to the caller.
    pub fn bind(&self, params: &[ParamDecl]) -> Vec<ParamBinding> {
        params
            .iter()
            .enumerate()
            .filter_map(|(index, param)| {
                let marker = param.find_marker(self.marker)?;
                let bind_name = marker.value.clone().unwrap_or_else(|| param.name.clone());
                Some(ParamBinding {
                    bind_name,
                    parameter: ParamRef {
                        index,
                        name: param.name.clone(),
                    },
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use repogen_ir::{Marker, TypeRef};

    use super::*;

    fn bound(name: &str, bind: &str) -> ParamDecl {
        ParamDecl::new(name, TypeRef::named("String")).marker(Marker::with_value("bind", bind))
    }

    fn plain(name: &str) -> ParamDecl {
        ParamDecl::new(name, TypeRef::named("i64"))
    }

    #[test]
    fn test_bind_in_declaration_order() {
        let params = vec![bound("last_name", "lastName"), bound("age", "age")];
        let bindings = ParameterBinder::new("bind").bind(&params);

        let names: Vec<_> = bindings.iter().map(|b| b.bind_name.as_str()).collect();
        assert_eq!(names, vec!["lastName", "age"]);
        assert_eq!(bindings[1].parameter, ParamRef { index: 1, name: "age".into() });
    }

    #[test]
    fn test_unmarked_parameters_keep_positions() {
        let params = vec![plain("limit"), bound("name", "n"), plain("offset"), bound("id", "id")];
        let bindings = ParameterBinder::new("bind").bind(&params);

        let indices: Vec<_> = bindings.iter().map(|b| b.parameter.index).collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn test_no_parameters() {
        assert!(ParameterBinder::new("bind").bind(&[]).is_empty());
        assert!(ParameterBinder::new("bind").bind(&[plain("x")]).is_empty());
    }

    #[test]
    fn test_duplicates_preserved() {
        let params = vec![bound("a", "x"), bound("b", "x")];
        let bindings = ParameterBinder::new("bind").bind(&params);
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].bind_name, bindings[1].bind_name);
    }

    #[test]
    fn test_marker_without_value_uses_parameter_name() {
        let param = ParamDecl::new("email", TypeRef::named("String")).marker(Marker::flag("bind"));
        let bindings = ParameterBinder::new("bind").bind(&[param]);
        assert_eq!(bindings[0].bind_name, "email");
    }

    #[test]
    fn test_custom_marker() {
        let param = ParamDecl::new("id", TypeRef::named("i64")).marker(Marker::with_value("param", "id"));
        assert!(ParameterBinder::new("bind").bind(std::slice::from_ref(&param)).is_empty());
        assert_eq!(ParameterBinder::new("param").bind(&[param]).len(), 1);
    }
}
