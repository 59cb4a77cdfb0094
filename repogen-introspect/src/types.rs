//! Lowering of `syn` types into [`TypeRef`].

use quote::ToTokens;
use repogen_ir::TypeRef;
use syn::{GenericArgument, Path, PathArguments, Type};

/// Convert a `syn` type into the portable model.
///
/// Anything without a structured counterpart (trait objects, function
/// pointers, qualified paths, ...) becomes [`TypeRef::Opaque`] holding the
/// type's tokens, so signatures still round-trip.
pub fn convert_type(ty: &Type) -> TypeRef {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            convert_path(&type_path.path).unwrap_or_else(|| opaque(ty))
        }
        Type::Reference(reference) => TypeRef::Reference {
            lifetime: reference.lifetime.as_ref().map(|l| l.ident.to_string()),
            mutable: reference.mutability.is_some(),
            inner: Box::new(convert_type(&reference.elem)),
        },
        Type::Tuple(tuple) => TypeRef::Tuple {
            items: tuple.elems.iter().map(convert_type).collect(),
        },
        Type::Slice(slice) => TypeRef::Slice {
            inner: Box::new(convert_type(&slice.elem)),
        },
        Type::Paren(paren) => convert_type(&paren.elem),
        Type::Group(group) => convert_type(&group.elem),
        _ => opaque(ty),
    }
}

/// Convert a path whose generic arguments, if any, sit on the last segment.
///
/// Returns `None` for shapes the model cannot hold: a leading `::`,
/// arguments on an inner segment or parenthesized arguments.
pub(crate) fn convert_path(path: &Path) -> Option<TypeRef> {
    if path.leading_colon.is_some() {
        return None;
    }

    let last = path.segments.len().checked_sub(1)?;
    let mut segments = Vec::with_capacity(path.segments.len());
    let mut args = Vec::new();

    for (i, segment) in path.segments.iter().enumerate() {
        segments.push(segment.ident.to_string());
        match &segment.arguments {
            PathArguments::None => {}
            PathArguments::AngleBracketed(bracketed) if i == last => {
                args = bracketed.args.iter().map(convert_arg).collect();
            }
            _ => return None,
        }
    }

    Some(TypeRef::Path { segments, args })
}

fn convert_arg(arg: &GenericArgument) -> TypeRef {
    match arg {
        GenericArgument::Type(ty) => convert_type(ty),
        GenericArgument::Lifetime(lifetime) => TypeRef::Opaque {
            text: lifetime.to_string(),
        },
        other => TypeRef::Opaque {
            text: other.to_token_stream().to_string(),
        },
    }
}

fn opaque(ty: &Type) -> TypeRef {
    TypeRef::Opaque {
        text: ty.to_token_stream().to_string(),
    }
}
