//! Built-in lints for plan validation.

mod duplicate_bind_name;
mod duplicate_impl_name;
mod unbound_parameter;
mod unimplemented_method;

pub use duplicate_bind_name::DuplicateBindNameLint;
pub use duplicate_impl_name::DuplicateImplNameLint;
pub use unbound_parameter::UnboundParameterLint;
pub use unimplemented_method::UnimplementedMethodLint;
