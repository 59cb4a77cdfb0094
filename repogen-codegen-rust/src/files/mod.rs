//! Files the Rust generator writes.

mod impl_rs;
mod mod_rs;

pub use impl_rs::ImplRs;
pub use mod_rs::ModRs;
