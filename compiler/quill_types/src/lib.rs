//! Types for the Quill static core.
//!
//! - [`Type`]: what a type token names once it has been classified
//! - [`TypeRegistry`]: every declared class name with its superclass edge
//!
//! The registry answers the hierarchy questions (subtyping, the superclass
//! chain, cycle detection) and the compatibility questions built on them.
//! It knows nothing about fields or methods; those live in the class table.

mod compat;
mod registry;
mod ty;

pub use registry::{ClassEntry, TypeRegistry};
pub use ty::Type;
