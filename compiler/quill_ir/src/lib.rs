//! Quill IR - shared input types for the static core.
//!
//! This crate holds the data the reader produces and the static phase consumes:
//! - `Line` for source locations (Quill reports errors by line)
//! - `SExpr` for the nested symbolic expressions of a program
//! - Keyword spellings
//! - `Literal` for default values and constant operands
//! - Declaration types (`ClassDecl`, `TemplateDecl`, ...) lowered from `SExpr`
//!
//! Every type derives `Clone, Eq, PartialEq, Hash, Debug` so that declarations
//! can be copied into templates and compared in tests.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod decl;
pub mod keyword;
mod line;
mod literal;
mod sexpr;

pub use decl::{ClassDecl, FieldDecl, MemberList, MethodDecl, ParamDecl, Program, TemplateDecl};
pub use line::Line;
pub use literal::Literal;
pub use sexpr::{Atom, SExpr, SList};
