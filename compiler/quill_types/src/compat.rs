//! Type compatibility.
//!
//! Primitives are compatible only with themselves. Class types follow the
//! hierarchy: a reference (or a null tagged with a class) may flow into a
//! slot declared with any ancestor of its class, never a descendant. A
//! comparison only needs the two classes to be related in some direction.

use quill_diagnostic::{QuillError, QuillResult};
use quill_ir::Line;

use crate::{Type, TypeRegistry};

impl TypeRegistry {
    /// Check whether a value of static type `actual` may be used where
    /// `declared` is expected.
    ///
    /// With `for_assignment` the relation is one-way (`actual` must be
    /// `declared` or a subclass of it); otherwise it is symmetric.
    pub fn compatible(
        &self,
        declared: &Type,
        actual: &Type,
        for_assignment: bool,
    ) -> QuillResult<bool> {
        match (declared, actual) {
            (Type::Class(declared), Type::Class(actual)) => {
                if declared == actual || self.is_subtype(declared, actual)? {
                    Ok(true)
                } else if for_assignment {
                    Ok(false)
                } else {
                    self.is_subtype(actual, declared)
                }
            }
            (declared, actual) => Ok(declared == actual),
        }
    }

    /// Require that operands of types `left` and `right` can be compared.
    pub fn check_comparison(&self, left: &Type, right: &Type, line: Line) -> QuillResult<()> {
        if self.compatible(left, right, false)? {
            Ok(())
        } else {
            Err(QuillError::type_mismatch(
                format!("cannot compare a value of type `{left}` with one of type `{right}`"),
                line,
            ))
        }
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
