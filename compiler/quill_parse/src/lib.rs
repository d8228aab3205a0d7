//! Reader for Quill source text.
//!
//! Two stages:
//! 1. [`read`]: tokenize with logos and match parentheses into a forest of
//!    [`SExpr`], each list tagged with the line of its opening parenthesis.
//! 2. [`lower`]: check the shape of every `class`/`tclass` item and produce a
//!    [`Program`] of declarations. Type tokens stay raw; the static phase
//!    decides what they name.
//!
//! Method bodies are not inspected beyond being a single expression.

mod lexer;
mod lower;
mod reader;

use quill_diagnostic::QuillResult;
use quill_ir::{Program, SExpr};

pub use lower::lower;
pub use reader::read;

/// Read and lower a whole program.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn parse_program(source: &str) -> QuillResult<Program> {
    let items: Vec<SExpr> = read(source)?;
    let program = lower(&items)?;
    tracing::debug!(
        classes = program.classes.len(),
        templates = program.templates.len(),
        "program lowered"
    );
    Ok(program)
}
