//! Parenthesis matching.

use quill_diagnostic::{QuillError, QuillResult};
use quill_ir::{Line, SExpr, SList};

use crate::lexer::{tokenize, RawToken};

/// Read `source` into its top-level expressions.
///
/// Each list records the line of its opening parenthesis. An unclosed `(` is
/// reported at the line where it was opened; a stray `)` at its own line.
pub fn read(source: &str) -> QuillResult<Vec<SExpr>> {
    let tokens = tokenize(source)?;

    let mut top_level = Vec::new();
    // Lists under construction, innermost last.
    let mut open: Vec<(Vec<SExpr>, Line)> = Vec::new();

    for token in tokens {
        match token.kind {
            RawToken::LParen => open.push((Vec::new(), token.line)),
            RawToken::RParen => {
                let Some((items, line)) = open.pop() else {
                    return Err(QuillError::unbalanced_paren(
                        "unexpected `)` with no matching `(`",
                        token.line,
                    ));
                };
                push_expr(&mut open, &mut top_level, SExpr::List(SList::new(items, line)));
            }
            RawToken::Str | RawToken::Atom => {
                push_expr(&mut open, &mut top_level, SExpr::atom(token.text, token.line));
            }
        }
    }

    if let Some((_, line)) = open.last() {
        return Err(QuillError::unbalanced_paren(
            "this `(` is never closed",
            *line,
        ));
    }

    Ok(top_level)
}

fn push_expr(open: &mut [(Vec<SExpr>, Line)], top_level: &mut Vec<SExpr>, expr: SExpr) {
    match open.last_mut() {
        Some((items, _)) => items.push(expr),
        None => top_level.push(expr),
    }
}
