//! Tokenizer built on logos.
//!
//! Quill has four kinds of token: parentheses, double-quoted strings (no
//! escapes, no newlines), `#` line comments (skipped) and atoms, which are any
//! other run of non-space characters.

use logos::Logos;
use quill_diagnostic::{QuillError, QuillResult};
use quill_ir::Line;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
pub(crate) enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[regex(r#""[^"\n]*""#)]
    Str,
    #[regex(r##"[^\s()"#]+"##)]
    Atom,
}

/// A token with its text and line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Token<'src> {
    pub kind: RawToken,
    pub text: &'src str,
    pub line: Line,
}

/// Byte offsets of line starts, for offset → line conversion.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex { starts }
    }

    fn line_of(&self, offset: usize) -> Line {
        let index = self.starts.partition_point(|&start| start <= offset);
        Line::new(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

/// Tokenize `source`.
///
/// The only character sequence that cannot start a token is an unclosed
/// string, which is reported as E0001.
pub(crate) fn tokenize(source: &str) -> QuillResult<Vec<Token<'_>>> {
    let lines = LineIndex::new(source);
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let line = lines.line_of(lexer.span().start);
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                text: lexer.slice(),
                line,
            }),
            Err(()) => return Err(QuillError::unterminated_string(line)),
        }
    }

    Ok(tokens)
}
