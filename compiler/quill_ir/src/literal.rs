//! Literal constants.
//!
//! Field defaults and constant operands are written as bare tokens: integers,
//! `true`/`false`, double-quoted strings and `null`. A `null` literal has no
//! type of its own; it acquires one when it is bound to a declared type.

use std::fmt;

use crate::keyword;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    /// String contents without the surrounding quotes.
    Str(String),
    Null,
}

impl Literal {
    /// Parse a token as a literal.
    ///
    /// Returns `None` for identifiers and anything else that is not a
    /// constant.
    pub fn parse(token: &str) -> Option<Literal> {
        match token {
            keyword::TRUE => return Some(Literal::Bool(true)),
            keyword::FALSE => return Some(Literal::Bool(false)),
            keyword::NULL => return Some(Literal::Null),
            _ => {}
        }

        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            return Some(Literal::Str(token[1..token.len() - 1].to_string()));
        }

        let digits = token.strip_prefix('-').unwrap_or(token);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return token.parse().ok().map(Literal::Int);
        }

        None
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Str(s) => write!(f, "\"{s}\""),
            Literal::Null => f.write_str(keyword::NULL),
        }
    }
}
