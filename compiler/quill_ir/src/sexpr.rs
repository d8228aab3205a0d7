//! Nested symbolic expressions.
//!
//! The reader turns source text into a forest of `SExpr`. Each list remembers
//! the line of its opening token; each atom remembers its own line. Method
//! bodies stay in this form: the static core treats them as opaque and hands
//! them to the executor untouched (apart from template substitution).

use std::fmt;

use crate::Line;

/// A symbolic expression: an atom or a parenthesized list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SExpr {
    Atom(Atom),
    List(SList),
}

/// A single token. String literals keep their surrounding quotes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Atom {
    pub text: String,
    pub line: Line,
}

/// A parenthesized sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SList {
    pub items: Vec<SExpr>,
    /// Line of the opening parenthesis.
    pub line: Line,
}

impl Atom {
    pub fn new(text: impl Into<String>, line: Line) -> Self {
        Atom {
            text: text.into(),
            line,
        }
    }

    /// Check if this atom is a double-quoted string literal.
    #[inline]
    pub fn is_string_literal(&self) -> bool {
        self.text.len() >= 2 && self.text.starts_with('"') && self.text.ends_with('"')
    }
}

impl SList {
    pub fn new(items: Vec<SExpr>, line: Line) -> Self {
        SList { items, line }
    }

    /// The text of the first element, if it is an atom.
    pub fn head(&self) -> Option<&str> {
        self.items.first().and_then(SExpr::atom_text)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SExpr {
    /// Shorthand for building an atom expression.
    pub fn atom(text: impl Into<String>, line: Line) -> Self {
        SExpr::Atom(Atom::new(text, line))
    }

    /// Shorthand for building a list expression.
    pub fn list(items: Vec<SExpr>, line: Line) -> Self {
        SExpr::List(SList::new(items, line))
    }

    /// The line this expression starts on.
    pub fn line(&self) -> Line {
        match self {
            SExpr::Atom(atom) => atom.line,
            SExpr::List(list) => list.line,
        }
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            SExpr::Atom(atom) => Some(atom),
            SExpr::List(_) => None,
        }
    }

    pub fn atom_text(&self) -> Option<&str> {
        self.as_atom().map(|atom| atom.text.as_str())
    }

    pub fn as_list(&self) -> Option<&SList> {
        match self {
            SExpr::List(list) => Some(list),
            SExpr::Atom(_) => None,
        }
    }

    /// Check if this expression is the atom `text`.
    #[inline]
    pub fn is_atom(&self, text: &str) -> bool {
        self.atom_text() == Some(text)
    }

    /// Rebuild the expression, replacing every atom for which `rewrite`
    /// returns `Some`. Lines are preserved.
    #[must_use]
    pub fn map_atoms(&self, rewrite: &mut impl FnMut(&Atom) -> Option<String>) -> SExpr {
        match self {
            SExpr::Atom(atom) => match rewrite(atom) {
                Some(text) => SExpr::atom(text, atom.line),
                None => self.clone(),
            },
            SExpr::List(list) => SExpr::List(SList {
                items: list.items.iter().map(|item| item.map_atoms(rewrite)).collect(),
                line: list.line,
            }),
        }
    }

    /// Visit every atom in source order.
    pub fn for_each_atom(&self, visit: &mut impl FnMut(&Atom)) {
        match self {
            SExpr::Atom(atom) => visit(atom),
            SExpr::List(list) => {
                for item in &list.items {
                    item.for_each_atom(visit);
                }
            }
        }
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::Atom(atom) => f.write_str(&atom.text),
            SExpr::List(list) => {
                f.write_str("(")?;
                for (i, item) in list.items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}
