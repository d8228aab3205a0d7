use std::fmt;

use quill_ir::keyword;

/// A classified type token.
///
/// Canonical names of instantiated templates (`Node@int`) are ordinary
/// class names: once registered they behave like any other class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Bool,
    Str,
    /// Only valid as a method return type.
    Void,
    Class(String),
}

impl Type {
    /// Classify a type token. Anything that is not a primitive keyword
    /// names a class, whether or not such a class exists.
    pub fn from_token(token: &str) -> Type {
        match token {
            keyword::INT => Type::Int,
            keyword::BOOL => Type::Bool,
            keyword::STRING => Type::Str,
            keyword::VOID => Type::Void,
            _ => Type::Class(token.to_string()),
        }
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Int | Type::Bool | Type::Str)
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// The class name, for class types.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Type::Class(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Type::Int => keyword::INT,
            Type::Bool => keyword::BOOL,
            Type::Str => keyword::STRING,
            Type::Void => keyword::VOID,
            Type::Class(name) => name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_tokens() {
        assert_eq!(Type::from_token("int"), Type::Int);
        assert_eq!(Type::from_token("bool"), Type::Bool);
        assert_eq!(Type::from_token("string"), Type::Str);
        assert_eq!(Type::from_token("void"), Type::Void);
    }

    #[test]
    fn other_tokens_are_classes() {
        assert_eq!(Type::from_token("Dog"), Type::Class("Dog".into()));
        assert_eq!(Type::from_token("Node@int").class_name(), Some("Node@int"));
        // Keywords are case sensitive.
        assert_eq!(Type::from_token("Int"), Type::Class("Int".into()));
    }

    #[test]
    fn display_round_trips_tokens() {
        for token in ["int", "bool", "string", "void", "Pair@int@Dog"] {
            assert_eq!(Type::from_token(token).to_string(), token);
        }
    }
}
