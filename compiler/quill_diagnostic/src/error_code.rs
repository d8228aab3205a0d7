//! Error codes for all Quill diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the phase. Used for `quill explain` lookups and documentation.

use std::fmt;
use std::str::FromStr;

/// Error codes for all diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Reader (tokenizing, parenthesis matching)
/// - E1xxx: Declaration shape
/// - E2xxx: Static semantics (types, names, templates, hierarchy)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Reader Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unbalanced parenthesis
    E0002,

    // Declaration Errors (E1xxx)
    /// Malformed class, field or method declaration
    E1001,

    // Static Errors (E2xxx)
    /// Type mismatch
    E2001,
    /// Unknown type
    E2002,
    /// Method or field not found
    E2003,
    /// Argument count mismatch
    E2004,
    /// Template argument count mismatch
    E2005,
    /// Duplicate definition
    E2006,
    /// Cyclic definition (inheritance cycle or runaway instantiation)
    E2008,
}

/// The category an error code belongs to.
///
/// These are the kinds the execution engine surfaces to the user; the code
/// refines the kind for documentation lookup.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// Source text could not be read into declarations.
    Syntax,
    /// Invalid type token, incompatible value, unrelated comparison.
    TypeMismatch,
    /// Duplicate class/field/method/parameter, or member not found.
    NameConflict,
    /// Reference to an undeclared class or template.
    UnknownType,
    /// Wrong number of template or method arguments.
    ArityMismatch,
    /// The program's class structure cannot be made finite.
    Configuration,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()` which is exhaustive (Rust match enforces it).
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E1001,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2008,
    ];

    /// Get the numeric code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2008 => "E2008",
        }
    }

    /// The category this code is reported under.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E0001 | ErrorCode::E0002 | ErrorCode::E1001 => ErrorKind::Syntax,
            ErrorCode::E2001 => ErrorKind::TypeMismatch,
            ErrorCode::E2002 => ErrorKind::UnknownType,
            ErrorCode::E2003 | ErrorCode::E2006 => ErrorKind::NameConflict,
            ErrorCode::E2004 | ErrorCode::E2005 => ErrorKind::ArityMismatch,
            ErrorCode::E2008 => ErrorKind::Configuration,
        }
    }

    /// One-line summary, used as the title of `quill explain`.
    pub fn summary(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "unbalanced parenthesis",
            ErrorCode::E1001 => "malformed declaration",
            ErrorCode::E2001 => "type mismatch",
            ErrorCode::E2002 => "unknown type",
            ErrorCode::E2003 => "member not found",
            ErrorCode::E2004 => "wrong number of arguments",
            ErrorCode::E2005 => "wrong number of template arguments",
            ErrorCode::E2006 => "duplicate definition",
            ErrorCode::E2008 => "cyclic definition",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known error code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseErrorCodeError(pub String);

impl fmt::Display for ParseErrorCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown error code `{}`", self.0)
    }
}

impl std::error::Error for ParseErrorCodeError {}

impl FromStr for ErrorCode {
    type Err = ParseErrorCodeError;

    /// Parse a code, case-insensitively (`e2001` and `E2001` both work).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseErrorCodeError(wanted.to_string()))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::TypeMismatch => write!(f, "type error"),
            ErrorKind::NameConflict => write!(f, "name error"),
            ErrorKind::UnknownType => write!(f, "unknown type"),
            ErrorKind::ArityMismatch => write!(f, "arity error"),
            ErrorKind::Configuration => write!(f, "configuration error"),
        }
    }
}
