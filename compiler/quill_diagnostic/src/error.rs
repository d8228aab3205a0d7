//! The single error type of the static core.

use quill_ir::Line;

use crate::{ErrorCode, ErrorKind};

/// Result alias used throughout the core.
pub type QuillResult<T> = Result<T, QuillError>;

/// An error raised by the reader, the static phase or the dispatcher.
///
/// Constructors are centralized here so every phase words the same problem
/// the same way.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}{}", at_line(.line))]
pub struct QuillError {
    pub code: ErrorCode,
    pub message: String,
    /// Line of the construct that triggered the error, when one exists.
    pub line: Option<Line>,
}

fn at_line(line: &Option<Line>) -> String {
    line.map(|line| format!(" (line {line})")).unwrap_or_default()
}

impl QuillError {
    pub fn new(code: ErrorCode, message: impl Into<String>, line: Option<Line>) -> Self {
        QuillError {
            code,
            message: message.into(),
            line,
        }
    }

    /// The category this error is reported under.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Attach a line if the error does not carry one yet.
    #[must_use]
    pub fn or_line(mut self, line: Line) -> Self {
        self.line.get_or_insert(line);
        self
    }

    // Reader

    pub fn unterminated_string(line: Line) -> Self {
        Self::new(ErrorCode::E0001, "unterminated string literal", Some(line))
    }

    pub fn unbalanced_paren(message: impl Into<String>, line: Line) -> Self {
        Self::new(ErrorCode::E0002, message, Some(line))
    }

    pub fn malformed(message: impl Into<String>, line: Line) -> Self {
        Self::new(ErrorCode::E1001, message, Some(line))
    }

    // Static semantics

    pub fn type_mismatch(message: impl Into<String>, line: Line) -> Self {
        Self::new(ErrorCode::E2001, message, Some(line))
    }

    pub fn unknown_type(name: &str, line: Line) -> Self {
        Self::new(ErrorCode::E2002, format!("no class named `{name}`"), Some(line))
    }

    pub fn unknown_template(name: &str, line: Line) -> Self {
        Self::new(
            ErrorCode::E2002,
            format!("no template class named `{name}`"),
            Some(line),
        )
    }

    pub fn method_not_found(class: &str, method: &str, line: Line) -> Self {
        Self::new(
            ErrorCode::E2003,
            format!("class `{class}` has no method `{method}`"),
            Some(line),
        )
    }

    pub fn unknown_field(class: &str, field: &str, line: Line) -> Self {
        Self::new(
            ErrorCode::E2003,
            format!("class `{class}` has no field `{field}`"),
            Some(line),
        )
    }

    pub fn argument_count(method: &str, expected: usize, found: usize, line: Line) -> Self {
        Self::new(
            ErrorCode::E2004,
            format!("method `{method}` takes {expected} argument(s) but {found} were supplied"),
            Some(line),
        )
    }

    pub fn template_argument_count(
        template: &str,
        expected: usize,
        found: usize,
        line: Line,
    ) -> Self {
        Self::new(
            ErrorCode::E2005,
            format!(
                "template `{template}` takes {expected} type argument(s) but {found} were supplied"
            ),
            Some(line),
        )
    }

    /// `what` names the kind of item: "class", "field", "method", ...
    pub fn duplicate(what: &str, name: &str, line: Line) -> Self {
        Self::new(
            ErrorCode::E2006,
            format!("duplicate {what} `{name}`"),
            Some(line),
        )
    }

    pub fn cyclic_inheritance(class: &str, line: Option<Line>) -> Self {
        Self::new(
            ErrorCode::E2008,
            format!("class `{class}` inherits from itself"),
            line,
        )
    }

    pub fn instantiation_too_deep(name: &str, limit: usize, line: Line) -> Self {
        Self::new(
            ErrorCode::E2008,
            format!(
                "instantiating `{name}` exceeds the template nesting limit of {limit}; \
                 the template expands without bound"
            ),
            Some(line),
        )
    }
}
