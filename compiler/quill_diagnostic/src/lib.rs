//! Diagnostic system for the Quill static core.
//!
//! Every fallible operation in the core returns [`QuillError`]: an
//! [`ErrorCode`] for searchability, a message saying what went wrong, and the
//! source line that triggered it. Codes group into an [`ErrorKind`], the
//! category the execution engine and the CLI report.
//!
//! There is no local recovery. The first error aborts the operation and
//! propagates to the top-level reporter, which renders it with
//! [`emitter::TerminalEmitter`].

pub mod emitter;
mod error;
mod error_code;
pub mod errors;

pub use error::{QuillError, QuillResult};
pub use error_code::{ErrorCode, ErrorKind, ParseErrorCodeError};
pub use errors::ErrorDocs;
