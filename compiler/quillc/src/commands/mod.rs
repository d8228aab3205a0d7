//! Command handlers for the Quill CLI.
//!
//! Handlers print and exit; the text they print comes from the pure
//! functions re-exported here, which the tests drive directly.

use std::io::IsTerminal;

use quill_diagnostic::emitter::{SourceFile, TerminalEmitter};
use quill_diagnostic::QuillError;
use quill_sema::{ClassEnv, SemaConfig};

mod check;
mod classes;
mod explain;

pub use check::{check_file, parse_check_options, CheckOptions};
pub use classes::{classes_file, describe_classes};
pub use explain::{explain_error, explanation};

/// Read a source file or exit with a message.
fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: could not read '{path}': {e}");
            std::process::exit(1);
        }
    }
}

/// Load a program, reporting the error and exiting on failure.
fn load_or_exit(path: &str, source: &str, config: SemaConfig) -> ClassEnv {
    match ClassEnv::load_source(source, config) {
        Ok(env) => env,
        Err(error) => {
            report(&error, path, source);
            std::process::exit(1);
        }
    }
}

fn report(error: &QuillError, path: &str, source: &str) {
    let colors = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(colors);
    let file = SourceFile { path, text: source };
    // Nothing useful can be done if stderr itself is gone.
    let _ = emitter
        .emit(error, Some(file))
        .and_then(|()| emitter.emit_summary())
        .and_then(|()| emitter.flush());
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
