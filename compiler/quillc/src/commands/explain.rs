//! The `explain` command: display documentation for error codes.

use quill_diagnostic::{ErrorCode, ErrorDocs};

/// The documentation for `code_str`, or a message saying why there is none.
pub fn explanation(code_str: &str) -> Result<&'static str, String> {
    let code: ErrorCode = code_str.parse().map_err(|_| {
        format!(
            "Unknown error code: {code_str}\n\n\
             Codes have the format EXXXX where X is a digit.\n\
             Examples: E0001, E1001, E2001"
        )
    })?;

    ErrorDocs::get(code).ok_or_else(|| format!("No documentation available for {code}"))
}

/// Print the documentation for an error code.
pub fn explain_error(code_str: &str) {
    match explanation(code_str) {
        Ok(doc) => println!("{doc}"),
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
}
